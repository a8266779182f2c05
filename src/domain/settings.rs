use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESTAURANT_NAME: &str = "Restaurant";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_LOCALE: &str = "en";

pub const DEFAULT_MAP_WIDTH: i32 = 1200;
pub const DEFAULT_MAP_HEIGHT: i32 = 800;
pub const DEFAULT_GRID_SIZE: i32 = 20;

/// Restaurant-wide settings shown on receipts and used as defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanySettings {
    pub hub_id: i32,
    /// Restaurant display name.
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    /// ISO 4217 currency code used for new products.
    pub currency: String,
    /// Tax rate in basis points (1/100 of a percent).
    pub tax_rate_bp: i32,
    /// UI locale such as `en` or `ru`.
    pub locale: String,
    pub logo_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl CompanySettings {
    /// Settings reported for a hub that never saved any.
    pub fn defaults(hub_id: i32) -> Self {
        Self {
            hub_id,
            name: DEFAULT_RESTAURANT_NAME.to_string(),
            address: None,
            phone: None,
            email: None,
            tax_id: None,
            currency: DEFAULT_CURRENCY.to_string(),
            tax_rate_bp: 0,
            locale: DEFAULT_LOCALE.to_string(),
            logo_url: None,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Canvas configuration used by the table layout designer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapSettings {
    pub hub_id: i32,
    /// Canvas width in pixels.
    pub width: i32,
    /// Canvas height in pixels.
    pub height: i32,
    /// Grid cell size in pixels.
    pub grid_size: i32,
    /// Whether table positions are snapped to the grid when saved.
    pub snap_to_grid: bool,
    pub updated_at: NaiveDateTime,
}

impl MapSettings {
    /// Settings reported for a hub that never saved any.
    pub fn defaults(hub_id: i32) -> Self {
        Self {
            hub_id,
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Snap a coordinate to the nearest grid line when snapping is enabled.
    ///
    /// A value whose rounded grid line is not representable is returned as is.
    pub fn snap(&self, value: i32) -> i32 {
        if !self.snap_to_grid || self.grid_size <= 1 {
            return value;
        }
        let grid = self.grid_size;
        value
            .checked_add(grid / 2)
            .map(|shifted| shifted.div_euclid(grid))
            .and_then(|rounded| rounded.checked_mul(grid))
            .unwrap_or(value)
    }

    /// Whether a rectangle placed at (`x`, `y`) fits entirely on the canvas.
    /// Edges that overflow `i32` do not fit.
    pub fn contains(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        let right = x.checked_add(width);
        let bottom = y.checked_add(height);
        x >= 0
            && y >= 0
            && right.is_some_and(|right| right <= self.width)
            && bottom.is_some_and(|bottom| bottom <= self.height)
    }
}

/// Upsert payload for [`CompanySettings`].
#[derive(Debug, Clone)]
pub struct SaveCompanySettings {
    pub hub_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub currency: String,
    pub tax_rate_bp: i32,
    pub locale: String,
    pub logo_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Upsert payload for [`MapSettings`].
#[derive(Debug, Clone, Copy)]
pub struct SaveMapSettings {
    pub hub_id: i32,
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
    pub snap_to_grid: bool,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_grid_line() {
        let map = MapSettings::defaults(1);

        assert_eq!(map.snap(0), 0);
        assert_eq!(map.snap(9), 0);
        assert_eq!(map.snap(10), 20);
        assert_eq!(map.snap(31), 40);
        assert_eq!(map.snap(-9), 0);
        assert_eq!(map.snap(-11), -20);
    }

    #[test]
    fn snap_is_noop_when_disabled() {
        let mut map = MapSettings::defaults(1);
        map.snap_to_grid = false;

        assert_eq!(map.snap(37), 37);
    }

    #[test]
    fn contains_checks_all_edges() {
        let map = MapSettings::defaults(1);

        assert!(map.contains(0, 0, 100, 100));
        assert!(map.contains(1100, 700, 100, 100));
        assert!(!map.contains(1101, 700, 100, 100));
        assert!(!map.contains(-1, 0, 10, 10));
        assert!(!map.contains(0, 750, 10, 60));
    }

    #[test]
    fn overflowing_coordinates_never_fit() {
        let map = MapSettings::defaults(1);
        let far = i32::MAX - 5;

        assert_eq!(map.snap(far), far);
        assert!(!map.contains(map.snap(far), 0, 80, 80));
        assert!(!map.contains(0, far, 80, 80));
    }
}
