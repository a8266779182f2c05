use chrono::Local;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::area::{NewArea, UpdateArea};
use crate::domain::settings::{
    DEFAULT_CURRENCY, DEFAULT_GRID_SIZE, DEFAULT_LOCALE, SaveCompanySettings, SaveMapSettings,
};
use crate::forms::{optional_inline, optional_multiline, sanitize_currency, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const LOCALE_MAX_LEN_VALIDATOR: u64 = 16;
const URL_MAX_LEN_VALIDATOR: u64 = 512;

/// Bounds for map and area dimensions in layout units.
const MIN_DIMENSION: i32 = 100;
const MAX_DIMENSION: i32 = 10_000;

/// Default floor colour for new areas.
const DEFAULT_AREA_COLOR: &str = "#ffffff";

pub type SettingsFormResult<T> = Result<T, SettingsFormError>;

#[derive(Debug, Error)]
pub enum SettingsFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
    #[error("invalid colour `{value}`, expected #rgb or #rrggbb")]
    InvalidColor { value: String },
}

/// Restaurant profile submitted from the settings screen.
#[derive(Debug, Deserialize, Validate)]
pub struct CompanySettingsForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Tax rate in basis points, `1_000` is 10 %.
    #[validate(range(min = 0, max = 10_000))]
    #[serde(default)]
    pub tax_rate_bp: i32,
    #[validate(length(min = 2, max = LOCALE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub locale: Option<String>,
    #[validate(url, length(max = URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanySettingsForm {
    pub fn into_save_settings(self, hub_id: i32) -> SettingsFormResult<SaveCompanySettings> {
        let email = self
            .email
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let logo_url = self
            .logo_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let locale = self
            .locale
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let form = CompanySettingsForm {
            email,
            logo_url,
            locale,
            ..self
        };
        form.validate()?;

        let name = sanitize_inline_text(&form.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        let currency = match form.currency.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CURRENCY.to_string(),
            Some(raw) => sanitize_currency(raw).ok_or(SettingsFormError::InvalidCurrency {
                value: raw.to_string(),
            })?,
        };

        Ok(SaveCompanySettings {
            hub_id,
            name,
            address: optional_multiline(form.address.as_deref()),
            phone: optional_inline(form.phone.as_deref()),
            email: form.email.map(|value| value.to_lowercase()),
            tax_id: optional_inline(form.tax_id.as_deref()),
            currency,
            tax_rate_bp: form.tax_rate_bp,
            locale: form.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            logo_url: form.logo_url,
            updated_at: Local::now().naive_utc(),
        })
    }
}

/// Dimensions of the floor plan canvas.
#[derive(Debug, Deserialize, Validate)]
pub struct MapSettingsForm {
    #[validate(range(min = MIN_DIMENSION, max = MAX_DIMENSION))]
    pub width: i32,
    #[validate(range(min = MIN_DIMENSION, max = MAX_DIMENSION))]
    pub height: i32,
    #[validate(range(min = 1, max = 200))]
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,
    #[serde(default = "default_snap")]
    pub snap_to_grid: bool,
}

fn default_grid_size() -> i32 {
    DEFAULT_GRID_SIZE
}

fn default_snap() -> bool {
    true
}

impl MapSettingsForm {
    pub fn into_save_settings(self, hub_id: i32) -> SettingsFormResult<SaveMapSettings> {
        self.validate()?;

        Ok(SaveMapSettings {
            hub_id,
            width: self.width,
            height: self.height,
            grid_size: self.grid_size,
            snap_to_grid: self.snap_to_grid,
            updated_at: Local::now().naive_utc(),
        })
    }
}

/// Dining area (room, terrace) with its own canvas.
#[derive(Debug, Deserialize, Validate)]
pub struct AreaForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(range(min = MIN_DIMENSION, max = MAX_DIMENSION))]
    pub width: i32,
    #[validate(range(min = MIN_DIMENSION, max = MAX_DIMENSION))]
    pub height: i32,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl AreaForm {
    fn sanitized(&self) -> SettingsFormResult<(String, String)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(SettingsFormError::EmptyName);
        }

        let color = match self.background_color.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_AREA_COLOR.to_string(),
            Some(raw) => sanitize_color(raw).ok_or(SettingsFormError::InvalidColor {
                value: raw.to_string(),
            })?,
        };

        Ok((name, color))
    }

    pub fn into_new_area(self, hub_id: i32) -> SettingsFormResult<NewArea> {
        let (name, color) = self.sanitized()?;
        Ok(NewArea::new(hub_id, name, self.width, self.height, color).with_sort_order(self.sort_order))
    }

    pub fn into_update_area(self) -> SettingsFormResult<UpdateArea> {
        let (name, color) = self.sanitized()?;
        Ok(UpdateArea::new(
            name,
            self.width,
            self.height,
            color,
            self.sort_order,
        ))
    }
}

/// Lower-cased `#rgb`/`#rrggbb` colour.
fn sanitize_color(raw: &str) -> Option<String> {
    let hex = raw.strip_prefix('#')?;
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", hex.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_settings_form_fills_defaults() {
        let form: CompanySettingsForm =
            serde_json::from_str(r#"{"name":" Chez  Nous ","email":""}"#).expect("valid json");

        let settings = form.into_save_settings(9).expect("expected success");

        assert_eq!(settings.hub_id, 9);
        assert_eq!(settings.name, "Chez Nous");
        assert_eq!(settings.currency, DEFAULT_CURRENCY);
        assert_eq!(settings.locale, DEFAULT_LOCALE);
        assert_eq!(settings.tax_rate_bp, 0);
        assert!(settings.email.is_none());
    }

    #[test]
    fn company_settings_form_rejects_tax_rate_above_hundred_percent() {
        let form: CompanySettingsForm =
            serde_json::from_str(r#"{"name":"Bistro","tax_rate_bp":10001}"#).expect("valid json");

        let result = form.into_save_settings(1);

        assert!(matches!(result, Err(SettingsFormError::Validation(_))));
    }

    #[test]
    fn company_settings_form_normalizes_currency() {
        let form: CompanySettingsForm =
            serde_json::from_str(r#"{"name":"Bistro","currency":"gbp","tax_rate_bp":2000}"#)
                .expect("valid json");

        let settings = form.into_save_settings(1).expect("expected success");

        assert_eq!(settings.currency, "GBP");
        assert_eq!(settings.tax_rate_bp, 2000);
    }

    #[test]
    fn map_settings_form_checks_bounds() {
        let too_small = MapSettingsForm {
            width: 50,
            height: 800,
            grid_size: 20,
            snap_to_grid: true,
        };
        assert!(matches!(
            too_small.into_save_settings(1),
            Err(SettingsFormError::Validation(_))
        ));

        let bad_grid = MapSettingsForm {
            width: 1200,
            height: 800,
            grid_size: 0,
            snap_to_grid: true,
        };
        assert!(bad_grid.into_save_settings(1).is_err());

        let form: MapSettingsForm =
            serde_json::from_str(r#"{"width":1600,"height":900}"#).expect("valid json");
        let settings = form.into_save_settings(1).expect("expected success");
        assert_eq!(settings.grid_size, DEFAULT_GRID_SIZE);
        assert!(settings.snap_to_grid);
    }

    #[test]
    fn area_form_validates_colour() {
        let form = AreaForm {
            name: " Terrace ".to_string(),
            width: 800,
            height: 600,
            background_color: Some("#A0B1C2".to_string()),
            sort_order: 1,
        };
        let area = form.into_new_area(3).expect("expected success");
        assert_eq!(area.name, "Terrace");
        assert_eq!(area.background_color, "#a0b1c2");

        let bad = AreaForm {
            name: "Hall".to_string(),
            width: 800,
            height: 600,
            background_color: Some("blue".to_string()),
            sort_order: 0,
        };
        assert!(matches!(
            bad.into_update_area(),
            Err(SettingsFormError::InvalidColor { .. })
        ));
    }
}
