use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Menu item that can be ordered at a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional category the product is listed under.
    pub category_id: Option<i32>,
    /// Optional subcategory; always belongs to `category_id` when set.
    pub subcategory_id: Option<i32>,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to guests.
    pub description: Option<String>,
    /// Optional icon identifier or emoji.
    pub icon: Option<String>,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// ISO 4217 currency code associated with the product price.
    pub currency: String,
    /// Whether the kitchen can currently serve the product.
    pub is_available: bool,
    /// Flag indicating whether the product has been archived.
    pub is_archived: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether the product may be put on a new order.
    pub fn is_orderable(&self) -> bool {
        self.is_available && !self.is_archived
    }
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub hub_id: i32,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sku: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        price_cents: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            hub_id,
            category_id: None,
            subcategory_id: None,
            name: name.into(),
            description: None,
            icon: None,
            sku: None,
            price_cents,
            currency: currency.into(),
            is_available: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Place the product in a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Place the product in a subcategory.
    pub fn with_subcategory_id(mut self, subcategory_id: i32) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an icon to the product payload.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Attach an SKU identifier to the product payload.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Override the availability flag.
    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// Outer `None` leaves a field untouched; for nullable columns `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub category_id: Option<Option<i32>>,
    pub subcategory_id: Option<Option<i32>>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub sku: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub is_available: Option<bool>,
    pub is_archived: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            category_id: None,
            subcategory_id: None,
            description: None,
            icon: None,
            sku: None,
            price_cents: None,
            currency: None,
            is_available: None,
            is_archived: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn subcategory_id(mut self, subcategory_id: Option<i32>) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(Into::into));
        self
    }

    pub fn icon(mut self, icon: Option<impl Into<String>>) -> Self {
        self.icon = Some(icon.map(Into::into));
        self
    }

    pub fn sku(mut self, sku: Option<impl Into<String>>) -> Self {
        self.sku = Some(sku.map(Into::into));
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    pub fn archived(mut self, is_archived: bool) -> Self {
        self.is_archived = Some(is_archived);
        self
    }
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Whether archived products should be returned.
    pub include_archived: bool,
    /// Restrict results to products the kitchen can currently serve.
    pub only_available: bool,
    /// Optional search term matched against the name and description.
    pub search: Option<String>,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Optional subcategory filter.
    pub subcategory_id: Option<i32>,
    /// Optional explicit set of identifiers.
    pub ids: Option<Vec<i32>>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            include_archived: false,
            only_available: false,
            search: None,
            category_id: None,
            subcategory_id: None,
            ids: None,
            pagination: None,
        }
    }

    /// Include archived products in the results.
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Only return products that are available for ordering.
    pub fn only_available(mut self) -> Self {
        self.only_available = true;
        self
    }

    /// Filter the results by a search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results by category.
    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter the results by subcategory.
    pub fn subcategory_id(mut self, subcategory_id: i32) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    /// Restrict the results to the given identifiers.
    pub fn ids(mut self, ids: impl Into<Vec<i32>>) -> Self {
        self.ids = Some(ids.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
