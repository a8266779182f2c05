use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{
    optional_inline, optional_multiline, parse_price_cents, sanitize_currency,
    sanitize_inline_text, sanitize_sku,
};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 2048;
const ICON_MAX_LEN_VALIDATOR: u64 = 32;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided currency code is invalid.
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
    /// The provided price is not a non-negative amount with two decimals at most.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The SKU exceeds the allowed length.
    #[error("SKU is longer than 64 characters")]
    SkuTooLong,
    /// A subcategory was given without its category.
    #[error("subcategory requires a category")]
    SubcategoryWithoutCategory,
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required `name`/`title`, `price` or `currency` headers")]
    MissingRequiredHeaders,
    /// A CSV row did not include a product name.
    #[error("row {row} is missing a product name")]
    UploadMissingName { row: usize },
    /// A CSV row contained an invalid price.
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    /// A CSV row did not include a currency code.
    #[error("row {row} is missing a currency code")]
    UploadMissingCurrency { row: usize },
    /// A CSV row contained an invalid currency code.
    #[error("row {row} has invalid currency `{value}`")]
    UploadInvalidCurrency { row: usize, value: String },
    /// The uploaded CSV did not contain any usable products.
    #[error("upload contains no products")]
    EmptyUpload,
    /// The uploaded file could not be read.
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Price as sent by clients: either a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    fn to_cents(&self) -> ProductFormResult<i64> {
        let raw = match self {
            PriceInput::Number(number) => number.to_string(),
            PriceInput::Text(text) => text.clone(),
        };
        parse_price_cents(&raw).ok_or(ProductFormError::InvalidPrice { value: raw })
    }
}

/// Payload for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = ICON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub icon: Option<String>,
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub sku: Option<String>,
    pub price: PriceInput,
    /// ISO 4217 currency code (e.g. `USD`).
    pub currency: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub subcategory_id: Option<i32>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price_cents = self.price.to_cents()?;
        let currency = sanitize_currency(&self.currency).ok_or(ProductFormError::InvalidCurrency {
            value: self.currency.trim().to_string(),
        })?;

        if self.subcategory_id.is_some() && self.category_id.is_none() {
            return Err(ProductFormError::SubcategoryWithoutCategory);
        }

        let mut new_product = NewProduct::new(hub_id, name, price_cents, currency)
            .with_availability(self.is_available);

        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }
        if let Some(subcategory_id) = self.subcategory_id {
            new_product = new_product.with_subcategory_id(subcategory_id);
        }
        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_product = new_product.with_description(description);
        }
        if let Some(icon) = optional_inline(self.icon.as_deref()) {
            new_product = new_product.with_icon(icon);
        }
        if let Some(sku) = self.sku.as_deref().map(sanitize_sku).filter(|v| !v.is_empty()) {
            new_product = new_product.with_sku(sku);
        }

        Ok(new_product)
    }
}

/// Partial product update. Absent fields stay untouched, `null` clears
/// nullable fields.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub sku: Option<Option<String>>,
    pub price: Option<PriceInput>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub subcategory_id: Option<Option<i32>>,
    pub is_available: Option<bool>,
    pub is_archived: Option<bool>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(description) = self.description {
            updates = updates.description(optional_multiline(description.as_deref()));
        }

        if let Some(icon) = self.icon {
            updates = updates.icon(optional_inline(icon.as_deref()));
        }

        if let Some(sku) = self.sku {
            let sanitized = sku.as_deref().map(sanitize_sku).filter(|v| !v.is_empty());
            if sanitized.as_ref().is_some_and(|value| value.len() > SKU_MAX_LEN) {
                return Err(ProductFormError::SkuTooLong);
            }
            updates = updates.sku(sanitized);
        }

        if let Some(price) = self.price {
            updates = updates.price_cents(price.to_cents()?);
        }

        if let Some(currency) = self.currency {
            let sanitized = sanitize_currency(&currency).ok_or(ProductFormError::InvalidCurrency {
                value: currency.trim().to_string(),
            })?;
            updates = updates.currency(sanitized);
        }

        if let Some(category_id) = self.category_id {
            updates = updates.category_id(category_id);
        }

        if let Some(subcategory_id) = self.subcategory_id {
            updates = updates.subcategory_id(subcategory_id);
        }

        if let Some(is_available) = self.is_available {
            updates = updates.available(is_available);
        }

        if let Some(is_archived) = self.is_archived {
            updates = updates.archived(is_archived);
        }

        Ok(updates)
    }
}

/// Multipart upload carrying a CSV of products.
#[derive(Debug, MultipartForm)]
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// Product parsed from one CSV row plus the category name it refers to.
#[derive(Debug, Clone)]
pub struct ProductUpload {
    pub product: NewProduct,
    pub category: Option<String>,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV into products. Row numbers in errors count the
    /// header as line 1.
    pub fn into_product_uploads(&self, hub_id: i32) -> ProductFormResult<Vec<ProductUpload>> {
        let contents = std::fs::read(self.csv.file.path())?;
        parse_product_csv(&contents, hub_id)
    }
}

struct ProductHeaderIndexes {
    name_index: Option<usize>,
    title_index: Option<usize>,
    price_index: usize,
    currency_index: usize,
    sku_index: Option<usize>,
    description_index: Option<usize>,
    icon_index: Option<usize>,
    category_index: Option<usize>,
}

fn parse_product_csv(contents: &[u8], hub_id: i32) -> ProductFormResult<Vec<ProductUpload>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(contents);

    let headers = reader.headers()?.clone();
    let indexes = locate_product_headers(&headers)?;

    let mut uploads = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let record = row?;
        let row_number = record
            .position()
            .map_or(index + 2, |position| position.line() as usize);

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let name = sanitize_inline_text(resolve_product_name(
            &record,
            indexes.name_index,
            indexes.title_index,
        ));
        if name.is_empty() {
            return Err(ProductFormError::UploadMissingName { row: row_number });
        }

        let price_raw = record.get(indexes.price_index).unwrap_or("").trim();
        let price_cents =
            parse_price_cents(price_raw).ok_or_else(|| ProductFormError::UploadInvalidPrice {
                row: row_number,
                value: price_raw.to_string(),
            })?;

        let currency_raw = record.get(indexes.currency_index).unwrap_or("").trim();
        if currency_raw.is_empty() {
            return Err(ProductFormError::UploadMissingCurrency { row: row_number });
        }
        let currency =
            sanitize_currency(currency_raw).ok_or_else(|| ProductFormError::UploadInvalidCurrency {
                row: row_number,
                value: currency_raw.to_string(),
            })?;

        let field = |index: Option<usize>| index.and_then(|idx| record.get(idx));

        let mut product = NewProduct::new(hub_id, name, price_cents, currency);

        if let Some(sku) = field(indexes.sku_index)
            .map(sanitize_sku)
            .filter(|value| !value.is_empty())
        {
            product = product.with_sku(sku);
        }
        if let Some(description) = optional_multiline(field(indexes.description_index)) {
            product = product.with_description(description);
        }
        if let Some(icon) = optional_inline(field(indexes.icon_index)) {
            product = product.with_icon(icon);
        }

        uploads.push(ProductUpload {
            product,
            category: optional_inline(field(indexes.category_index)),
        });
    }

    if uploads.is_empty() {
        return Err(ProductFormError::EmptyUpload);
    }

    Ok(uploads)
}

fn locate_product_headers(headers: &StringRecord) -> ProductFormResult<ProductHeaderIndexes> {
    let name_index = locate_header(headers, "name");
    let title_index = locate_header(headers, "title");
    if name_index.is_none() && title_index.is_none() {
        return Err(ProductFormError::MissingRequiredHeaders);
    }

    let price_index =
        locate_header(headers, "price").ok_or(ProductFormError::MissingRequiredHeaders)?;
    let currency_index =
        locate_header(headers, "currency").ok_or(ProductFormError::MissingRequiredHeaders)?;

    Ok(ProductHeaderIndexes {
        name_index,
        title_index,
        price_index,
        currency_index,
        sku_index: locate_header(headers, "sku"),
        description_index: locate_header(headers, "description"),
        icon_index: locate_header(headers, "icon"),
        category_index: locate_header(headers, "category"),
    })
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(expected))
}

fn resolve_product_name(
    record: &StringRecord,
    name_index: Option<usize>,
    title_index: Option<usize>,
) -> &str {
    if let Some(index) = name_index
        && let Some(value) = record.get(index)
        && !value.trim().is_empty()
    {
        return value;
    }

    if let Some(index) = title_index
        && let Some(value) = record.get(index)
        && !value.trim().is_empty()
    {
        return value;
    }

    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_form(price: PriceInput) -> AddProductForm {
        AddProductForm {
            name: "  Flat   White ".to_string(),
            description: Some(" Double shot \n\n\n with milk ".to_string()),
            icon: Some(" ☕ ".to_string()),
            sku: Some(" FW-01 ".to_string()),
            price,
            currency: "eur".to_string(),
            category_id: Some(3),
            subcategory_id: Some(9),
            is_available: true,
        }
    }

    #[test]
    fn add_product_form_converts_successfully() {
        let product = add_form(PriceInput::Text("3.5".to_string()))
            .into_new_product(42)
            .expect("expected success");

        assert_eq!(product.hub_id, 42);
        assert_eq!(product.name, "Flat White");
        assert_eq!(product.price_cents, 350);
        assert_eq!(product.currency, "EUR");
        assert_eq!(product.sku.as_deref(), Some("FW-01"));
        assert_eq!(product.icon.as_deref(), Some("☕"));
        assert_eq!(
            product.description.as_deref(),
            Some("Double shot\n\nwith milk")
        );
        assert_eq!(product.category_id, Some(3));
        assert_eq!(product.subcategory_id, Some(9));
    }

    #[test]
    fn add_product_form_accepts_json_numbers() {
        let form: AddProductForm = serde_json::from_str(
            r#"{"name":"Tea","price":2.75,"currency":"usd"}"#,
        )
        .expect("valid json");

        let product = form.into_new_product(1).expect("expected success");

        assert_eq!(product.price_cents, 275);
        assert!(product.is_available);
    }

    #[test]
    fn add_product_form_rejects_bad_price() {
        let result = add_form(PriceInput::Text("3.555".to_string())).into_new_product(1);

        assert!(matches!(
            result,
            Err(ProductFormError::InvalidPrice { value }) if value == "3.555"
        ));
    }

    #[test]
    fn add_product_form_requires_category_for_subcategory() {
        let mut form = add_form(PriceInput::Text("1".to_string()));
        form.category_id = None;

        let result = form.into_new_product(1);

        assert!(matches!(
            result,
            Err(ProductFormError::SubcategoryWithoutCategory)
        ));
    }

    #[test]
    fn edit_product_form_distinguishes_null_from_absent() {
        let form: EditProductForm =
            serde_json::from_str(r#"{"category_id":null,"price":"4"}"#).expect("valid json");

        let updates = form.into_update_product().expect("expected success");

        assert_eq!(updates.category_id, Some(None));
        assert_eq!(updates.subcategory_id, None);
        assert_eq!(updates.price_cents, Some(400));
        assert!(updates.name.is_none());
    }

    #[test]
    fn edit_product_form_rejects_blank_name() {
        let form = EditProductForm {
            name: Some("   ".to_string()),
            ..EditProductForm::default()
        };

        let result = form.into_update_product();

        assert!(matches!(result, Err(ProductFormError::EmptyName)));
    }

    #[test]
    fn csv_upload_parses_rows_with_case_insensitive_headers() {
        let csv = "Title,Price,Currency,Category,Icon\nEspresso,2.50,usd,Drinks,☕\nLatte,3,usd,,\n";

        let uploads = parse_product_csv(csv.as_bytes(), 4).expect("expected success");

        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].product.name, "Espresso");
        assert_eq!(uploads[0].product.price_cents, 250);
        assert_eq!(uploads[0].product.currency, "USD");
        assert_eq!(uploads[0].category.as_deref(), Some("Drinks"));
        assert_eq!(uploads[0].product.icon.as_deref(), Some("☕"));
        assert!(uploads[1].category.is_none());
    }

    #[test]
    fn csv_upload_requires_price_header() {
        let csv = "name,currency\nEspresso,USD\n";

        let result = parse_product_csv(csv.as_bytes(), 1);

        assert!(matches!(result, Err(ProductFormError::MissingRequiredHeaders)));
    }

    #[test]
    fn csv_upload_reports_line_numbers_including_header() {
        let csv = "name,price,currency\nEspresso,2.5,USD\nLatte,abc,USD\n";

        let result = parse_product_csv(csv.as_bytes(), 1);

        assert!(matches!(
            result,
            Err(ProductFormError::UploadInvalidPrice { row: 3, value }) if value == "abc"
        ));
    }

    #[test]
    fn csv_upload_counts_lines_inside_quoted_fields() {
        let csv = "name,price,description,currency\nSoup,6.50,\"Hot\nand thick\",USD\nTea,abc,,USD\n";

        let result = parse_product_csv(csv.as_bytes(), 1);

        assert!(matches!(
            result,
            Err(ProductFormError::UploadInvalidPrice { row: 4, .. })
        ));
    }

    #[test]
    fn csv_upload_rejects_invalid_currency() {
        let csv = "name,price,currency\nEspresso,2.5,EURO\n";

        let result = parse_product_csv(csv.as_bytes(), 1);

        assert!(matches!(
            result,
            Err(ProductFormError::UploadInvalidCurrency { row: 2, .. })
        ));
    }

    #[test]
    fn csv_upload_without_rows_is_rejected() {
        let csv = "name,price,currency\n";

        let result = parse_product_csv(csv.as_bytes(), 1);

        assert!(matches!(result, Err(ProductFormError::EmptyUpload)));
    }
}
