use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::domain::subcategory::{NewSubcategory, UpdateSubcategory};
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

/// Maximum length allowed for a category or subcategory name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a category description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Icons are emoji or short glyph names.
const ICON_MAX_LEN_VALIDATOR: u64 = 32;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Payload for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = ICON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, hub_id: i32) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_name(&self.name)?;

        let mut new_category = NewCategory::new(hub_id, name).with_sort_order(self.sort_order);
        if let Some(description) = optional_multiline(self.description.as_deref()) {
            new_category = new_category.with_description(description);
        }
        if let Some(icon) = optional_inline(self.icon.as_deref()) {
            new_category = new_category.with_icon(icon);
        }

        Ok(new_category)
    }
}

/// Payload for editing a category. Every field is replaced.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = ICON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_archived: bool,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let name = sanitize_name(&self.name)?;

        Ok(UpdateCategory::new(
            name,
            optional_multiline(self.description.as_deref()),
            optional_inline(self.icon.as_deref()),
            self.sort_order,
            self.is_archived,
        ))
    }
}

/// Payload for creating a subcategory under a category taken from the path.
#[derive(Debug, Deserialize, Validate)]
pub struct AddSubcategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = ICON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl AddSubcategoryForm {
    pub fn into_new_subcategory(
        self,
        hub_id: i32,
        category_id: i32,
    ) -> CategoryFormResult<NewSubcategory> {
        self.validate()?;

        let name = sanitize_name(&self.name)?;

        let mut new_subcategory =
            NewSubcategory::new(hub_id, category_id, name).with_sort_order(self.sort_order);
        if let Some(icon) = optional_inline(self.icon.as_deref()) {
            new_subcategory = new_subcategory.with_icon(icon);
        }

        Ok(new_subcategory)
    }
}

/// Payload for editing a subcategory.
#[derive(Debug, Deserialize, Validate)]
pub struct EditSubcategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = ICON_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_archived: bool,
}

impl EditSubcategoryForm {
    pub fn into_update_subcategory(self) -> CategoryFormResult<UpdateSubcategory> {
        self.validate()?;

        let name = sanitize_name(&self.name)?;

        Ok(UpdateSubcategory::new(
            name,
            optional_inline(self.icon.as_deref()),
            self.sort_order,
            self.is_archived,
        ))
    }
}

fn sanitize_name(raw: &str) -> CategoryFormResult<String> {
    let sanitized = sanitize_inline_text(raw);
    if sanitized.is_empty() {
        return Err(CategoryFormError::EmptyName);
    }
    Ok(sanitized)
}
