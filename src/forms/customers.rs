use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const PHONE_MAX_LEN_VALIDATOR: u64 = 32;
const NOTES_MAX_LEN_VALIDATOR: u64 = 2048;

pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

#[derive(Debug, Error)]
pub enum CustomerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("customer name cannot be empty")]
    EmptyName,
}

/// Customer payload used for both create and full update.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = PHONE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = NOTES_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub company_id: Option<i32>,
}

struct SanitizedCustomer {
    name: String,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    company_id: Option<i32>,
}

impl CustomerForm {
    fn sanitize(self) -> CustomerFormResult<SanitizedCustomer> {
        // Blank optional inputs arrive as "" from HTML forms.
        let email = self
            .email
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let form = CustomerForm { email, ..self };
        form.validate()?;

        let name = sanitize_inline_text(&form.name);
        if name.is_empty() {
            return Err(CustomerFormError::EmptyName);
        }

        Ok(SanitizedCustomer {
            name,
            email: form.email.map(|value| value.to_lowercase()),
            phone: optional_inline(form.phone.as_deref()),
            notes: optional_multiline(form.notes.as_deref()),
            company_id: form.company_id,
        })
    }

    pub fn into_new_customer(self, hub_id: i32) -> CustomerFormResult<NewCustomer> {
        let sanitized = self.sanitize()?;

        let mut customer = NewCustomer::new(hub_id, sanitized.name);
        if let Some(email) = sanitized.email {
            customer = customer.with_email(email);
        }
        if let Some(phone) = sanitized.phone {
            customer = customer.with_phone(phone);
        }
        if let Some(notes) = sanitized.notes {
            customer = customer.with_notes(notes);
        }
        if let Some(company_id) = sanitized.company_id {
            customer = customer.with_company_id(company_id);
        }

        Ok(customer)
    }

    pub fn into_update_customer(self) -> CustomerFormResult<UpdateCustomer> {
        let sanitized = self.sanitize()?;

        Ok(UpdateCustomer::new(
            sanitized.name,
            sanitized.email,
            sanitized.phone,
            sanitized.notes,
            sanitized.company_id,
        ))
    }
}
