use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::company::{NewCompany, UpdateCompany};
use crate::forms::{optional_inline, optional_multiline, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const TAX_ID_MAX_LEN_VALIDATOR: u64 = 32;
const PHONE_MAX_LEN_VALIDATOR: u64 = 32;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = 512;

pub type CompanyFormResult<T> = Result<T, CompanyFormError>;

#[derive(Debug, Error)]
pub enum CompanyFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("company name cannot be empty")]
    EmptyName,
}

/// Company payload used for both create and full update.
#[derive(Debug, Deserialize, Validate)]
pub struct CompanyForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = TAX_ID_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub tax_id: Option<String>,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(max = PHONE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(max = ADDRESS_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CompanyForm {
    fn sanitized(self) -> CompanyFormResult<Self> {
        let email = self
            .email
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let form = CompanyForm { email, ..self };
        form.validate()?;

        let name = sanitize_inline_text(&form.name);
        if name.is_empty() {
            return Err(CompanyFormError::EmptyName);
        }

        Ok(CompanyForm {
            name,
            tax_id: optional_inline(form.tax_id.as_deref()),
            email: form.email.map(|value| value.to_lowercase()),
            phone: optional_inline(form.phone.as_deref()),
            address: optional_multiline(form.address.as_deref()),
            is_active: form.is_active,
        })
    }

    pub fn into_new_company(self, hub_id: i32) -> CompanyFormResult<NewCompany> {
        let form = self.sanitized()?;

        let mut company = NewCompany::new(hub_id, form.name);
        if let Some(tax_id) = form.tax_id {
            company = company.with_tax_id(tax_id);
        }
        if let Some(email) = form.email {
            company = company.with_email(email);
        }
        if let Some(phone) = form.phone {
            company = company.with_phone(phone);
        }
        if let Some(address) = form.address {
            company = company.with_address(address);
        }

        Ok(company)
    }

    pub fn into_update_company(self) -> CompanyFormResult<UpdateCompany> {
        let form = self.sanitized()?;

        Ok(UpdateCompany::new(
            form.name,
            form.tax_id,
            form.email,
            form.phone,
            form.address,
            form.is_active,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_form_sanitizes_fields() {
        let form = CompanyForm {
            name: " Acme   Catering ".to_string(),
            tax_id: Some(" DE123 ".to_string()),
            email: Some("Billing@Acme.test".to_string()),
            phone: Some(String::new()),
            address: Some(" Main St 1 \n\n\n Berlin ".to_string()),
            is_active: false,
        };

        let update = form.into_update_company().expect("expected success");

        assert_eq!(update.name, "Acme Catering");
        assert_eq!(update.tax_id.as_deref(), Some("DE123"));
        assert_eq!(update.email.as_deref(), Some("billing@acme.test"));
        assert!(update.phone.is_none());
        assert_eq!(update.address.as_deref(), Some("Main St 1\n\nBerlin"));
        assert!(!update.is_active);
    }

    #[test]
    fn company_form_defaults_to_active() {
        let form: CompanyForm = serde_json::from_str(r#"{"name":"Acme"}"#).expect("valid json");

        let company = form.into_new_company(2).expect("expected success");

        assert_eq!(company.hub_id, 2);
        assert_eq!(company.name, "Acme");
    }

    #[test]
    fn company_form_rejects_blank_name() {
        let form: CompanyForm = serde_json::from_str(r#"{"name":"  "}"#).expect("valid json");

        let result = form.into_new_company(1);

        assert!(matches!(result, Err(CompanyFormError::EmptyName)));
    }
}
