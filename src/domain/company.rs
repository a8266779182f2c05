use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Business client of the restaurant (catering, corporate accounts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    /// Tax registration number.
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Inactive companies are kept for history but hidden from pickers.
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new company.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub hub_id: i32,
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewCompany {
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            tax_id: None,
            email: None,
            phone: None,
            address: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Full replacement of the editable company fields.
#[derive(Debug, Clone)]
pub struct UpdateCompany {
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateCompany {
    pub fn new(
        name: String,
        tax_id: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        is_active: bool,
    ) -> Self {
        Self {
            name,
            tax_id,
            email: email.map(|value| value.to_lowercase()),
            phone,
            address,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list companies for a hub.
#[derive(Debug, Clone)]
pub struct CompanyListQuery {
    pub hub_id: i32,
    /// Optional search term matched against the name and tax id.
    pub search: Option<String>,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl CompanyListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            include_inactive: true,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn only_active(mut self) -> Self {
        self.include_inactive = false;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
