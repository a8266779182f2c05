use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Guest known to a hub, optionally billed through a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Hub identifier that owns the customer.
    pub hub_id: i32,
    /// Company the customer belongs to, if any.
    pub company_id: Option<i32>,
    /// Human-friendly display name of the customer.
    pub name: String,
    /// Email address stored in lowercase for comparisons.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-form notes (allergies, preferences).
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new customer for a hub.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub hub_id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewCustomer {
    /// Build a new customer payload.
    #[must_use]
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            company_id: None,
            name: name.into(),
            email: None,
            phone: None,
            notes: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach an email address, normalised to lowercase.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_company_id(mut self, company_id: i32) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

/// Full replacement of the editable customer fields.
#[derive(Debug, Clone)]
pub struct UpdateCustomer {
    pub company_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateCustomer {
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        notes: Option<String>,
        company_id: Option<i32>,
    ) -> Self {
        Self {
            company_id,
            name,
            email: email.map(|value| value.to_lowercase()),
            phone,
            notes,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list customers for a hub.
#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub hub_id: i32,
    /// Optional search term matched against name, email and phone.
    pub search: Option<String>,
    /// Optional company filter.
    pub company_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            company_id: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn company_id(mut self, company_id: i32) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
