use thiserror::Error;

/// Failures surfaced by the customer service.
///
/// The first three variants are business-rule violations meant to reach the
/// caller unchanged; `Db` covers every infrastructure fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("{0}")]
    DuplicateResource(String),
    #[error("{0}")]
    RequestValidation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn customer_not_found(id: i32) -> Self {
        Self::ResourceNotFound(format!("customer with id {} not found", id))
    }

    pub fn duplicate_email(email: &str) -> Self {
        Self::DuplicateResource(format!("customer with email {} already exists", email))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::ResourceNotFound(_) => 2001,
            ServiceError::DuplicateResource(_) => 2002,
            ServiceError::RequestValidation(_) => 2003,
            ServiceError::Db(_) => 2100,
        }
    }

    /// True for business-rule violations, false for infrastructure faults.
    pub fn is_domain(&self) -> bool {
        !matches!(self, ServiceError::Db(_))
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}
