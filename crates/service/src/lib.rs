//! Service layer for the customer resource.
//! - `customer::service::CustomerService` enforces the business rules.
//! - `customer::dao::CustomerDao` is the storage port; `customer::repo` holds
//!   the direct-SQL and SeaORM adapters.

pub mod errors;
pub mod customer;
#[cfg(test)]
pub mod test_support;
