//! Customer resource: domain types, storage port, adapters and service.

pub mod domain;
pub mod dao;
pub mod row_mapper;
pub mod repo;
pub mod service;

use std::sync::Arc;

use configs::DaoKind;
use sea_orm::DatabaseConnection;
use tracing::info;

pub use dao::CustomerDao;
pub use domain::{Customer, CustomerRegistrationRequest, CustomerUpdate, CustomerUpdateRequest};
pub use service::CustomerService;

/// Build the storage adapter selected by configuration.
pub fn build_dao(kind: DaoKind, db: DatabaseConnection) -> Arc<dyn CustomerDao> {
    info!(dao = %kind, "customer storage adapter selected");
    match kind {
        DaoKind::Sql => Arc::new(repo::sql::SqlCustomerDao::new(db)),
        DaoKind::SeaOrm => Arc::new(repo::seaorm::SeaOrmCustomerDao::new(db)),
    }
}

/// Service wired to the configured adapter.
pub fn build_service(kind: DaoKind, db: DatabaseConnection) -> CustomerService<dyn CustomerDao> {
    CustomerService::new(build_dao(kind, db))
}
