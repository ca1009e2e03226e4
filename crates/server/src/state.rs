use std::sync::Arc;

use service::customer::{CustomerDao, CustomerService};

/// Shared handler state: the customer service wired to one storage adapter.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService<dyn CustomerDao>,
}

impl AppState {
    pub fn new(customers: CustomerService<dyn CustomerDao>) -> Self { Self { customers } }

    pub fn from_dao(dao: Arc<dyn CustomerDao>) -> Self {
        Self::new(CustomerService::new(dao))
    }
}
