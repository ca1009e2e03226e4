use async_trait::async_trait;

use super::domain::{Customer, CustomerUpdate};
use crate::errors::ServiceError;

/// Storage port for customers. Implementations must behave identically as
/// seen through `CustomerService`; connection safety is their concern.
#[async_trait]
pub trait CustomerDao: Send + Sync {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError>;
    /// `Ok(None)` when no row matches.
    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError>;
    /// Persists a new row; storage assigns the id and any id on `customer` is ignored.
    async fn insert_customer(&self, customer: Customer) -> Result<(), ServiceError>;
    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError>;
    /// Idempotent: deleting a missing id is not an error.
    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError>;
    /// Writes each `Some` field of `update`; `None` fields stay as stored.
    /// A missing id is a no-op.
    async fn update_customer(&self, update: CustomerUpdate) -> Result<(), ServiceError>;
}

/// In-memory implementation recording every call, for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    /// One recorded port invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum DaoCall {
        SelectAll,
        SelectById(i32),
        Insert(Customer),
        ExistsWithEmail(String),
        ExistsWithId(i32),
        DeleteById(i32),
        Update(CustomerUpdate),
    }

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Customer>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemoryCustomerDao {
        state: Mutex<State>,
        calls: Mutex<Vec<DaoCall>>,
    }

    impl InMemoryCustomerDao {
        /// Seed with existing rows; customers without an id get the next free one.
        pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
            let dao = Self::default();
            {
                let mut state = dao.state();
                for mut c in customers {
                    let id = c.id.unwrap_or(state.last_id + 1);
                    c.id = Some(id);
                    state.last_id = state.last_id.max(id);
                    state.rows.insert(id, c);
                }
            }
            dao
        }

        /// Every call received so far, oldest first.
        pub fn calls(&self) -> Vec<DaoCall> {
            self.call_log().clone()
        }

        pub fn count_calls(&self, pred: impl Fn(&DaoCall) -> bool) -> usize {
            self.call_log().iter().filter(|c| pred(c)).count()
        }

        pub fn inserts(&self) -> Vec<Customer> {
            self.call_log()
                .iter()
                .filter_map(|c| match c { DaoCall::Insert(c) => Some(c.clone()), _ => None })
                .collect()
        }

        pub fn updates(&self) -> Vec<CustomerUpdate> {
            self.call_log()
                .iter()
                .filter_map(|c| match c { DaoCall::Update(u) => Some(u.clone()), _ => None })
                .collect()
        }

        /// Stored row, bypassing the call log.
        pub fn stored(&self, id: i32) -> Option<Customer> {
            self.state().rows.get(&id).cloned()
        }

        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn call_log(&self) -> MutexGuard<'_, Vec<DaoCall>> {
            self.calls.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn record(&self, call: DaoCall) {
            self.call_log().push(call);
        }
    }

    #[async_trait]
    impl CustomerDao for InMemoryCustomerDao {
        async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
            self.record(DaoCall::SelectAll);
            Ok(self.state().rows.values().cloned().collect())
        }

        async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
            self.record(DaoCall::SelectById(id));
            Ok(self.state().rows.get(&id).cloned())
        }

        async fn insert_customer(&self, customer: Customer) -> Result<(), ServiceError> {
            self.record(DaoCall::Insert(customer.clone()));
            let mut state = self.state();
            // behaves like the unique index on email
            if state.rows.values().any(|c| c.email == customer.email) {
                return Err(ServiceError::Db(format!(
                    "duplicate key value violates unique constraint \"customer_email_unique\" ({})",
                    customer.email
                )));
            }
            state.last_id += 1;
            let id = state.last_id;
            state.rows.insert(id, Customer { id: Some(id), ..customer });
            Ok(())
        }

        async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
            self.record(DaoCall::ExistsWithEmail(email.to_string()));
            Ok(self.state().rows.values().any(|c| c.email == email))
        }

        async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
            self.record(DaoCall::ExistsWithId(id));
            Ok(self.state().rows.contains_key(&id))
        }

        async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
            self.record(DaoCall::DeleteById(id));
            self.state().rows.remove(&id);
            Ok(())
        }

        async fn update_customer(&self, update: CustomerUpdate) -> Result<(), ServiceError> {
            self.record(DaoCall::Update(update.clone()));
            let mut state = self.state();
            if let Some(email) = &update.email {
                if state.rows.values().any(|c| c.email == *email && c.id != Some(update.id)) {
                    return Err(ServiceError::Db(format!(
                        "duplicate key value violates unique constraint \"customer_email_unique\" ({})",
                        email
                    )));
                }
            }
            if let Some(row) = state.rows.get_mut(&update.id) {
                *row = update.apply_to(row);
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn seeded() -> InMemoryCustomerDao {
            InMemoryCustomerDao::with_customers([
                Customer::with_id(1, "A", "a@x.com", 30),
                Customer::with_id(2, "B", "b@x.com", 40),
            ])
        }

        #[tokio::test]
        async fn insert_with_taken_email_is_a_db_error() {
            let dao = seeded();

            let err = dao.insert_customer(Customer::new("C", "a@x.com", 20)).await.unwrap_err();

            assert!(matches!(err, ServiceError::Db(_)));
            assert_eq!(dao.stored(3), None);
        }

        #[tokio::test]
        async fn update_to_taken_email_is_a_db_error() {
            let dao = seeded();

            let err = dao
                .update_customer(CustomerUpdate::new(1).name("Z").email("b@x.com"))
                .await
                .unwrap_err();

            assert!(matches!(err, ServiceError::Db(_)));
            assert_eq!(dao.stored(1), Some(Customer::with_id(1, "A", "a@x.com", 30)));
        }

        #[tokio::test]
        async fn update_keeping_own_email_is_allowed() -> Result<(), ServiceError> {
            let dao = seeded();

            dao.update_customer(CustomerUpdate::new(1).email("a@x.com").age(31)).await?;

            assert_eq!(dao.stored(1), Some(Customer::with_id(1, "A", "a@x.com", 31)));
            Ok(())
        }
    }
}
