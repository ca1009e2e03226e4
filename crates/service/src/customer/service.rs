use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::dao::CustomerDao;
use super::domain::{Customer, CustomerRegistrationRequest, CustomerUpdate, CustomerUpdateRequest};
use crate::errors::ServiceError;

/// Application service encapsulating customer business rules.
/// The storage adapter is fixed at construction.
pub struct CustomerService<D: CustomerDao + ?Sized> {
    dao: Arc<D>,
}

impl<D: CustomerDao + ?Sized> Clone for CustomerService<D> {
    fn clone(&self) -> Self { Self { dao: Arc::clone(&self.dao) } }
}

impl<D: CustomerDao + ?Sized> CustomerService<D> {
    pub fn new(dao: Arc<D>) -> Self { Self { dao } }

    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        self.dao.select_all_customers().await
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<Customer, ServiceError> {
        self.dao
            .select_customer_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::customer_not_found(id))
    }

    /// Register a new customer after checking the email is free.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, CustomerRegistrationRequest, dao::mock::InMemoryCustomerDao};
    /// use std::sync::Arc;
    /// let dao = Arc::new(InMemoryCustomerDao::default());
    /// let svc = CustomerService::new(dao.clone());
    /// let req = CustomerRegistrationRequest { name: "Ada".into(), email: "ada@example.com".into(), age: 36 };
    /// tokio_test::block_on(svc.add_customer(req.clone())).unwrap();
    /// assert!(tokio_test::block_on(svc.add_customer(req)).is_err());
    /// assert_eq!(dao.inserts().len(), 1);
    /// ```
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn add_customer(&self, request: CustomerRegistrationRequest) -> Result<(), ServiceError> {
        self.email_check(&request.email).await?;
        self.dao.insert_customer(Customer::from(request)).await?;
        info!("customer_registered");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.dao.exists_customer_with_id(id).await? {
            return Err(ServiceError::customer_not_found(id));
        }
        self.dao.delete_customer_by_id(id).await?;
        info!("customer_deleted");
        Ok(())
    }

    /// Apply the fields of `request` that differ from the stored customer.
    ///
    /// Fails with `RequestValidation` when nothing would change, and with
    /// `DuplicateResource` when a changed email is already taken. Returns the
    /// merged customer.
    #[instrument(skip(self, request))]
    pub async fn update_customer(&self, id: i32, request: CustomerUpdateRequest) -> Result<Customer, ServiceError> {
        let current = self.get_customer(id).await?;
        let mut changes = CustomerUpdate::new(id);

        if let Some(email) = request.email.filter(|e| *e != current.email) {
            self.email_check(&email).await?;
            changes.email = Some(email);
        }
        if let Some(name) = request.name.filter(|n| *n != current.name) {
            changes.name = Some(name);
        }
        if let Some(age) = request.age.filter(|a| *a != current.age) {
            changes.age = Some(age);
        }
        if changes.is_empty() {
            debug!("update request matches stored customer");
            return Err(ServiceError::RequestValidation("no data change found".into()));
        }

        let merged = changes.apply_to(&current);
        info!(
            name_changed = changes.name.is_some(),
            email_changed = changes.email.is_some(),
            age_changed = changes.age.is_some(),
            "customer_updated"
        );
        self.dao.update_customer(changes).await?;
        Ok(merged)
    }

    async fn email_check(&self, email: &str) -> Result<(), ServiceError> {
        if self.dao.exists_customer_with_email(email).await? {
            return Err(ServiceError::duplicate_email(email));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::dao::mock::{DaoCall, InMemoryCustomerDao};

    fn service_with(customers: Vec<Customer>) -> (Arc<InMemoryCustomerDao>, CustomerService<InMemoryCustomerDao>) {
        let dao = Arc::new(InMemoryCustomerDao::with_customers(customers));
        (dao.clone(), CustomerService::new(dao))
    }

    fn stored() -> Customer {
        Customer::with_id(1, "A", "a@x.com", 30)
    }

    fn update(name: Option<&str>, email: Option<&str>, age: Option<i32>) -> CustomerUpdateRequest {
        CustomerUpdateRequest { name: name.map(Into::into), email: email.map(Into::into), age }
    }

    #[tokio::test]
    async fn get_all_customers_delegates() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored(), Customer::with_id(2, "B", "b@x.com", 40)]);

        let all = svc.get_all_customers().await?;

        assert_eq!(all.len(), 2);
        assert_eq!(dao.calls(), vec![DaoCall::SelectAll]);
        Ok(())
    }

    #[tokio::test]
    async fn can_get_customer() -> anyhow::Result<()> {
        let (_, svc) = service_with(vec![stored()]);
        assert_eq!(svc.get_customer(1).await?, stored());
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_customer_is_not_found() {
        let (_, svc) = service_with(vec![]);

        let err = svc.get_customer(1).await.unwrap_err();

        assert_eq!(err, ServiceError::ResourceNotFound("customer with id 1 not found".into()));
    }

    #[tokio::test]
    async fn add_customer_inserts_once_without_id() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![]);
        let request = CustomerRegistrationRequest { name: "test".into(), email: "test@gmail.com".into(), age: 55 };

        svc.add_customer(request).await?;

        assert_eq!(dao.inserts(), vec![Customer::new("test", "test@gmail.com", 55)]);
        assert_eq!(dao.stored(1), Some(Customer::with_id(1, "test", "test@gmail.com", 55)));
        Ok(())
    }

    #[tokio::test]
    async fn add_customer_with_taken_email_never_inserts() {
        let (dao, svc) = service_with(vec![stored()]);
        let request = CustomerRegistrationRequest { name: "other".into(), email: "a@x.com".into(), age: 22 };

        let err = svc.add_customer(request).await.unwrap_err();

        assert_eq!(err, ServiceError::DuplicateResource("customer with email a@x.com already exists".into()));
        assert!(dao.inserts().is_empty());
    }

    #[tokio::test]
    async fn delete_existing_customer() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        svc.delete_customer_by_id(1).await?;

        assert_eq!(dao.calls(), vec![DaoCall::ExistsWithId(1), DaoCall::DeleteById(1)]);
        assert_eq!(dao.stored(1), None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_customer_never_calls_delete() {
        let (dao, svc) = service_with(vec![]);

        let err = svc.delete_customer_by_id(1).await.unwrap_err();

        assert_eq!(err, ServiceError::customer_not_found(1));
        assert_eq!(dao.count_calls(|c| matches!(c, DaoCall::DeleteById(_))), 0);
    }

    #[tokio::test]
    async fn deleting_twice_fails_the_second_time() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        svc.delete_customer_by_id(1).await?;
        let second = svc.delete_customer_by_id(1).await;

        assert!(matches!(second, Err(ServiceError::ResourceNotFound(_))));
        assert_eq!(dao.count_calls(|c| matches!(c, DaoCall::DeleteById(_))), 1);
        Ok(())
    }

    #[tokio::test]
    async fn can_update_all_properties() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        let merged = svc.update_customer(1, update(Some("B"), Some("b@x.com"), Some(19))).await?;

        assert_eq!(merged, Customer::with_id(1, "B", "b@x.com", 19));
        assert_eq!(dao.updates(), vec![CustomerUpdate::new(1).name("B").email("b@x.com").age(19)]);
        assert_eq!(dao.stored(1), Some(merged));
        Ok(())
    }

    #[tokio::test]
    async fn update_only_name() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        svc.update_customer(1, update(Some("B"), None, None)).await?;

        assert_eq!(dao.updates(), vec![CustomerUpdate::new(1).name("B")]);
        assert_eq!(dao.count_calls(|c| matches!(c, DaoCall::ExistsWithEmail(_))), 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_only_age() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        svc.update_customer(1, update(None, None, Some(31))).await?;

        assert_eq!(dao.updates(), vec![CustomerUpdate::new(1).age(31)]);
        Ok(())
    }

    #[tokio::test]
    async fn partial_change_detects_only_the_email() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        let merged = svc.update_customer(1, update(Some("A"), Some("b@x.com"), None)).await?;

        assert_eq!(dao.updates(), vec![CustomerUpdate::new(1).email("b@x.com")]);
        assert_eq!(merged, Customer::with_id(1, "A", "b@x.com", 30));
        assert_eq!(dao.stored(1), Some(Customer::with_id(1, "A", "b@x.com", 30)));
        Ok(())
    }

    #[tokio::test]
    async fn partial_change_to_taken_email_is_duplicate() {
        let (dao, svc) = service_with(vec![stored(), Customer::with_id(2, "B", "b@x.com", 40)]);

        let err = svc.update_customer(1, update(Some("A"), Some("b@x.com"), None)).await.unwrap_err();

        assert_eq!(err, ServiceError::duplicate_email("b@x.com"));
        assert!(dao.updates().is_empty());
    }

    #[tokio::test]
    async fn unchanged_email_skips_duplicate_check() -> anyhow::Result<()> {
        let (dao, svc) = service_with(vec![stored()]);

        svc.update_customer(1, update(Some("B"), Some("a@x.com"), None)).await?;

        assert_eq!(dao.count_calls(|c| matches!(c, DaoCall::ExistsWithEmail(_))), 0);
        assert_eq!(dao.updates(), vec![CustomerUpdate::new(1).name("B")]);
        Ok(())
    }

    #[tokio::test]
    async fn update_with_identical_values_is_rejected() {
        let (dao, svc) = service_with(vec![stored()]);

        let err = svc.update_customer(1, update(Some("A"), Some("a@x.com"), Some(30))).await.unwrap_err();

        assert_eq!(err, ServiceError::RequestValidation("no data change found".into()));
        assert!(dao.updates().is_empty());
    }

    #[tokio::test]
    async fn update_with_nothing_present_is_rejected() {
        let (dao, svc) = service_with(vec![stored()]);

        let err = svc.update_customer(1, CustomerUpdateRequest::default()).await.unwrap_err();

        assert!(matches!(err, ServiceError::RequestValidation(_)));
        assert!(dao.updates().is_empty());
    }

    #[tokio::test]
    async fn update_missing_customer_is_not_found() {
        let (dao, svc) = service_with(vec![]);

        let err = svc.update_customer(9, update(Some("B"), None, None)).await.unwrap_err();

        assert_eq!(err, ServiceError::customer_not_found(9));
        assert!(dao.updates().is_empty());
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() -> anyhow::Result<()> {
        let dao: Arc<dyn CustomerDao> = Arc::new(InMemoryCustomerDao::default());
        let svc = CustomerService::new(dao);

        svc.add_customer(CustomerRegistrationRequest { name: "n".into(), email: "n@x.com".into(), age: 18 }).await?;

        assert_eq!(svc.get_all_customers().await?.len(), 1);
        Ok(())
    }
}
