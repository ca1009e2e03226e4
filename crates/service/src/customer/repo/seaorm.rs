use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};

use models::customer;

use crate::customer::dao::CustomerDao;
use crate::customer::domain::{Customer, CustomerUpdate};
use crate::errors::ServiceError;

/// Customer storage going through the SeaORM `customer` entity.
pub struct SeaOrmCustomerDao {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerDao {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CustomerDao for SeaOrmCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let found = customer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Customer::from))
    }

    async fn insert_customer(&self, c: Customer) -> Result<(), ServiceError> {
        let am = customer::ActiveModel {
            name: Set(c.name),
            email: Set(c.email),
            age: Set(c.age),
            ..Default::default()
        };
        let saved = am.insert(&self.db).await?;
        info!(id = saved.id, "insert customer");
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
        let n = customer::Entity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        info!(id, rows_affected = res.rows_affected, "delete customer");
        Ok(())
    }

    /// Rehydrates the stored row and saves it with the present fields set;
    /// SeaORM only writes columns that were `Set`.
    async fn update_customer(&self, update: CustomerUpdate) -> Result<(), ServiceError> {
        if update.is_empty() {
            return Ok(());
        }
        let Some(found) = customer::Entity::find_by_id(update.id).one(&self.db).await? else {
            warn!(id = update.id, "update of missing customer ignored");
            return Ok(());
        };
        let mut am: customer::ActiveModel = found.into();
        if let Some(name) = update.name {
            am.name = Set(name);
        }
        if let Some(email) = update.email {
            am.email = Set(email);
        }
        if let Some(age) = update.age {
            am.age = Set(age);
        }
        match am.update(&self.db).await {
            Ok(saved) => {
                info!(id = saved.id, "update customer");
                Ok(())
            }
            // deleted after the lookup
            Err(DbErr::RecordNotUpdated) => {
                warn!(id = update.id, "update of missing customer ignored");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
