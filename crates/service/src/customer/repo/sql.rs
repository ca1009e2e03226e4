use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, Statement, TransactionTrait, Value,
};
use tracing::{debug, info};

use crate::customer::dao::CustomerDao;
use crate::customer::domain::{Customer, CustomerUpdate};
use crate::customer::row_mapper::CustomerRowMapper;
use crate::errors::ServiceError;

pub(crate) const SELECT_ALL: &str = "SELECT id, name, email, age FROM customer ORDER BY id";
pub(crate) const SELECT_BY_ID: &str = "SELECT id, name, email, age FROM customer WHERE id = $1";
pub(crate) const INSERT: &str = "INSERT INTO customer(name, email, age) VALUES ($1, $2, $3)";
pub(crate) const COUNT_BY_EMAIL: &str = "SELECT count(id) AS count FROM customer WHERE email = $1";
pub(crate) const COUNT_BY_ID: &str = "SELECT count(id) AS count FROM customer WHERE id = $1";
pub(crate) const DELETE_BY_ID: &str = "DELETE FROM customer WHERE id = $1";
pub(crate) const UPDATE_NAME: &str = "UPDATE customer SET name = $1 WHERE id = $2";
pub(crate) const UPDATE_EMAIL: &str = "UPDATE customer SET email = $1 WHERE id = $2";
pub(crate) const UPDATE_AGE: &str = "UPDATE customer SET age = $1 WHERE id = $2";

/// Customer storage issuing hand-written statements.
pub struct SqlCustomerDao {
    db: DatabaseConnection,
    row_mapper: CustomerRowMapper,
}

impl SqlCustomerDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, row_mapper: CustomerRowMapper }
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    async fn count(&self, sql: &str, value: Value) -> Result<i64, DbErr> {
        let row = self.db.query_one(self.statement(sql, [value])).await?;
        match row {
            Some(r) => r.try_get("", "count"),
            None => Ok(0),
        }
    }

    async fn update_column(
        &self,
        txn: &DatabaseTransaction,
        sql: &str,
        column: &str,
        value: Value,
        id: i32,
    ) -> Result<(), DbErr> {
        let result = txn.execute(self.statement(sql, [value, id.into()])).await?;
        info!(id, column, rows_affected = result.rows_affected(), "update customer column");
        Ok(())
    }
}

#[async_trait]
impl CustomerDao for SqlCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = self.db.query_all(self.statement(SELECT_ALL, Vec::new())).await?;
        let customers = rows
            .iter()
            .map(|r| self.row_mapper.map_row(r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    async fn select_customer_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        let row = self.db.query_one(self.statement(SELECT_BY_ID, [id.into()])).await?;
        Ok(row.as_ref().map(|r| self.row_mapper.map_row(r)).transpose()?)
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), ServiceError> {
        let result = self
            .db
            .execute(self.statement(INSERT, [customer.name.into(), customer.email.into(), customer.age.into()]))
            .await?;
        info!(rows_affected = result.rows_affected(), "insert customer");
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.count(COUNT_BY_EMAIL, email.into()).await? > 0)
    }

    async fn exists_customer_with_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.count(COUNT_BY_ID, id.into()).await? > 0)
    }

    async fn delete_customer_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let result = self.db.execute(self.statement(DELETE_BY_ID, [id.into()])).await?;
        info!(id, rows_affected = result.rows_affected(), "delete customer");
        Ok(())
    }

    /// All column writes commit together; a failing one rolls back the rest.
    async fn update_customer(&self, update: CustomerUpdate) -> Result<(), ServiceError> {
        if update.is_empty() {
            return Ok(());
        }
        let CustomerUpdate { id, name, email, age } = update;
        let txn = self.db.begin().await?;
        if let Some(name) = name {
            self.update_column(&txn, UPDATE_NAME, "name", name.into(), id).await?;
        }
        if let Some(age) = age {
            self.update_column(&txn, UPDATE_AGE, "age", age.into(), id).await?;
        }
        if let Some(email) = email {
            self.update_column(&txn, UPDATE_EMAIL, "email", email.into(), id).await?;
        }
        txn.commit().await?;
        debug!(id, "sql update committed");
        Ok(())
    }
}
