use sea_orm::{DbErr, QueryResult};

use super::domain::Customer;

/// Maps one `customer` row, read by column name, into a [`Customer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerRowMapper;

impl CustomerRowMapper {
    pub fn map_row(&self, row: &QueryResult) -> Result<Customer, DbErr> {
        let id: i32 = row.try_get("", "id")?;
        let age: i32 = row.try_get("", "age")?;
        let name: String = row.try_get("", "name")?;
        let email: String = row.try_get("", "email")?;
        Ok(Customer { id: Some(id), name, email, age })
    }
}
