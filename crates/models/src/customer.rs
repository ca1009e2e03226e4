use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.trim().is_empty() {
        return Err(ModelError::Validation("email required".into()));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), ModelError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ModelError::Validation(format!("age must be between {MIN_AGE} and {MAX_AGE}")));
    }
    Ok(())
}

/// Insert a customer row and return it with the storage-assigned id.
pub async fn create(db: &DatabaseConnection, name: &str, email: &str, age: i32) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        age: Set(age),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
