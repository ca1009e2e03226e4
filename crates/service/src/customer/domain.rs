use serde::{Deserialize, Serialize};

/// A registered customer. `id` is `None` until storage assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl Customer {
    /// A customer that has not been persisted yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self { id: None, name: name.into(), email: email.into(), age }
    }

    pub fn with_id(id: i32, name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self { id: Some(id), name: name.into(), email: email.into(), age }
    }
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: Some(m.id), name: m.name, email: m.email, age: m.age }
    }
}

/// Registration input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<CustomerRegistrationRequest> for Customer {
    fn from(r: CustomerRegistrationRequest) -> Self {
        Customer::new(r.name, r.email, r.age)
    }
}

/// Update input. `None` (or a missing JSON key) leaves the field unchanged;
/// `Some("")` is a real value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

/// Partial write handed to the storage port: only `Some` fields are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl CustomerUpdate {
    pub fn new(id: i32) -> Self {
        Self { id, name: None, email: None, age: None }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    /// New record with the present fields laid over `base`.
    pub fn apply_to(&self, base: &Customer) -> Customer {
        Customer {
            id: Some(self.id),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            email: self.email.clone().unwrap_or_else(|| base.email.clone()),
            age: self.age.unwrap_or(base.age),
        }
    }
}
