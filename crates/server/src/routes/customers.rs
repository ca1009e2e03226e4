use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::info;

use models::customer::{validate_age, validate_email, validate_name};
use service::customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "Storage Failure")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let all = state.customers.get_all_customers().await?;
    info!(count = all.len(), "list customers");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.get_customer(id).await?))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::CustomerRegistrationDoc,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email Already Taken")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CustomerRegistrationRequest>,
) -> Result<StatusCode, JsonApiError> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_age(input.age)?;
    state.customers.add_customer(input).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.customers.delete_customer_by_id(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No Data Change / Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email Already Taken")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CustomerUpdateRequest>,
) -> Result<StatusCode, JsonApiError> {
    if let Some(name) = &input.name { validate_name(name)?; }
    if let Some(email) = &input.email { validate_email(email)?; }
    if let Some(age) = input.age { validate_age(age)?; }
    state.customers.update_customer(id, input).await?;
    Ok(StatusCode::OK)
}
