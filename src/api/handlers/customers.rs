//! Customer handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::api::middleware::{JsonPayload, QueryParams};
use crate::api::pagination::{PageQuery, Pagination};
use crate::api::response::ApiData;
use crate::api::AppState;
use crate::auth::{Action, CurrentUser, Resource};
use crate::error::{AppError, AppResult};
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::validation::customers::{validate_create_customer, validate_update_customer};

/// List customers with pagination
///
/// GET /api/v1/customers
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    QueryParams(page_query): QueryParams<PageQuery>,
) -> AppResult<Json<ApiData<Vec<Customer>>>> {
    state.authorize(&user, Resource::Customers, Action::Read)?;

    let page = page_query.page();
    let limit = page_query.limit();

    let result = state.service.list_customers(page, limit).await?;

    Ok(Json(ApiData::paginated(
        result.items,
        Pagination::new(page, limit, result.total),
    )))
}

/// Create a customer
///
/// POST /api/v1/customers
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<(StatusCode, Json<ApiData<Customer>>)> {
    state.authorize(&user, Resource::Customers, Action::Create)?;

    let report = validate_create_customer(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: CreateCustomerRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let customer = state.service.create_customer(request).await?;
    Ok((StatusCode::CREATED, Json(ApiData::new(customer))))
}

/// Get a customer by ID
///
/// GET /api/v1/customers/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiData<Customer>>> {
    state.authorize(&user, Resource::Customers, Action::Read)?;

    let customer = state.service.get_customer(&id).await?;
    Ok(Json(ApiData::new(customer)))
}

/// Update a customer
///
/// PUT /api/v1/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<Json<ApiData<Customer>>> {
    state.authorize(&user, Resource::Customers, Action::Update)?;

    let report = validate_update_customer(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: UpdateCustomerRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let customer = state.service.update_customer(&id, request).await?;
    Ok(Json(ApiData::new(customer)))
}

/// Delete a customer
///
/// DELETE /api/v1/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.authorize(&user, Resource::Customers, Action::Delete)?;

    state.service.delete_customer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
