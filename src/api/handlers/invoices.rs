//! Invoice handlers

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
use crate::models::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest};
use crate::validation::invoices::{validate_create_invoice, validate_update_invoice};

/// List invoices with pagination
///
/// GET /api/v1/invoices
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    QueryParams(page_query): QueryParams<PageQuery>,
) -> AppResult<Json<ApiData<Vec<Invoice>>>> {
    state.authorize(&user, Resource::Invoices, Action::Read)?;

    let page = page_query.page();
    let limit = page_query.limit();

    let result = state.service.list_invoices(page, limit).await?;

    Ok(Json(ApiData::paginated(
        result.items,
        Pagination::new(page, limit, result.total),
    )))
}

/// Create an invoice
///
/// POST /api/v1/invoices
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<(StatusCode, Json<ApiData<Invoice>>)> {
    state.authorize(&user, Resource::Invoices, Action::Create)?;

    let report = validate_create_invoice(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: CreateInvoiceRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let invoice = state.service.create_invoice(request).await?;
    Ok((StatusCode::CREATED, Json(ApiData::new(invoice))))
}

/// Get an invoice by ID
///
/// GET /api/v1/invoices/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiData<Invoice>>> {
    state.authorize(&user, Resource::Invoices, Action::Read)?;

    let invoice = state.service.get_invoice(&id).await?;
    Ok(Json(ApiData::new(invoice)))
}

/// Update an invoice
///
/// PUT /api/v1/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<Json<ApiData<Invoice>>> {
    state.authorize(&user, Resource::Invoices, Action::Update)?;

    let report = validate_update_invoice(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: UpdateInvoiceRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let invoice = state.service.update_invoice(&id, request).await?;
    Ok(Json(ApiData::new(invoice)))
}

/// Delete an invoice
///
/// DELETE /api/v1/invoices/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.authorize(&user, Resource::Invoices, Action::Delete)?;

    state.service.delete_invoice(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
