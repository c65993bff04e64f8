//! Vehicle handlers
//!
//! List and get are public for the storefront: unauthenticated callers
//! only ever see vehicles flagged `is_public`. Mutations go through the
//! auth middleware and per-role permission checks.

use axum::{
    extract::{Extension, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::api::middleware::{JsonPayload, QueryParams};
use crate::api::pagination::{PageQuery, Pagination};
use crate::api::response::ApiData;
use crate::api::AppState;
use crate::auth::{Action, CurrentUser, Resource};
use crate::error::{AppError, AppResult};
use crate::models::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilter};
use crate::validation::vehicles::{validate_create_vehicle, validate_update_vehicle};

/// List vehicles with filters and pagination
///
/// GET /api/v1/vehicles
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    QueryParams(mut filter): QueryParams<VehicleFilter>,
    QueryParams(page_query): QueryParams<PageQuery>,
) -> AppResult<Json<ApiData<Vec<Vehicle>>>> {
    // This route skips the auth middleware, so identity is resolved here.
    // Anonymous callers are pinned to the public storefront subset.
    if state.auth.current_user(&headers).is_none() {
        filter.is_public = Some(true);
    }

    let page = page_query.page();
    let limit = page_query.limit();

    let result = state.service.list_vehicles(&filter, page, limit).await?;

    Ok(Json(ApiData::paginated(
        result.items,
        Pagination::new(page, limit, result.total),
    )))
}

/// Get a vehicle by ID
///
/// GET /api/v1/vehicles/{id}
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Json<ApiData<Vehicle>>> {
    let vehicle = state.service.get_vehicle(&id).await?;

    // Non-public vehicles do not exist as far as the storefront knows
    if state.auth.current_user(&headers).is_none() && !vehicle.is_public {
        return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
    }

    Ok(Json(ApiData::new(vehicle)))
}

/// Create a vehicle
///
/// POST /api/v1/vehicles
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<(StatusCode, Json<ApiData<Vehicle>>)> {
    state.authorize(&user, Resource::Vehicles, Action::Create)?;

    let report = validate_create_vehicle(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: CreateVehicleRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let vehicle = state.service.create_vehicle(request).await?;
    Ok((StatusCode::CREATED, Json(ApiData::new(vehicle))))
}

/// Update a vehicle
///
/// PUT /api/v1/vehicles/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> AppResult<Json<ApiData<Vehicle>>> {
    state.authorize(&user, Resource::Vehicles, Action::Update)?;

    let report = validate_update_vehicle(&payload);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors));
    }

    let request: UpdateVehicleRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    let vehicle = state.service.update_vehicle(&id, request).await?;
    Ok(Json(ApiData::new(vehicle)))
}

/// Delete a vehicle
///
/// DELETE /api/v1/vehicles/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.authorize(&user, Resource::Vehicles, Action::Delete)?;

    state.service.delete_vehicle(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
