use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::dto::admin_dto::{
    AdminUserProfileChange, AdminUserProfileCreate, AdminVehicleChange, AdminVehicleModelChange,
    AdminVehicleModelCreate,
};
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_profile_dto::UserProfileFilter;
use crate::dto::vehicle_dto::{VehicleFilter, VehicleResponse};
use crate::dto::vehicle_model_dto::{VehicleModelFilter, VehicleModelResponse};
use crate::middleware::auth::AuthenticatedPrincipal;
use crate::models::UserProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Consola de administración: solo staff
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle-models", get(list_vehicle_models).post(add_vehicle_model))
        .route(
            "/vehicle-models/:uuid",
            put(change_vehicle_model).delete(delete_vehicle_model),
        )
        .route("/vehicles", get(list_vehicles).post(add_vehicle))
        .route("/vehicles/:uuid", put(change_vehicle).delete(delete_vehicle))
        .route("/user-profiles", get(list_user_profiles).post(add_user_profile))
        .route(
            "/user-profiles/:uuid",
            put(change_user_profile).delete(delete_user_profile),
        )
}

// ---- Modelos de vehículo ----

async fn list_vehicle_models(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Query(filter): Query<VehicleModelFilter>,
) -> Result<Json<ApiResponse<Vec<VehicleModelResponse>>>, AppError> {
    let controller = AdminController::new(&state);
    let models = controller.list_vehicle_models(&principal, &filter).await?;
    Ok(Json(ApiResponse::success(models)))
}

async fn add_vehicle_model(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Json(form): Json<AdminVehicleModelCreate>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleModelResponse>>), AppError> {
    let controller = AdminController::new(&state);
    let model = controller.add_vehicle_model(&principal, form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(model))))
}

async fn change_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Json(form): Json<AdminVehicleModelChange>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let model = controller.change_vehicle_model(&principal, uuid, form).await?;
    Ok(Json(ApiResponse::success(model)))
}

async fn delete_vehicle_model(
    State(state): State<AppState>,
    Path(_uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<StatusCode, AppError> {
    AdminController::new(&state).delete(&principal, "VehicleModel")?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Vehículos ----

async fn list_vehicles(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let controller = AdminController::new(&state);
    let vehicles = controller.list_vehicles(&principal, &filter).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn add_vehicle(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let vehicle = controller.add_vehicle(&principal).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn change_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Json(form): Json<AdminVehicleChange>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let vehicle = controller.change_vehicle(&principal, uuid, form).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(_uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<StatusCode, AppError> {
    AdminController::new(&state).delete(&principal, "Vehicle")?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Perfiles ----

async fn list_user_profiles(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Query(filter): Query<UserProfileFilter>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    let controller = AdminController::new(&state);
    let profiles = controller.list_user_profiles(&principal, &filter).await?;
    Ok(Json(ApiResponse::success(profiles)))
}

async fn add_user_profile(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Json(form): Json<AdminUserProfileCreate>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    let controller = AdminController::new(&state);
    let profile = controller.add_user_profile(&principal, form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(profile))))
}

async fn change_user_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Json(form): Json<AdminUserProfileChange>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = AdminController::new(&state);
    let profile = controller.change_user_profile(&principal, uuid, form).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn delete_user_profile(
    State(state): State<AppState>,
    Path(_uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<StatusCode, AppError> {
    AdminController::new(&state).delete(&principal, "UserProfile")?;
    Ok(StatusCode::NO_CONTENT)
}
