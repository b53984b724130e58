use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::{ApiResponse, VoidRequest};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::middleware::auth::{AuthenticatedPrincipal, MaybePrincipal};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:uuid",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:uuid/restore", post(restore_vehicle))
        .route("/:uuid/purge", post(purge_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicles = controller.list().await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicle = controller.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn create_vehicle(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request, principal.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(uuid, request, principal.as_ref()).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: Bytes,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let request = VoidRequest::from_body(&body)?;

    let controller = VehicleController::new(&state);
    let response = controller
        .delete(uuid, request.reason.as_deref(), &principal)
        .await?;
    Ok(Json(response))
}

async fn restore_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(_principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.restore(uuid).await?;
    Ok(Json(response))
}

async fn purge_vehicle(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.purge(uuid, &principal).await?;
    Ok(Json(response))
}
