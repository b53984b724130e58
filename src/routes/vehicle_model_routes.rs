use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_model_controller::{ModelDeletion, VehicleModelController};
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_model_dto::{
    CreateVehicleModelRequest, UpdateVehicleModelRequest, VehicleModelResponse,
};
use crate::middleware::auth::{AuthenticatedPrincipal, MaybePrincipal};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_model_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicle_models).post(create_vehicle_model))
        .route(
            "/:uuid",
            get(get_vehicle_model)
                .put(update_vehicle_model)
                .delete(delete_vehicle_model),
        )
        .route("/:uuid/restore", post(restore_vehicle_model))
        .route("/:uuid/purge", post(purge_vehicle_model))
}

async fn list_vehicle_models(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleModelResponse>>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let models = controller.list().await?;
    Ok(Json(ApiResponse::success(models)))
}

async fn get_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let model = controller.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(model)))
}

async fn create_vehicle_model(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<CreateVehicleModelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleModelResponse>>), AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.create(request, principal.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<UpdateVehicleModelRequest>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.update(uuid, request, principal.as_ref()).await?;
    Ok(Json(response))
}

async fn delete_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<Option<VehicleModelResponse>>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = match controller.delete(uuid, &principal).await? {
        ModelDeletion::Voided(model) => ApiResponse::success_with_message(
            Some(model.into()),
            "Modelo de vehículo anulado: tiene vehículos asociados".to_string(),
        ),
        ModelDeletion::Deleted => ApiResponse::success_with_message(
            None,
            "Modelo de vehículo eliminado exitosamente".to_string(),
        ),
    };
    Ok(Json(response))
}

async fn restore_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(_principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.restore(uuid).await?;
    Ok(Json(response))
}

async fn purge_vehicle_model(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.purge(uuid, &principal).await?;
    Ok(Json(response))
}
