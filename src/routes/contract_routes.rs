use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::common_dto::{ApiResponse, VoidRequest};
use crate::dto::contract_dto::{ContractResponse, CreateContractRequest, UpdateContractRequest};
use crate::middleware::auth::{AuthenticatedPrincipal, MaybePrincipal};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route(
            "/:uuid",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
        .route("/:uuid/restore", post(restore_contract))
        .route("/:uuid/purge", post(purge_contract))
}

async fn list_contracts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContractResponse>>>, AppError> {
    let controller = ContractController::new(&state);
    let contracts = controller.list().await?;
    Ok(Json(ApiResponse::success(contracts)))
}

async fn get_contract(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(&state);
    let contract = controller.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(contract)))
}

async fn create_contract(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<CreateContractRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContractResponse>>), AppError> {
    let controller = ContractController::new(&state);
    let response = controller.create(request, principal.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_contract(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(&state);
    let response = controller.update(uuid, request, principal.as_ref()).await?;
    Ok(Json(response))
}

async fn delete_contract(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: Bytes,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let request = VoidRequest::from_body(&body)?;

    let controller = ContractController::new(&state);
    let response = controller
        .delete(uuid, request.reason.as_deref(), &principal)
        .await?;
    Ok(Json(response))
}

async fn restore_contract(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(_principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(&state);
    let response = controller.restore(uuid).await?;
    Ok(Json(response))
}

async fn purge_contract(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(&state);
    let response = controller.purge(uuid, &principal).await?;
    Ok(Json(response))
}
