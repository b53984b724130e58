use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_profile_controller::UserProfileController;
use crate::dto::common_dto::{ApiResponse, VoidRequest};
use crate::dto::user_profile_dto::{CreateUserProfileRequest, UpdateUserProfileRequest};
use crate::middleware::auth::{AuthenticatedPrincipal, MaybePrincipal};
use crate::models::UserProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_profile_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route(
            "/:uuid",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/:uuid/restore", post(restore_profile))
        .route("/:uuid/purge", post(purge_profile))
        .route("/:uuid/deactivate", post(deactivate_profile))
        .route("/:uuid/activate", post(activate_profile))
}

async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    let controller = UserProfileController::new(&state);
    let profiles = controller.list().await?;
    Ok(Json(ApiResponse::success(profiles)))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let profile = controller.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn create_profile(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<CreateUserProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.create(request, principal.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    MaybePrincipal(principal): MaybePrincipal,
    Json(request): Json<UpdateUserProfileRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.update(uuid, request, principal.as_ref()).await?;
    Ok(Json(response))
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: Bytes,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let request = VoidRequest::from_body(&body)?;

    let controller = UserProfileController::new(&state);
    let response = controller
        .delete(uuid, request.reason.as_deref(), &principal)
        .await?;
    Ok(Json(response))
}

async fn restore_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(_principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.restore(uuid).await?;
    Ok(Json(response))
}

async fn purge_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.purge(uuid, &principal).await?;
    Ok(Json(response))
}

async fn deactivate_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.deactivate(uuid, &principal).await?;
    Ok(Json(response))
}

async fn activate_profile(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserProfileController::new(&state);
    let response = controller.activate(uuid, &principal).await?;
    Ok(Json(response))
}
