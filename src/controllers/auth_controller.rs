use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, PrincipalResponse, RegisterRequest};
use crate::dto::common_dto::ApiResponse;
use crate::repositories::{CarpoolStore, PrincipalStore};
use crate::state::AppState;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    store: Arc<dyn CarpoolStore>,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            jwt: JwtConfig::from(&state.config),
        }
    }

    /// Registrar un principal sin privilegios de staff
    pub async fn register(&self, request: RegisterRequest) -> Result<ApiResponse<PrincipalResponse>, AppError> {
        request.validate()?;
        let username = request.username.trim();

        if self.store.find_credentials(username).await?.is_some() {
            return Err(conflict_error("User", "username", username));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let principal = self
            .store
            .create_principal(username, &password_hash, false)
            .await?;
        info!("👤 Usuario '{}' registrado (id {})", principal.username, principal.id);

        Ok(ApiResponse::success_with_message(
            principal.into(),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let (principal, password_hash) = self
            .store
            .find_credentials(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Un hash que bcrypt no reconoce nunca verifica
        let valid = verify(&request.password, &password_hash).unwrap_or(false);
        if !valid || !principal.is_active {
            warn!("🔒 Login rechazado para '{}'", principal.username);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(&principal, &self.jwt)?;
        info!("🔑 Login de '{}'", principal.username);

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            principal: principal.into(),
        })
    }
}
