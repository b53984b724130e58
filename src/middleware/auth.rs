//! Autenticación JWT
//!
//! Extractores que convierten el header `Authorization: Bearer <token>` en
//! el principal que ejecuta la request.
//!
//! - [`AuthenticatedPrincipal`]: el token es obligatorio.
//! - [`MaybePrincipal`]: sin token la request es anónima; un token inválido
//!   sigue siendo un error.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    models::Principal,
    repositories::PrincipalStore,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, validate_token, JwtConfig},
    },
};

/// Principal autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Principal opcional: `None` cuando la request no trae token
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = authorization_header(parts)?
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        let principal = resolve_principal(auth_header, state).await?;
        Ok(AuthenticatedPrincipal(principal))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match authorization_header(parts)? {
            Some(auth_header) => Ok(MaybePrincipal(Some(resolve_principal(auth_header, state).await?))),
            None => Ok(MaybePrincipal(None)),
        }
    }
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::Unauthorized("Header Authorization inválido".to_string()))
        })
        .transpose()
}

/// Decodificar el token y verificar que el principal existe y está activo
async fn resolve_principal(auth_header: &str, state: &AppState) -> Result<Principal, AppError> {
    let token = extract_token_from_header(auth_header)?;
    let claims = validate_token(token, &JwtConfig::from(&state.config))?;

    let principal = state
        .store
        .find_principal(claims.principal_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !principal.is_active {
        return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
    }

    Ok(principal)
}
