//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::models::Principal;
use crate::repositories::{CarpoolStore, PrincipalStore};
use crate::services::lifecycle::AuditLifecycle;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CarpoolStore>,
    pub lifecycle: Arc<AuditLifecycle>,
    pub config: EnvironmentConfig,
}

impl AppState {
    /// Resolver el principal de sistema y construir el estado
    pub async fn bootstrap(store: Arc<dyn CarpoolStore>, config: EnvironmentConfig) -> AppResult<Self> {
        let system_principal =
            resolve_system_principal(store.as_ref(), &config.system_principal_username).await?;

        Ok(Self {
            store,
            lifecycle: Arc::new(AuditLifecycle::new(system_principal)),
            config,
        })
    }
}

/// Hash que ningún password verifica; el principal de sistema no puede hacer login
pub const UNUSABLE_PASSWORD_HASH: &str = "!";

/// Buscar el principal de sistema por nombre; si no existe se crea como staff
pub async fn resolve_system_principal(store: &dyn CarpoolStore, username: &str) -> AppResult<Principal> {
    if let Some((principal, _)) = store.find_credentials(username).await? {
        info!("🤖 Principal de sistema '{}' (id {})", principal.username, principal.id);
        return Ok(principal);
    }

    let principal = store
        .create_principal(username, UNUSABLE_PASSWORD_HASH, true)
        .await?;
    info!("🤖 Principal de sistema '{}' creado (id {})", principal.username, principal.id);
    Ok(principal)
}
