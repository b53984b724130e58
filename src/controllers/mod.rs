//! Controllers
//!
//! Lógica de cada recurso de la API sobre el servicio de ciclo de vida.

use uuid::Uuid;

use crate::models::{Auditable, Principal};
use crate::repositories::AuditStore;
use crate::services::lifecycle::AuditLifecycle;
use crate::utils::errors::{forbidden_error, validation_error, AppError, AppResult};

pub mod admin_controller;
pub mod auth_controller;
pub mod contract_controller;
pub mod user_profile_controller;
pub mod vehicle_controller;
pub mod vehicle_model_controller;

/// Resolver una entidad referenciada desde un request. Si no existe o está
/// anulada es un error de validación del campo, no un 404.
pub(crate) async fn resolve_reference<E, S>(
    lifecycle: &AuditLifecycle,
    store: &S,
    uuid: Uuid,
    field: &'static str,
) -> AppResult<E>
where
    E: Auditable,
    S: AuditStore<E> + ?Sized,
{
    match lifecycle.fetch::<E, S>(store, uuid).await {
        Ok(entity) if entity.envelope().voided => {
            Err(validation_error(field, "Referenced record has been voided"))
        }
        Ok(entity) => Ok(entity),
        Err(AppError::NotFound(_)) => Err(validation_error(field, "Referenced record does not exist")),
        Err(e) => Err(e),
    }
}

/// Id de una entidad leída del store
pub(crate) fn persisted_id<E: Auditable>(entity: &E) -> AppResult<i64> {
    entity
        .envelope()
        .id
        .ok_or_else(|| AppError::Internal(format!("{} sin id tras leerlo del store", E::KIND)))
}

pub(crate) fn require_staff(principal: &Principal, operation: &str) -> AppResult<()> {
    if principal.is_staff {
        Ok(())
    } else {
        Err(forbidden_error(operation, "staff privileges required"))
    }
}
