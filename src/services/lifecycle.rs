//! Servicio de ciclo de vida auditado
//!
//! Un único servicio paramétrico aplica creación, actualización, anulación,
//! restauración y purga a cualquier entidad `Auditable`, registrando quién
//! hizo cada acción y cuándo.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Auditable, Principal};
use crate::repositories::AuditStore;
use crate::utils::errors::{forbidden_error, invalid_state_error, not_found_error, AppResult};

pub struct AuditLifecycle {
    system_principal: Principal,
}

impl AuditLifecycle {
    /// `system_principal` es el actor usado cuando una operación no trae uno
    pub fn new(system_principal: Principal) -> Self {
        Self { system_principal }
    }

    pub fn system_principal(&self) -> &Principal {
        &self.system_principal
    }

    fn resolve<'a>(&'a self, actor: Option<&'a Principal>) -> &'a Principal {
        actor.unwrap_or(&self.system_principal)
    }

    fn require_persisted<E: Auditable>(entity: &E, operation: &str) -> AppResult<i64> {
        entity.envelope().id.ok_or_else(|| {
            invalid_state_error(
                E::KIND,
                &format!("cannot {} an entity that has not been created", operation),
            )
        })
    }

    fn require_privileged<E: Auditable>(actor: &Principal, operation: &str) -> AppResult<()> {
        if !actor.is_staff {
            warn!(
                "🚫 {} rechazado para {} (usuario '{}' sin privilegios)",
                operation,
                E::KIND,
                actor.username
            );
            return Err(forbidden_error(
                &format!("{} {}", operation, E::KIND),
                "operation not allowed for non-staff users",
            ));
        }
        Ok(())
    }

    /// Buscar por UUID; `NotFound` si no existe
    pub async fn fetch<E, S>(&self, store: &S, uuid: Uuid) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        store
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| not_found_error(E::KIND, &uuid.to_string()))
    }

    pub async fn fetch_by_id<E, S>(&self, store: &S, id: i64) -> AppResult<Option<E>>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        store.find_by_id(id).await
    }

    pub async fn list<E, S>(&self, store: &S, include_voided: bool) -> AppResult<Vec<E>>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        store.list(include_voided).await
    }

    /// Validar, sellar creación y persistir
    pub async fn create<E, S>(&self, store: &S, mut entity: E, actor: Option<&Principal>) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        if entity.envelope().is_persisted() {
            return Err(invalid_state_error(E::KIND, "entity has already been created"));
        }
        entity.validate_policy()?;

        let actor = self.resolve(actor);
        entity.envelope_mut().stamp_created(actor.id, Utc::now());
        let stored = store.insert(&entity).await?;

        info!("✅ {} {} creado por '{}'", E::KIND, stored.envelope().uuid, actor.username);
        Ok(stored)
    }

    /// Validar, sellar actualización y persistir el estado completo
    pub async fn update<E, S>(&self, store: &S, mut entity: E, actor: Option<&Principal>) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        Self::require_persisted(&entity, "update")?;
        entity.validate_policy()?;

        let actor = self.resolve(actor);
        entity.envelope_mut().stamp_updated(actor.id, Utc::now());
        let stored = store.save(&entity).await?;

        info!("✏️ {} {} actualizado por '{}'", E::KIND, stored.envelope().uuid, actor.username);
        Ok(stored)
    }

    /// Anulación (soft delete). Anular de nuevo una entidad anulada está permitido.
    pub async fn void<E, S>(
        &self,
        store: &S,
        mut entity: E,
        actor: Option<&Principal>,
        reason: Option<&str>,
    ) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        Self::require_persisted(&entity, "void")?;
        let actor = self.resolve(actor);
        Self::require_privileged::<E>(actor, "void")?;

        entity.envelope_mut().void(actor.id, reason, Utc::now());
        let stored = store.save(&entity).await?;

        info!(
            "🗑️ {} {} anulado por '{}': {}",
            E::KIND,
            stored.envelope().uuid,
            actor.username,
            stored.envelope().void_reason.as_deref().unwrap_or_default()
        );
        Ok(stored)
    }

    /// Deshacer la anulación. Sobre una entidad activa no hace nada.
    pub async fn restore<E, S>(&self, store: &S, mut entity: E) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        Self::require_persisted(&entity, "restore")?;
        if !entity.envelope_mut().restore() {
            return Ok(entity);
        }

        let stored = store.save(&entity).await?;
        info!("♻️ {} {} restaurado", E::KIND, stored.envelope().uuid);
        Ok(stored)
    }

    /// Purga: hoy equivale a una anulación sin motivo, no borra la fila
    pub async fn purge<E, S>(&self, store: &S, entity: E, actor: Option<&Principal>) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        warn!(
            "⚠️ purge de {} {} se aplica como anulación; la fila se conserva",
            E::KIND,
            entity.envelope().uuid
        );
        self.void(store, entity, actor, None).await
    }

    /// Borrado físico. Solo para entidades sin dependientes.
    pub async fn hard_delete<E, S>(&self, store: &S, entity: &E, actor: &Principal) -> AppResult<()>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        let id = Self::require_persisted(entity, "delete")?;
        Self::require_privileged::<E>(actor, "delete")?;

        store.hard_delete(id).await?;
        info!("❌ {} {} eliminado por '{}'", E::KIND, entity.envelope().uuid, actor.username);
        Ok(())
    }

    /// Guardado desde la consola de administración: sella creación o
    /// actualización según corresponda y reconcilia el estado de anulación
    /// con el flag `voided` enviado.
    pub async fn admin_save<E, S>(&self, store: &S, mut entity: E, actor: &Principal) -> AppResult<E>
    where
        E: Auditable,
        S: AuditStore<E> + ?Sized,
    {
        Self::require_privileged::<E>(actor, "administer")?;
        entity.validate_policy()?;

        let now = Utc::now();
        let persisted = entity.envelope().is_persisted();
        {
            let envelope = entity.envelope_mut();
            if persisted {
                envelope.stamp_updated(actor.id, now);
            } else {
                envelope.stamp_created(actor.id, now);
            }
            envelope.reconcile_void(actor.id, now);
        }

        let stored = if persisted {
            store.save(&entity).await?
        } else {
            store.insert(&entity).await?
        };
        info!("🛠️ {} {} guardado desde admin por '{}'", E::KIND, stored.envelope().uuid, actor.username);
        Ok(stored)
    }
}
