//! Envelope de auditoría
//!
//! Campos comunes de creación, actualización y anulación (soft delete)
//! compartidos por todas las entidades, junto con las transiciones que
//! los mantienen consistentes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppResult;

/// Motivo usado cuando se anula sin indicar razón
pub const DEFAULT_VOID_REASON: &str = "Voided without providing a reason";

/// Motivo usado al anular un modelo de vehículo que tiene dependientes
pub const DEPENDENT_VOID_REASON: &str = "Voided by user.";

/// Principal (usuario autenticado) que ejecuta una acción
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub is_staff: bool,
    pub is_active: bool,
}

/// Metadatos de auditoría de una entidad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuditEnvelope {
    /// Clave interna, `None` hasta que la entidad se persiste
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub date_created: Option<DateTime<Utc>>,
    pub created_by: Option<i64>,
    pub date_updated: Option<DateTime<Utc>>,
    pub updated_by: Option<i64>,
    pub voided: bool,
    pub date_voided: Option<DateTime<Utc>>,
    pub voided_by: Option<i64>,
    pub void_reason: Option<String>,
}

impl Default for AuditEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditEnvelope {
    /// Envelope de una entidad todavía no persistida, con UUID ya asignado
    pub fn new() -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            date_created: None,
            created_by: None,
            date_updated: None,
            updated_by: None,
            voided: false,
            date_voided: None,
            voided_by: None,
            void_reason: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn stamp_created(&mut self, actor: i64, now: DateTime<Utc>) {
        self.date_created = Some(now);
        self.created_by = Some(actor);
    }

    pub fn stamp_updated(&mut self, actor: i64, now: DateTime<Utc>) {
        self.date_updated = Some(now);
        self.updated_by = Some(actor);
    }

    /// Copiar identidad y metadatos de creación desde la versión almacenada
    pub fn preserve_identity(&mut self, stored: &AuditEnvelope) {
        self.id = stored.id;
        self.uuid = stored.uuid;
        self.date_created = stored.date_created;
        self.created_by = stored.created_by;
    }

    /// Marcar como anulada. Volver a anular refresca fecha y actor.
    ///
    /// El motivo queda como: el indicado (si no está vacío), el que ya tenía
    /// la entidad, o [`DEFAULT_VOID_REASON`].
    pub fn void(&mut self, actor: i64, reason: Option<&str>, now: DateTime<Utc>) {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| self.void_reason.take().filter(|r| !r.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_VOID_REASON.to_string());

        self.voided = true;
        self.date_voided = Some(now);
        self.voided_by = Some(actor);
        self.void_reason = Some(reason);
    }

    /// Deshacer la anulación. Devuelve `false` si no estaba anulada.
    pub fn restore(&mut self) -> bool {
        if !self.voided {
            return false;
        }
        self.clear_void();
        true
    }

    fn clear_void(&mut self) {
        self.voided = false;
        self.date_voided = None;
        self.voided_by = None;
        self.void_reason = None;
    }

    /// Reconciliar los campos de anulación con el flag `voided`,
    /// tal como hace el guardado desde la consola de administración.
    pub fn reconcile_void(&mut self, actor: i64, now: DateTime<Utc>) {
        if self.voided {
            let reason = self.void_reason.clone();
            self.void(actor, reason.as_deref(), now);
        } else {
            self.clear_void();
        }
    }

    /// `voided` y los tres campos asociados deben ir a la par
    pub fn void_state_consistent(&self) -> bool {
        if self.voided {
            self.date_voided.is_some() && self.voided_by.is_some() && self.void_reason.is_some()
        } else {
            self.date_voided.is_none() && self.voided_by.is_none() && self.void_reason.is_none()
        }
    }
}

/// Entidad con envelope de auditoría y política de validación propia
pub trait Auditable: Clone + Send + Sync + 'static {
    /// Nombre de la entidad en logs y mensajes de error
    const KIND: &'static str;

    fn envelope(&self) -> &AuditEnvelope;

    fn envelope_mut(&mut self) -> &mut AuditEnvelope;

    /// Normalización y validación propias de la entidad, previas a persistir
    fn validate_policy(&mut self) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_envelope_is_not_persisted() {
        let envelope = AuditEnvelope::new();
        assert!(!envelope.is_persisted());
        assert!(!envelope.voided);
        assert!(envelope.void_state_consistent());
    }

    #[test]
    fn test_void_without_reason_uses_default() {
        let mut envelope = AuditEnvelope::new();
        envelope.void(7, None, Utc::now());
        assert!(envelope.voided);
        assert_eq!(envelope.voided_by, Some(7));
        assert_eq!(envelope.void_reason.as_deref(), Some(DEFAULT_VOID_REASON));
        assert!(envelope.void_state_consistent());
    }

    #[test]
    fn test_void_blank_reason_uses_default() {
        let mut envelope = AuditEnvelope::new();
        envelope.void(7, Some("   "), Utc::now());
        assert_eq!(envelope.void_reason.as_deref(), Some(DEFAULT_VOID_REASON));
    }

    #[test]
    fn test_revoid_keeps_reason_and_refreshes_actor() {
        let mut envelope = AuditEnvelope::new();
        let first = Utc::now();
        envelope.void(1, Some("Sold"), first);
        envelope.void(2, None, first + Duration::seconds(5));
        assert_eq!(envelope.void_reason.as_deref(), Some("Sold"));
        assert_eq!(envelope.voided_by, Some(2));
        assert_eq!(envelope.date_voided, Some(first + Duration::seconds(5)));
    }

    #[test]
    fn test_restore_clears_void_metadata() {
        let mut envelope = AuditEnvelope::new();
        envelope.void(3, Some("Duplicate"), Utc::now());
        assert!(envelope.restore());
        assert!(!envelope.voided);
        assert!(envelope.date_voided.is_none());
        assert!(envelope.voided_by.is_none());
        assert!(envelope.void_reason.is_none());
    }

    #[test]
    fn test_restore_on_active_is_noop() {
        let mut envelope = AuditEnvelope::new();
        assert!(!envelope.restore());
        assert!(envelope.void_state_consistent());
    }

    #[test]
    fn test_reconcile_void_clears_stale_reason() {
        let mut envelope = AuditEnvelope::new();
        envelope.void_reason = Some("left over".to_string());
        envelope.reconcile_void(1, Utc::now());
        assert!(envelope.void_reason.is_none());
        assert!(envelope.void_state_consistent());
    }

    #[test]
    fn test_reconcile_void_stamps_actor() {
        let mut envelope = AuditEnvelope::new();
        envelope.voided = true;
        envelope.reconcile_void(9, Utc::now());
        assert_eq!(envelope.voided_by, Some(9));
        assert_eq!(envelope.void_reason.as_deref(), Some(DEFAULT_VOID_REASON));
        assert!(envelope.void_state_consistent());
    }

    #[test]
    fn test_preserve_identity_keeps_creation_metadata() {
        let mut stored = AuditEnvelope::new();
        stored.id = Some(10);
        let created = Utc::now();
        stored.stamp_created(1, created);

        let mut incoming = AuditEnvelope::new();
        incoming.stamp_created(99, created + Duration::days(1));
        incoming.preserve_identity(&stored);

        assert_eq!(incoming.id, Some(10));
        assert_eq!(incoming.uuid, stored.uuid);
        assert_eq!(incoming.created_by, Some(1));
        assert_eq!(incoming.date_created, Some(created));
    }
}
