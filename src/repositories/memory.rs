//! Repositorio en memoria
//!
//! Implementa los mismos puertos que el adaptador PostgreSQL, incluidas las
//! restricciones de unicidad. Se usa en desarrollo (sin `DATABASE_URL`) y en tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Auditable, Contract, Principal, UserProfile, Vehicle, VehicleModel};
use crate::repositories::{AuditStore, CarpoolStore, PrincipalStore};
use crate::utils::errors::{conflict_error, not_found_error, referenced_error, AppResult};

#[derive(Default)]
pub struct Tables {
    next_id: i64,
    principals: BTreeMap<i64, (Principal, String)>,
    vehicle_models: BTreeMap<i64, VehicleModel>,
    vehicles: BTreeMap<i64, Vehicle>,
    user_profiles: BTreeMap<i64, UserProfile>,
    contracts: BTreeMap<i64, Contract>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Tabla en memoria de una entidad auditada
pub trait MemoryTable: Auditable {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self>;

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self>;

    /// Orden de los listados, igual al `ORDER BY` del adaptador SQL
    fn list_order(a: &Self, b: &Self) -> Ordering;

    /// Restricciones de unicidad propias de la entidad
    fn unique_violation(_tables: &Tables, _entity: &Self) -> Option<(&'static str, String)> {
        None
    }

    /// Filas de otras tablas que impiden el borrado físico (`ON DELETE RESTRICT`)
    fn restricted_by(_tables: &Tables, _id: i64) -> bool {
        false
    }
}

impl MemoryTable for VehicleModel {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.vehicle_models
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.vehicle_models
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.vendor.cmp(&b.vendor).then_with(|| a.model.cmp(&b.model))
    }

    fn restricted_by(tables: &Tables, id: i64) -> bool {
        tables.vehicles.values().any(|v| v.model_id == id)
    }
}

impl MemoryTable for Vehicle {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.vehicles
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.vehicles
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.registration_number.cmp(&b.registration_number)
    }

    fn unique_violation(tables: &Tables, entity: &Self) -> Option<(&'static str, String)> {
        tables
            .vehicles
            .values()
            .any(|v| v.audit.id != entity.audit.id && v.registration_number == entity.registration_number)
            .then(|| ("registration_number", entity.registration_number.clone()))
    }
}

impl MemoryTable for UserProfile {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.user_profiles
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.user_profiles
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.audit
            .date_created
            .cmp(&b.audit.date_created)
            .then_with(|| a.audit.id.cmp(&b.audit.id))
    }

    fn unique_violation(tables: &Tables, entity: &Self) -> Option<(&'static str, String)> {
        tables
            .user_profiles
            .values()
            .any(|p| p.audit.id != entity.audit.id && p.user_id == entity.user_id)
            .then(|| ("user_id", entity.user_id.to_string()))
    }
}

impl MemoryTable for Contract {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.contracts
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.contracts
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.effective_start_date
            .cmp(&b.effective_start_date)
            .then_with(|| a.audit.id.cmp(&b.audit.id))
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: MemoryTable> AuditStore<E> for MemoryRepository {
    async fn insert(&self, entity: &E) -> AppResult<E> {
        let mut tables = self.tables.write().await;
        let uuid = entity.envelope().uuid;
        if E::table(&tables).values().any(|e| e.envelope().uuid == uuid) {
            return Err(conflict_error(E::KIND, "uuid", &uuid.to_string()));
        }
        if let Some((field, value)) = E::unique_violation(&tables, entity) {
            return Err(conflict_error(E::KIND, field, &value));
        }

        let id = tables.next_id();
        let mut stored = entity.clone();
        stored.envelope_mut().id = Some(id);
        E::table_mut(&mut tables).insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        let mut tables = self.tables.write().await;
        let envelope = entity.envelope();
        let current = envelope
            .id
            .and_then(|id| E::table(&tables).get(&id))
            .cloned()
            .ok_or_else(|| not_found_error(E::KIND, &envelope.uuid.to_string()))?;
        if let Some((field, value)) = E::unique_violation(&tables, entity) {
            return Err(conflict_error(E::KIND, field, &value));
        }

        let mut stored = entity.clone();
        stored.envelope_mut().preserve_identity(current.envelope());
        let id = current.envelope().id.unwrap_or_default();
        E::table_mut(&mut tables).insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>> {
        let tables = self.tables.read().await;
        Ok(E::table(&tables).get(&id).cloned())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<E>> {
        let tables = self.tables.read().await;
        Ok(E::table(&tables)
            .values()
            .find(|e| e.envelope().uuid == uuid)
            .cloned())
    }

    async fn list(&self, include_voided: bool) -> AppResult<Vec<E>> {
        let tables = self.tables.read().await;
        let mut items: Vec<E> = E::table(&tables)
            .values()
            .filter(|e| include_voided || !e.envelope().voided)
            .cloned()
            .collect();
        items.sort_by(E::list_order);
        Ok(items)
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if E::restricted_by(&tables, id) {
            return Err(referenced_error(E::KIND, &id.to_string()));
        }
        E::table_mut(&mut tables).remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for MemoryRepository {
    async fn create_principal(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> AppResult<Principal> {
        let mut tables = self.tables.write().await;
        if tables.principals.values().any(|(p, _)| p.username == username) {
            return Err(conflict_error("Principal", "username", username));
        }

        let principal = Principal {
            id: tables.next_id(),
            username: username.to_string(),
            is_staff,
            is_active: true,
        };
        tables
            .principals
            .insert(principal.id, (principal.clone(), password_hash.to_string()));
        Ok(principal)
    }

    async fn find_principal(&self, id: i64) -> AppResult<Option<Principal>> {
        let tables = self.tables.read().await;
        Ok(tables.principals.get(&id).map(|(p, _)| p.clone()))
    }

    async fn find_credentials(&self, username: &str) -> AppResult<Option<(Principal, String)>> {
        let tables = self.tables.read().await;
        Ok(tables
            .principals
            .values()
            .find(|(p, _)| p.username == username)
            .cloned())
    }
}

#[async_trait]
impl CarpoolStore for MemoryRepository {
    async fn count_vehicles_for_model(&self, model_id: i64) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .values()
            .filter(|v| v.model_id == model_id)
            .count() as i64)
    }

    async fn registration_number_taken(
        &self,
        registration_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .values()
            .any(|v| v.registration_number == registration_number && v.audit.id != exclude_id))
    }

    async fn profile_for_principal(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }
}
