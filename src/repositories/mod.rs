//! Repositorios
//!
//! Puertos de persistencia para las entidades auditadas y sus adaptadores:
//! PostgreSQL (`PgRepository`) y memoria (`MemoryRepository`).

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Auditable, Contract, Principal, UserProfile, Vehicle, VehicleModel};
use crate::utils::errors::{map_db_error, AppResult};

pub mod contract_repository;
pub mod memory;
pub mod principal_repository;
pub mod user_profile_repository;
pub mod vehicle_model_repository;
pub mod vehicle_repository;

pub use memory::MemoryRepository;

/// Persistencia de una entidad auditada. Cada llamada es una escritura
/// atómica de una sola fila.
#[async_trait]
pub trait AuditStore<E: Auditable>: Send + Sync {
    /// Insertar una entidad nueva y devolverla con su id asignado
    async fn insert(&self, entity: &E) -> AppResult<E>;

    /// Escribir el estado completo de una entidad existente.
    /// Los metadatos de creación no se modifican.
    async fn save(&self, entity: &E) -> AppResult<E>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>>;

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<E>>;

    async fn list(&self, include_voided: bool) -> AppResult<Vec<E>>;

    async fn hard_delete(&self, id: i64) -> AppResult<()>;
}

/// Cuentas de usuario (principals) y sus credenciales
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn create_principal(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> AppResult<Principal>;

    async fn find_principal(&self, id: i64) -> AppResult<Option<Principal>>;

    /// Principal junto con su hash de contraseña
    async fn find_credentials(&self, username: &str) -> AppResult<Option<(Principal, String)>>;
}

/// Almacén completo de la aplicación
#[async_trait]
pub trait CarpoolStore:
    AuditStore<VehicleModel>
    + AuditStore<Vehicle>
    + AuditStore<UserProfile>
    + AuditStore<Contract>
    + PrincipalStore
{
    /// Vehículos (activos o anulados) que usan un modelo del catálogo
    async fn count_vehicles_for_model(&self, model_id: i64) -> AppResult<i64>;

    /// ¿Existe otra matrícula igual, anulada o no?
    async fn registration_number_taken(
        &self,
        registration_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool>;

    async fn profile_for_principal(&self, user_id: i64) -> AppResult<Option<UserProfile>>;
}

/// Adaptador PostgreSQL. Las implementaciones por entidad viven en
/// los módulos `*_repository`.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CarpoolStore for PgRepository {
    async fn count_vehicles_for_model(&self, model_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE model_id = $1")
            .bind(model_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.0)
    }

    async fn registration_number_taken(
        &self,
        registration_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE registration_number = $1
                AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(registration_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.0)
    }

    async fn profile_for_principal(&self, user_id: i64) -> AppResult<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
