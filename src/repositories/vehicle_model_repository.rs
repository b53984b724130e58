use async_trait::async_trait;
use uuid::Uuid;

use crate::models::VehicleModel;
use crate::repositories::{AuditStore, PgRepository};
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

#[async_trait]
impl AuditStore<VehicleModel> for PgRepository {
    async fn insert(&self, entity: &VehicleModel) -> AppResult<VehicleModel> {
        let a = &entity.audit;
        sqlx::query_as::<_, VehicleModel>(
            r#"
            INSERT INTO vehicle_models (
                uuid, vendor, model, vehicle_type, capacity,
                date_created, created_by, date_updated, updated_by,
                voided, date_voided, voided_by, void_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(a.uuid)
        .bind(&entity.vendor)
        .bind(&entity.model)
        .bind(entity.vehicle_type)
        .bind(entity.capacity)
        .bind(a.date_created)
        .bind(a.created_by)
        .bind(a.date_updated)
        .bind(a.updated_by)
        .bind(a.voided)
        .bind(a.date_voided)
        .bind(a.voided_by)
        .bind(&a.void_reason)
        .fetch_one(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn save(&self, entity: &VehicleModel) -> AppResult<VehicleModel> {
        let a = &entity.audit;
        sqlx::query_as::<_, VehicleModel>(
            r#"
            UPDATE vehicle_models
            SET vendor = $2, model = $3, vehicle_type = $4, capacity = $5,
                date_updated = $6, updated_by = $7,
                voided = $8, date_voided = $9, voided_by = $10, void_reason = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(a.id)
        .bind(&entity.vendor)
        .bind(&entity.model)
        .bind(entity.vehicle_type)
        .bind(entity.capacity)
        .bind(a.date_updated)
        .bind(a.updated_by)
        .bind(a.voided)
        .bind(a.date_voided)
        .bind(a.voided_by)
        .bind(&a.void_reason)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| not_found_error("VehicleModel", &a.uuid.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<VehicleModel>> {
        sqlx::query_as::<_, VehicleModel>("SELECT * FROM vehicle_models WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<VehicleModel>> {
        sqlx::query_as::<_, VehicleModel>("SELECT * FROM vehicle_models WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list(&self, include_voided: bool) -> AppResult<Vec<VehicleModel>> {
        sqlx::query_as::<_, VehicleModel>(
            "SELECT * FROM vehicle_models WHERE ($1 OR NOT voided) ORDER BY vendor, model",
        )
        .bind(include_voided)
        .fetch_all(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM vehicle_models WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
