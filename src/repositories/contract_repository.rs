use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Contract;
use crate::repositories::{AuditStore, PgRepository};
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

#[async_trait]
impl AuditStore<Contract> for PgRepository {
    async fn insert(&self, entity: &Contract) -> AppResult<Contract> {
        let a = &entity.audit;
        sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (
                uuid, vehicle_id, companion_id, effective_start_date, expiry_date, is_active,
                fuel_share, maintenance_share, schedule,
                date_created, created_by, date_updated, updated_by,
                voided, date_voided, voided_by, void_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(a.uuid)
        .bind(entity.vehicle_id)
        .bind(entity.companion_id)
        .bind(entity.effective_start_date)
        .bind(entity.expiry_date)
        .bind(entity.is_active)
        .bind(entity.fuel_share)
        .bind(entity.maintenance_share)
        .bind(&entity.schedule)
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

    async fn save(&self, entity: &Contract) -> AppResult<Contract> {
        let a = &entity.audit;
        sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET vehicle_id = $2, companion_id = $3, effective_start_date = $4, expiry_date = $5,
                is_active = $6, fuel_share = $7, maintenance_share = $8, schedule = $9,
                date_updated = $10, updated_by = $11,
                voided = $12, date_voided = $13, voided_by = $14, void_reason = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(a.id)
        .bind(entity.vehicle_id)
        .bind(entity.companion_id)
        .bind(entity.effective_start_date)
        .bind(entity.expiry_date)
        .bind(entity.is_active)
        .bind(entity.fuel_share)
        .bind(entity.maintenance_share)
        .bind(&entity.schedule)
        .bind(a.date_updated)
        .bind(a.updated_by)
        .bind(a.voided)
        .bind(a.date_voided)
        .bind(a.voided_by)
        .bind(&a.void_reason)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| not_found_error("Contract", &a.uuid.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Contract>> {
        sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Contract>> {
        sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list(&self, include_voided: bool) -> AppResult<Vec<Contract>> {
        sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE ($1 OR NOT voided) ORDER BY effective_start_date, id",
        )
        .bind(include_voided)
        .fetch_all(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
