use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Vehicle;
use crate::repositories::{AuditStore, PgRepository};
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

#[async_trait]
impl AuditStore<Vehicle> for PgRepository {
    async fn insert(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        let a = &entity.audit;
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                uuid, registration_number, colour, model_id, owner_id, status, picture1, picture2,
                date_created, created_by, date_updated, updated_by,
                voided, date_voided, voided_by, void_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(a.uuid)
        .bind(&entity.registration_number)
        .bind(&entity.colour)
        .bind(entity.model_id)
        .bind(entity.owner_id)
        .bind(entity.status)
        .bind(&entity.picture1)
        .bind(&entity.picture2)
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

    async fn save(&self, entity: &Vehicle) -> AppResult<Vehicle> {
        let a = &entity.audit;
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET registration_number = $2, colour = $3, model_id = $4, owner_id = $5, status = $6,
                picture1 = $7, picture2 = $8, date_updated = $9, updated_by = $10,
                voided = $11, date_voided = $12, voided_by = $13, void_reason = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(a.id)
        .bind(&entity.registration_number)
        .bind(&entity.colour)
        .bind(entity.model_id)
        .bind(entity.owner_id)
        .bind(entity.status)
        .bind(&entity.picture1)
        .bind(&entity.picture2)
        .bind(a.date_updated)
        .bind(a.updated_by)
        .bind(a.voided)
        .bind(a.date_voided)
        .bind(a.voided_by)
        .bind(&a.void_reason)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| not_found_error("Vehicle", &a.uuid.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list(&self, include_voided: bool) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE ($1 OR NOT voided) ORDER BY registration_number",
        )
        .bind(include_voided)
        .fetch_all(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
