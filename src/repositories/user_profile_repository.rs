use async_trait::async_trait;
use uuid::Uuid;

use crate::models::UserProfile;
use crate::repositories::{AuditStore, PgRepository};
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

#[async_trait]
impl AuditStore<UserProfile> for PgRepository {
    async fn insert(&self, entity: &UserProfile) -> AppResult<UserProfile> {
        let a = &entity.audit;
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (
                uuid, user_id, birthdate, gender, user_type, primary_contact, alternate_contact,
                address, address_latitude, address_longitude, landmark, town,
                active, date_deactivated, bio,
                date_created, created_by, date_updated, updated_by,
                voided, date_voided, voided_by, void_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23)
            RETURNING *
            "#,
        )
        .bind(a.uuid)
        .bind(entity.user_id)
        .bind(entity.birthdate)
        .bind(&entity.gender)
        .bind(entity.user_type)
        .bind(&entity.primary_contact)
        .bind(&entity.alternate_contact)
        .bind(&entity.address)
        .bind(entity.address_latitude)
        .bind(entity.address_longitude)
        .bind(&entity.landmark)
        .bind(&entity.town)
        .bind(entity.active)
        .bind(entity.date_deactivated)
        .bind(&entity.bio)
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

    async fn save(&self, entity: &UserProfile) -> AppResult<UserProfile> {
        let a = &entity.audit;
        sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles
            SET birthdate = $2, gender = $3, user_type = $4, primary_contact = $5,
                alternate_contact = $6, address = $7, address_latitude = $8,
                address_longitude = $9, landmark = $10, town = $11, active = $12,
                date_deactivated = $13, bio = $14, date_updated = $15, updated_by = $16,
                voided = $17, date_voided = $18, voided_by = $19, void_reason = $20
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(a.id)
        .bind(entity.birthdate)
        .bind(&entity.gender)
        .bind(entity.user_type)
        .bind(&entity.primary_contact)
        .bind(&entity.alternate_contact)
        .bind(&entity.address)
        .bind(entity.address_latitude)
        .bind(entity.address_longitude)
        .bind(&entity.landmark)
        .bind(&entity.town)
        .bind(entity.active)
        .bind(entity.date_deactivated)
        .bind(&entity.bio)
        .bind(a.date_updated)
        .bind(a.updated_by)
        .bind(a.voided)
        .bind(a.date_voided)
        .bind(a.voided_by)
        .bind(&a.void_reason)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| not_found_error("UserProfile", &a.uuid.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn list(&self, include_voided: bool) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT * FROM user_profiles WHERE ($1 OR NOT voided) ORDER BY date_created, id",
        )
        .bind(include_voided)
        .fetch_all(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
