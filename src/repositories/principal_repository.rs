use async_trait::async_trait;
use sqlx::FromRow;

use crate::models::Principal;
use crate::repositories::{PgRepository, PrincipalStore};
use crate::utils::errors::{map_db_error, AppResult};

#[derive(Debug, FromRow)]
struct PrincipalRow {
    #[sqlx(flatten)]
    principal: Principal,
    password_hash: String,
}

#[async_trait]
impl PrincipalStore for PgRepository {
    async fn create_principal(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> AppResult<Principal> {
        sqlx::query_as::<_, Principal>(
            r#"
            INSERT INTO principals (username, password_hash, is_staff)
            VALUES ($1, $2, $3)
            RETURNING id, username, is_staff, is_active
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_staff)
        .fetch_one(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn find_principal(&self, id: i64) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>(
            "SELECT id, username, is_staff, is_active FROM principals WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)
    }

    async fn find_credentials(&self, username: &str) -> AppResult<Option<(Principal, String)>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            "SELECT id, username, is_staff, is_active, password_hash FROM principals WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|r| (r.principal, r.password_hash)))
    }
}
