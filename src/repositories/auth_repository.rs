use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::auth::AccessProfile;
use crate::utils::errors::AppResult;

pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<AccessProfile>> {
        let profile = sqlx::query_as::<_, AccessProfile>(
            "SELECT * FROM user_access_profiles WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn create(
        &self,
        email: String,
        senha_hash: String,
        profile_type: String,
    ) -> AppResult<AccessProfile> {
        let profile = sqlx::query_as::<_, AccessProfile>(
            r#"
            INSERT INTO user_access_profiles (id, email, senha_hash, profile_type, criado_em)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(senha_hash)
        .bind(profile_type)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
