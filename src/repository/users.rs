//! Users repository for PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::UsersRepository;
use crate::{
    error::AppResult,
    models::user::{Role, UpsertUser, User},
};

#[derive(Clone)]
pub struct PgUsersRepository {
    pool: Pool<Postgres>,
}

impl PgUsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn upsert(&self, user: &UpsertUser) -> AppResult<User> {
        let now = Utc::now();
        // Absent identity fields keep their stored value
        let stored = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (open_id, name, email, login_method, role, last_signed_in)
            VALUES ($1, $2, $3, $4, COALESCE($5, $6), $7)
            ON CONFLICT (open_id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                email = COALESCE(EXCLUDED.email, users.email),
                login_method = COALESCE(EXCLUDED.login_method, users.login_method),
                role = COALESCE($5, users.role),
                last_signed_in = EXCLUDED.last_signed_in,
                updated_at = EXCLUDED.last_signed_in
            RETURNING *
            "#,
        )
        .bind(&user.open_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.login_method)
        .bind(user.role)
        .bind(Role::User)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }
}
