//! 用户仓储（PostgreSQL）

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{AuthError, AuthResult, UserStore};
use crate::models::{NewUser, User};

/// 基于 PostgreSQL 的用户存储
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, refresh_token, avatar, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> AuthResult<User> {
        // 唯一约束冲突时不返回行
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, avatar)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, username, email, password_hash, refresh_token, avatar, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or(AuthError::DuplicateEmail)
    }

    async fn set_refresh_token(&self, user_id: i64, token: Option<String>) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn compare_and_swap_refresh_token(
        &self,
        user_id: i64,
        expected: &str,
        new: &str,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $3, updated_at = NOW()
            WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(user_id)
        .bind(expected)
        .bind(new)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
