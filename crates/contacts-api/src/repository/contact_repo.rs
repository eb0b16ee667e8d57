//! 联系人仓储
//!
//! 所有查询都带 user_id 条件，其他用户的联系人对当前用户不可见

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Contact, ContactFields, ContactSearch};

const CONTACT_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone_number, \
                               birthday, address, created_at, updated_at";

/// 联系人仓储
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 分页列出联系人，按 id 升序
    pub async fn list(&self, user_id: i64, skip: i64, limit: i64) -> Result<Vec<Contact>> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = $1 \
             ORDER BY id ASC OFFSET $2 LIMIT $3"
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }

    /// 列出用户全部联系人
    pub async fn list_all(&self, user_id: i64) -> Result<Vec<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = $1 ORDER BY id ASC");
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }

    pub async fn get(&self, user_id: i64, id: i64) -> Result<Option<Contact>> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND user_id = $2");
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    /// 创建联系人，`fields` 应已规范化并通过校验
    pub async fn create(&self, user_id: i64, fields: ContactFields) -> Result<Contact> {
        let sql = format!(
            "INSERT INTO contacts (user_id, first_name, last_name, email, phone_number, birthday, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(fields.birthday)
            .bind(&fields.address)
            .fetch_one(&self.pool)
            .await?;

        Ok(contact)
    }

    /// 全量更新，联系人不存在时返回 None
    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        fields: ContactFields,
    ) -> Result<Option<Contact>> {
        let sql = format!(
            "UPDATE contacts \
             SET first_name = $3, last_name = $4, email = $5, phone_number = $6, \
                 birthday = $7, address = $8, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone_number)
            .bind(fields.birthday)
            .bind(&fields.address)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    /// 删除联系人，返回是否删除了记录
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 按条件搜索，未提供的条件不参与过滤
    pub async fn search(&self, user_id: i64, search: &ContactSearch) -> Result<Vec<Contact>> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts \
             WHERE user_id = $1 \
               AND ($2::TEXT IS NULL OR lower(first_name) = lower($2)) \
               AND ($3::TEXT IS NULL OR lower(last_name) = lower($3)) \
               AND ($4::TEXT IS NULL OR lower(email) = lower($4)) \
             ORDER BY id ASC"
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .bind(&search.first_name)
            .bind(&search.last_name)
            .bind(&search.email)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }
}
