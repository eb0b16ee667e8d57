//! 用户实体
//!
//! 用户记录由用户存储持有；密码只以哈希形式保存，
//! refresh_token 为空表示当前没有可用于续期的会话。

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// 用户实体
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// 唯一，按存储原样区分大小写
    pub email: String,
    pub password_hash: String,
    /// 当前唯一有效的 refresh token
    pub refresh_token: Option<String>,
    /// 头像地址
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 新建用户参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// 根据邮箱生成 Gravatar 头像地址
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{:x}?d=identicon", digest)
}
