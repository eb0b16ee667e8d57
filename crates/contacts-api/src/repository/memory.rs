//! 内存用户存储
//!
//! 用于测试和本地演示，进程退出即丢失

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::auth::{AuthError, AuthResult, UserStore};
use crate::models::{NewUser, User};

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// 内存用户存储
///
/// 所有写操作在同一把写锁内完成，比较与替换天然原子
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前保存的 refresh token
    pub fn refresh_token_of(&self, email: &str) -> Option<String> {
        self.inner
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .and_then(|u| u.refresh_token.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut inner = self.inner.write();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        inner.next_id += 1;
        let created = User {
            id: inner.next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            refresh_token: None,
            avatar: user.avatar,
            created_at: Utc::now(),
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn set_refresh_token(&self, user_id: i64, token: Option<String>) -> AuthResult<()> {
        if let Some(user) = self.inner.write().users.get_mut(&user_id) {
            user.refresh_token = token;
        }
        Ok(())
    }

    async fn compare_and_swap_refresh_token(
        &self,
        user_id: i64,
        expected: &str,
        new: &str,
    ) -> AuthResult<bool> {
        let mut inner = self.inner.write();
        match inner.users.get_mut(&user_id) {
            Some(user) if user.refresh_token.as_deref() == Some(expected) => {
                user.refresh_token = Some(new.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
