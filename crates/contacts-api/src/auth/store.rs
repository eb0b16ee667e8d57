//! 用户存储接口
//!
//! 会话管理只通过该接口读写用户记录，便于替换实现和 mock 测试

use async_trait::async_trait;

use super::error::AuthResult;
use crate::models::{NewUser, User};

/// 用户存储接口
///
/// 每个用户只保存一个 refresh token，新值覆盖旧值
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 按邮箱查找用户
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// 创建用户，邮箱已存在时返回 `DuplicateEmail`
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// 直接覆盖（或清空）用户的 refresh token
    async fn set_refresh_token(&self, user_id: i64, token: Option<String>) -> AuthResult<()>;

    /// 仅当当前值等于 `expected` 时替换为 `new`，返回是否替换成功
    ///
    /// 实现必须保证比较与写入是单个原子操作，
    /// 并发的两次续期中至多一次成功
    async fn compare_and_swap_refresh_token(
        &self,
        user_id: i64,
        expected: &str,
        new: &str,
    ) -> AuthResult<bool>;
}
