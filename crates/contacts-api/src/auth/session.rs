//! 会话管理
//!
//! 编排注册、登录、请求认证和 refresh token 轮换：
//!
//! 1. 注册：哈希密码 -> 创建用户
//! 2. 登录：校验密码 -> 签发 Token 对 -> 保存 refresh token
//! 3. 请求认证：校验 access token -> 按 subject 解析用户
//! 4. 续期：校验 refresh token -> 与存储值比对 -> 原子替换为新值
//!
//! 续期时如果提交的 refresh token 与存储值不一致，说明旧 token 被重放，
//! 立即清空存储值强制下线。

use std::sync::Arc;

use contacts_shared::observability::metrics::{AuthOperation, record_auth_outcome};
use tracing::{info, instrument, warn};

use super::error::{AuthError, AuthResult};
use super::password::{hash_password, verify_dummy, verify_password};
use super::store::UserStore;
use super::token::{TokenCodec, TokenPair, TokenScope};
use crate::models::{NewUser, User, gravatar_url};

/// 注册信息
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 会话管理器
///
/// 无进程内会话状态，所有状态变更都落在用户存储上
pub struct SessionManager {
    store: Arc<dyn UserStore>,
    codec: TokenCodec,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>, codec: TokenCodec) -> Self {
        Self { store, codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// 注册新用户
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn signup(&self, account: NewAccount) -> AuthResult<User> {
        let result = self.do_signup(account).await;
        record(AuthOperation::Signup, &result);
        result
    }

    async fn do_signup(&self, account: NewAccount) -> AuthResult<User> {
        if self.store.find_by_email(&account.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password = account.password;
        let password_hash = run_blocking(move || hash_password(&password)).await??;

        let user = self
            .store
            .create(NewUser {
                username: account.username,
                avatar: Some(gravatar_url(&account.email)),
                email: account.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    /// 登录并签发 Token 对
    ///
    /// 邮箱不存在和密码错误都返回 `InvalidCredentials`
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<TokenPair> {
        let result = self.do_login(email, password).await;
        record(AuthOperation::Login, &result);
        result
    }

    async fn do_login(&self, email: &str, password: &str) -> AuthResult<TokenPair> {
        let user = self.store.find_by_email(email).await?;

        let password = password.to_string();
        let (user, valid) = match user {
            Some(user) => {
                let digest = user.password_hash.clone();
                let valid = run_blocking(move || verify_password(&password, &digest)).await?;
                (Some(user), valid)
            }
            None => {
                run_blocking(move || verify_dummy(&password)).await?;
                (None, false)
            }
        };

        let user = match user {
            Some(user) if valid => user,
            _ => {
                warn!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let pair = self.codec.issue_pair(&user.email)?;
        self.store
            .set_refresh_token(user.id, Some(pair.refresh_token.clone()))
            .await?;

        info!(user_id = user.id, "User logged in");
        Ok(pair)
    }

    /// 校验 access token 并解析当前用户
    ///
    /// 所有受保护操作都必须先经过这里
    pub async fn authenticate_request(&self, access_token: &str) -> AuthResult<User> {
        let claims = self
            .codec
            .verify(access_token, TokenScope::AccessToken)
            .map_err(AuthError::into_unauthorized)?;

        self.store
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    /// 使用 refresh token 换取新的 Token 对
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let result = self.do_refresh(refresh_token).await;
        record(AuthOperation::Refresh, &result);
        result
    }

    async fn do_refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self
            .codec
            .verify(refresh_token, TokenScope::RefreshToken)
            .map_err(AuthError::into_unauthorized)?;

        let user = self
            .store
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            warn!(user_id = user.id, "Stale refresh token presented, revoking session");
            self.store.set_refresh_token(user.id, None).await?;
            return Err(AuthError::Unauthorized);
        }

        let pair = self.codec.issue_pair(&user.email)?;

        let swapped = self
            .store
            .compare_and_swap_refresh_token(user.id, refresh_token, &pair.refresh_token)
            .await?;
        if !swapped {
            // 读取之后被并发续期抢先替换
            warn!(user_id = user.id, "Concurrent refresh detected, revoking session");
            self.store.set_refresh_token(user.id, None).await?;
            return Err(AuthError::Unauthorized);
        }

        info!(user_id = user.id, "Refresh token rotated");
        Ok(pair)
    }
}

fn record<T>(operation: AuthOperation, result: &AuthResult<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.code(),
    };
    record_auth_outcome(operation, outcome);
}

/// 在阻塞线程池上执行 bcrypt 等 CPU 密集型操作
async fn run_blocking<F, T>(f: F) -> AuthResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("后台任务异常: {}", e)))
}
