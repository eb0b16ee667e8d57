//! 认证子系统错误类型
//!
//! 调用方按错误种类分支，不解析错误消息

/// 认证子系统错误
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("该邮箱已被注册")]
    DuplicateEmail,
    /// 邮箱不存在与密码错误统一为同一种错误，避免账号枚举
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    #[error("Token 格式错误")]
    MalformedToken,
    /// 签名无效、已过期或 scope 不匹配
    #[error("Token 无效或已过期")]
    InvalidToken,
    #[error("认证失败")]
    Unauthorized,
    #[error("用户存储不可用: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 认证子系统 Result 类型别名
pub type AuthResult<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// 返回错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 跨越信任边界前折叠 Token 错误
    ///
    /// 对外只暴露 `Unauthorized`，不透露具体是哪一项校验失败
    pub fn into_unauthorized(self) -> Self {
        match self {
            Self::MalformedToken | Self::InvalidToken => Self::Unauthorized,
            other => other,
        }
    }
}
