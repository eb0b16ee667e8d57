//! JWT Token 编解码
//!
//! 签发和校验自包含的会话 Token。Token 携带 subject（用户邮箱）、
//! scope（access_token / refresh_token）、签发时间和过期时间，
//! 使用进程级 HMAC 密钥签名。

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use contacts_shared::config::AuthConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::error::{AuthError, AuthResult};

/// 响应中固定的 Token 类型
pub const TOKEN_TYPE: &str = "bearer";

/// Token 用途
///
/// 区分 access token 与 refresh token，防止两者混用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    AccessToken,
    RefreshToken,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户邮箱
    pub sub: String,
    pub scope: TokenScope,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// Token 唯一标识，同一秒内签发的两个 Token 也互不相同
    pub jti: String,
}

/// Access / Refresh Token 对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Token 编解码器
///
/// 启动时根据 [`AuthConfig`] 构造一次，之后只读共享
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// 创建编解码器
    ///
    /// 只接受 HMAC 系列算法（HS256 / HS384 / HS512）
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            AuthError::Internal(format!("不支持的签名算法: {}", config.algorithm))
        })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthError::Internal(format!(
                "签名算法必须为 HMAC 系列: {}",
                config.algorithm
            )));
        }

        if config.secret_key.is_empty() {
            return Err(AuthError::Internal("签名密钥不能为空".to_string()));
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            access_ttl: Duration::seconds(config.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_secs),
        })
    }

    /// 各 scope 的默认有效期
    pub fn default_ttl(&self, scope: TokenScope) -> Duration {
        match scope {
            TokenScope::AccessToken => self.access_ttl,
            TokenScope::RefreshToken => self.refresh_ttl,
        }
    }

    /// 签发 Token
    ///
    /// `ttl` 为 `None` 时使用该 scope 的默认有效期
    pub fn issue(
        &self,
        subject: &str,
        scope: TokenScope,
        ttl: Option<Duration>,
    ) -> AuthResult<String> {
        self.issue_at(subject, scope, ttl, Utc::now())
    }

    /// 以指定时间为签发时间签发 Token
    pub fn issue_at(
        &self,
        subject: &str,
        scope: TokenScope,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let exp = now + ttl.unwrap_or_else(|| self.default_ttl(scope));

        let claims = Claims {
            sub: subject.to_string(),
            scope,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("JWT 生成失败: {}", e)))
    }

    /// 签发一对 access / refresh Token
    pub fn issue_pair(&self, subject: &str) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(subject, TokenScope::AccessToken, None)?,
            refresh_token: self.issue(subject, TokenScope::RefreshToken, None)?,
            token_type: TOKEN_TYPE.to_string(),
        })
    }

    /// 验证并解析 Token
    ///
    /// 结构无法解析时返回 `MalformedToken`；签名无效、已过期或 scope 不符时返回 `InvalidToken`
    pub fn verify(&self, token: &str, expected_scope: TokenScope) -> AuthResult<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidToken,
            })?
            .claims;

        if claims.scope != expected_scope {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
