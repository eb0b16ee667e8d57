//! HTTP 层错误类型定义
//!
//! 把认证子系统和仓储层的错误映射为统一的错误响应

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use contacts_shared::observability::tracing::current_trace_id;
use serde_json::json;

use crate::auth::AuthError;

/// 系统级错误对外返回的通用提示
const GENERIC_MESSAGE: &str = "服务内部错误，请稍后重试";

/// HTTP 层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("联系人不存在: {0}")]
    ContactNotFound(i64),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(e) => match e {
                AuthError::DuplicateEmail => StatusCode::CONFLICT,
                AuthError::InvalidCredentials
                | AuthError::MalformedToken
                | AuthError::InvalidToken
                | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
                AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ContactNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            // Token 相关失败对外一律为 UNAUTHORIZED
            Self::Auth(AuthError::MalformedToken | AuthError::InvalidToken) => "UNAUTHORIZED",
            Self::Auth(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ContactNotFound(_) => "CONTACT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Auth(AuthError::StoreUnavailable(e)) => {
                tracing::error!(error = %e, trace_id = ?current_trace_id(), "用户存储不可用");
                GENERIC_MESSAGE.to_string()
            }
            Self::Auth(AuthError::Internal(e)) | Self::Internal(e) => {
                tracing::error!(error = %e, trace_id = ?current_trace_id(), "内部错误");
                GENERIC_MESSAGE.to_string()
            }
            Self::Database(e) => {
                tracing::error!(error = %e, trace_id = ?current_trace_id(), "数据库操作失败");
                GENERIC_MESSAGE.to_string()
            }
            Self::Auth(AuthError::MalformedToken | AuthError::InvalidToken) => {
                AuthError::Unauthorized.to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

// 提取器失败同样走统一的错误信封

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// HTTP 层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
