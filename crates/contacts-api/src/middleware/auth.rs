//! 认证中间件
//!
//! 验证请求中的 Bearer Token 并将当前用户注入请求扩展

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::auth::AuthError;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 认证中间件
///
/// 缺少 Authorization 头或 Token 无效时返回 401，
/// 成功时把 `User` 写入请求扩展，处理器通过 `Extension<User>` 读取
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: std::result::Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let TypedHeader(Authorization(bearer)) =
        bearer.map_err(|_| ApiError::from(AuthError::Unauthorized))?;

    let user = state.sessions.authenticate_request(bearer.token()).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
