//! 认证相关的 HTTP 处理器
//!
//! 提供注册、登录、刷新 Token 和获取当前用户的 API

use axum::{
    Extension, Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use validator::Validate;

use crate::auth::{AuthError, NewAccount, TokenPair};
use crate::dto::{LoginForm, SignupRequest, UserResponse};
use crate::error::{ApiError, Result};
use crate::models::User;
use crate::state::AppState;

/// 用户注册
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let user = state
        .sessions
        .signup(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// 用户登录
///
/// POST /api/auth/login（表单提交，`username` 字段为邮箱）
///
/// 表单缺字段或无法解析时与凭证错误返回相同的 401
pub async fn login(
    State(state): State<AppState>,
    form: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenPair>> {
    let Form(form) = form.map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

    let pair = state.sessions.login(&form.username, &form.password).await?;
    Ok(Json(pair))
}

/// 使用 refresh token 换取新的 Token 对
///
/// POST /api/auth/refresh_token
pub async fn refresh_token(
    State(state): State<AppState>,
    bearer: std::result::Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
) -> Result<Json<TokenPair>> {
    let TypedHeader(Authorization(bearer)) =
        bearer.map_err(|_| ApiError::from(AuthError::Unauthorized))?;

    let pair = state.sessions.refresh(bearer.token()).await?;
    Ok(Json(pair))
}

/// 获取当前用户信息
///
/// GET /api/auth/me
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}
