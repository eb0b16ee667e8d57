//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 构建认证相关的公开路由
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh_token", post(handlers::auth::refresh_token))
}

/// 构建联系人路由
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route("/contacts/search", get(handlers::contacts::search_contacts))
        .route(
            "/contacts/birthdays",
            get(handlers::contacts::upcoming_birthday_contacts),
        )
        .route(
            "/contacts/{id}",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
}

/// 构建需要认证的路由
///
/// 认证中间件只挂在已匹配的路由上，未知路径仍返回 404
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .merge(contact_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// 构建完整的 API 路由
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(protected_routes(state))
}

/// 构建应用路由（不含进程级中间件）
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state)
}
