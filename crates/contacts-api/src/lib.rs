//! 联系人管理服务
//!
//! 提供用户注册登录和联系人管理的 REST API。
//!
//! ## 核心功能
//!
//! - **认证**：注册、登录、access/refresh Token 签发与轮换
//! - **联系人**：联系人的 CRUD、搜索和生日提醒
//!
//! ## 模块结构
//!
//! - `auth`: 密码哈希、Token 编解码、会话管理、用户存储接口
//! - `repository`: 用户与联系人的数据访问
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 领域模型
//! - `error`: HTTP 层错误类型
//! - `handlers` / `routes` / `middleware`: HTTP 接入
//! - `state`: 应用状态

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
