//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use contacts_shared::database::Database;

use crate::auth::SessionManager;
use crate::repository::ContactRepository;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// 数据库连接池，用于就绪探针
    pub db: Database,
    /// 会话管理器
    pub sessions: Arc<SessionManager>,
    /// 联系人仓储
    pub contacts: ContactRepository,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(db: Database, sessions: Arc<SessionManager>) -> Self {
        let contacts = ContactRepository::new(db.pool().clone());
        Self {
            db,
            sessions,
            contacts,
        }
    }
}
