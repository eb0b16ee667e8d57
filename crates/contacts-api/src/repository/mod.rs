//! 数据库仓储层
//!
//! 封装 SQL 操作细节，仓储只负责数据持久化，不包含业务逻辑

mod contact_repo;
mod memory;
mod user_repo;

pub use contact_repo::ContactRepository;
pub use memory::InMemoryUserStore;
pub use user_repo::PgUserStore;
