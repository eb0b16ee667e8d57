//! 认证模块
//!
//! 提供 Token 签发与校验、密码哈希以及会话管理功能

mod error;
mod password;
mod session;
mod store;
mod token;

pub use error::{AuthError, AuthResult};
pub use password::{hash_password, verify_dummy, verify_password};
pub use session::{NewAccount, SessionManager};
#[cfg(test)]
pub use store::MockUserStore;
pub use store::UserStore;
pub use token::{Claims, TOKEN_TYPE, TokenCodec, TokenPair, TokenScope};
