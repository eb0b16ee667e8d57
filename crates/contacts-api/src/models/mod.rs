//! 领域模型模块

pub mod contact;
pub mod user;

pub use contact::{Contact, ContactFields, ContactSearch, upcoming_birthdays};
pub use user::{NewUser, User, gravatar_url};
