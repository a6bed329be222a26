//! 会话层
//!
//! 持有登录 token 与角色，并负责持久化到本地文件

pub mod store;

pub use store::{Role, Session, SessionStore};
