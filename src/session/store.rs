//! 会话存储
//!
//! 只能通过 `login` / `logout` 修改；网关调用时显式传入 [`Session`]，
//! 不存在任何全局状态。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::SessionError;

/// 登录角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// 当前登录身份
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Session {
    /// 构造一个已登录会话（测试和一次性调用时使用）
    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
            display_name: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// 会话存储
///
/// `path` 为 None 时只保存在内存中。
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Session,
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 从文件恢复会话，文件不存在时得到空会话
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let session = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| SessionError::Read {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| SessionError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Session::default()
        };

        debug!("会话已加载: {} (已登录: {})", path.display(), session.is_authenticated());

        Ok(Self {
            session,
            path: Some(path),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// 登录成功后写入 token 和角色，旧的显示名一并清除
    pub fn login(&mut self, token: impl Into<String>, role: Role) -> Result<(), SessionError> {
        self.session = Session::authenticated(token, role);
        info!("✓ 已登录，角色: {}", role);
        self.persist()
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        self.session.display_name = Some(name.into());
        self.persist()
    }

    /// 清空会话并删除持久化文件
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session = Session::default();
        info!("已退出登录");
        match &self.path {
            Some(path) if path.exists() => {
                fs::remove_file(path).map_err(|source| SessionError::Write {
                    path: path.display().to_string(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// 路由守卫：要求已登录且角色匹配
    pub fn require(&self, role: Role) -> Result<&Session, SessionError> {
        if !self.session.is_authenticated() {
            return Err(SessionError::NotLoggedIn);
        }
        match self.session.role() {
            Some(actual) if actual == role => Ok(&self.session),
            actual => Err(SessionError::WrongRole {
                required: role,
                actual,
            }),
        }
    }

    fn persist(&self) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_session(path, &self.session)
    }
}

fn write_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    let write_err = |source: std::io::Error| SessionError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = toml::to_string(session)?;
    fs::write(path, content).map_err(write_err)
}
