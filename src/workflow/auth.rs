//! 登录流程
//!
//! 必填校验 → 调用网关 → 写入会话

use tracing::{info, warn};

use crate::clients::QuizApi;
use crate::error::{AppError, AppResult, ErrorKind, InputError};
use crate::models::{AdminCredentials, ParticipantCredentials};
use crate::session::{Role, Session, SessionStore};

/// 没有显示名时的问候称呼
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// 管理员登录
pub async fn login_admin<A: QuizApi>(
    api: &A,
    store: &mut SessionStore,
    email: &str,
    password: &str,
) -> AppResult<()> {
    let credentials = AdminCredentials {
        email: required("email", email)?,
        password: required("password", password)?,
    };

    let response = api.admin_login(&credentials).await.map_err(|e| {
        warn!("⚠️ 管理员登录失败: {}", e);
        AppError::Rejected(ErrorKind::LoginFailed)
    })?;

    store.login(response.token, Role::Admin)?;
    Ok(())
}

/// 参与者登录，返回用于问候的显示名
pub async fn login_participant<A: QuizApi>(
    api: &A,
    store: &mut SessionStore,
    identifier: &str,
    unique_id: &str,
) -> AppResult<String> {
    let credentials = ParticipantCredentials {
        identifier: required("identifier", identifier)?,
        unique_id: required("unique id", unique_id)?,
    };

    let response = api.participant_login(&credentials).await.map_err(|e| {
        warn!("⚠️ 参与者登录失败: {}", e);
        AppError::Rejected(ErrorKind::LoginFailed)
    })?;

    store.login(response.token, Role::User)?;
    store.set_display_name(response.user.name.clone())?;
    info!("欢迎 {}", response.user.name);
    Ok(response.user.name)
}

/// 退出登录，调用方负责回到未登录界面
pub fn logout(store: &mut SessionStore) -> AppResult<()> {
    store.logout()?;
    Ok(())
}

pub fn greeting_name(session: &Session) -> &str {
    session.display_name().unwrap_or(DEFAULT_DISPLAY_NAME)
}

fn required(field: &'static str, value: &str) -> Result<String, InputError> {
    if value.trim().is_empty() {
        return Err(InputError::RequiredField(field));
    }
    Ok(value.to_string())
}
