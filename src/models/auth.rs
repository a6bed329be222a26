use serde::{Deserialize, Serialize};

/// 管理员登录请求体
#[derive(Serialize, Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// 参与者登录请求体，identifier 为邮箱或手机号
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCredentials {
    pub identifier: String,
    pub unique_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParticipantProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParticipantLoginResponse {
    pub token: String,
    pub user: ParticipantProfile,
}
