use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 作答者信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// 作答记录里嵌带的题目摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub text: String,
}

/// 一条作答记录，每个 (用户, 题目) 只有一条，创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub user: Respondent,
    pub question: QuestionSummary,
    pub answer: String,
    pub submitted_at: DateTime<Utc>,
}
