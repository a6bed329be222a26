use serde::{Deserialize, Serialize};
use std::fmt;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    /// 自由文本作答
    #[default]
    Text,
    /// 单选题
    Mcq,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Text => write!(f, "TEXT"),
            QuestionType::Mcq => write!(f, "MCQ"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEXT" => Ok(QuestionType::Text),
            "MCQ" => Ok(QuestionType::Mcq),
            other => Err(format!("未知题目类型: {}", other)),
        }
    }
}

/// 后端返回的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: bool,
}

impl Question {
    /// 选择题的选项，文本题返回空切片
    pub fn options(&self) -> &[String] {
        match self.kind {
            QuestionType::Mcq => self.options.as_deref().unwrap_or_default(),
            QuestionType::Text => &[],
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options().iter().any(|o| o == option)
    }
}

/// 创建题目请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<String>,
}

/// 设置当前题目请求体
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub question_id: String,
}

/// 提交答案请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswer {
    pub question_id: String,
    pub answer: String,
}
