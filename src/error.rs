use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::QuestionType;
use crate::session::Role;

/// 后端用来表示"重复提交"的错误文本
pub const ALREADY_SUBMITTED_MARKER: &str = "You have already submitted a response";

/// 提交失败且后端没有给出 message 时的默认提示
pub const SUBMIT_FAILED_FALLBACK: &str = "Failed to submit response";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 会话读写错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 本地输入校验失败（不会发出网络请求）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 已分类的业务错误，直接展示给用户
    #[error("{0}")]
    Rejected(ErrorKind),
    /// HTTP 客户端初始化失败
    #[error("HTTP 客户端初始化失败: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// 后端错误响应体 `{message?, error?}`
///
/// 解析失败时得到空的 `ErrorBody`，调用方只需要看字段是否存在。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// 只认两个字段都是字符串（或缺省）的形状；任一字段类型不符时整体按空处理
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// 优先 message，其次 error
    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// 网关层错误
///
/// 网关只负责把失败原样带出来，不做业务判断；分类见 [`ErrorKind`]。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接失败、传输中断、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body:?}")]
    Status {
        endpoint: String,
        status: u16,
        body: ErrorBody,
    },
    /// 请求地址无法拼出（基础地址不合法）
    #[error("请求地址无效 ({endpoint}): {reason}")]
    InvalidUrl { endpoint: String, reason: String },
    /// 2xx 但响应体无法解析
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::InvalidUrl { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// 页面层面向用户的错误分类
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// 未填写答案，本地校验，不发请求
    #[error("Please provide an answer")]
    MissingAnswer,
    /// 非 2xx 或网络错误，允许修改后重试
    #[error("{0}")]
    SubmitFailed(String),
    /// 后端报告该题已经作答过
    #[error("You have already submitted a response to this question.")]
    AlreadySubmitted,
    /// 登录失败
    #[error("Invalid credentials. Try again.")]
    LoginFailed,
}

impl ErrorKind {
    /// 把一次提交失败归类
    pub fn from_submit_failure(err: &ApiError) -> Self {
        match err.body() {
            Some(body) if is_already_submitted(body) => ErrorKind::AlreadySubmitted,
            Some(body) => ErrorKind::SubmitFailed(
                body.message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SUBMIT_FAILED_FALLBACK.to_string()),
            ),
            None => ErrorKind::SubmitFailed(SUBMIT_FAILED_FALLBACK.to_string()),
        }
    }

    /// 该错误出现后是否还能对当前题目重试
    pub fn allows_retry(&self) -> bool {
        !matches!(self, ErrorKind::AlreadySubmitted)
    }
}

fn is_already_submitted(body: &ErrorBody) -> bool {
    [body.error.as_deref(), body.message.as_deref()]
        .into_iter()
        .flatten()
        .any(|s| s.trim() == ALREADY_SUBMITTED_MARKER)
}

/// 会话持久化与路由守卫错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("读取会话文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入会话文件失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("会话文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("会话序列化失败: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("尚未登录")]
    NotLoggedIn,
    #[error("当前角色 {actual:?} 无权访问，需要 {required}")]
    WrongRole { required: Role, actual: Option<Role> },
}

/// 本地输入被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("当前没有可作答的题目")]
    NoActiveQuestion,
    #[error("该题已无法再作答")]
    Locked,
    #[error("正在确认或提交中，请稍候")]
    Busy,
    #[error("题目类型不匹配，需要 {expected}")]
    WrongQuestionType { expected: QuestionType },
    #[error("选项不存在: {0}")]
    UnknownOption(String),
    #[error("必填字段为空: {0}")]
    RequiredField(&'static str),
    #[error("选择题至少需要一个非空选项")]
    MissingOptions,
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 网关结果类型
pub type ApiResult<T> = Result<T, ApiError>;
