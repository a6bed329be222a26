use std::path::PathBuf;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 会话持久化文件（token / 角色 / 显示名）
    pub session_file: PathBuf,
    /// 参与者界面轮询当前题目的间隔（秒）
    pub poll_interval_secs: u64,
    /// 请求超时（秒），为 None 时不在客户端设置超时
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            session_file: PathBuf::from(".quiz-desk/session.toml"),
            poll_interval_secs: 5,
            request_timeout_secs: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(default.api_base_url),
            session_file: std::env::var("QUIZ_SESSION_FILE").map(PathBuf::from).unwrap_or(default.session_file),
            poll_interval_secs: std::env::var("QUIZ_POLL_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.poll_interval_secs),
            request_timeout_secs: std::env::var("QUIZ_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 用命令行参数覆盖配置
    pub fn with_overrides(mut self, api_base_url: Option<String>, verbose: bool) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        self.verbose_logging |= verbose;
        self
    }
}
