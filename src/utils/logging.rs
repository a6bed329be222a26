//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// RUST_LOG 优先；否则默认 `info`，详细模式下为 `debug`。
/// 重复调用时忽略，方便测试中多次初始化。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 quiz-desk 启动");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("💾 会话文件: {}", config.session_file.display());
    info!("{}", "=".repeat(60));
}

/// 单行预览：换行和连续空白压成一个空格，超过 `max_chars` 个字符时截断并加 `...`
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
