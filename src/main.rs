use anyhow::Result;
use clap::Parser;
use quiz_desk::orchestrator::{App, Cli};
use quiz_desk::utils::logging;
use quiz_desk::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env().with_overrides(cli.base_url, cli.verbose);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run(cli.command).await
}
