//! 应用入口 - 编排层
//!
//! 持有配置、会话存储和网关客户端，按命令分发到各界面；
//! 需要登录的界面先经过路由守卫。

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::clients::QuizClient;
use crate::config::Config;
use crate::infrastructure::HttpTransport;
use crate::orchestrator::commands::{Command, LoginCommand};
use crate::orchestrator::participant_view::Exit;
use crate::orchestrator::{admin_view, participant_view};
use crate::session::{Role, SessionStore};
use crate::utils::logging::log_startup;
use crate::workflow::auth;

/// 应用主结构
pub struct App {
    config: Config,
    store: SessionStore,
    client: QuizClient,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = SessionStore::open(&config.session_file)
            .with_context(|| format!("无法加载会话文件: {}", config.session_file.display()))?;
        let transport = HttpTransport::new(&config)?;

        Ok(Self {
            config,
            store,
            client: QuizClient::new(transport),
        })
    }

    /// 执行一条命令
    pub async fn run(mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { account } => self.login(account).await,
            Command::Logout => {
                auth::logout(&mut self.store)?;
                println!("Logged out.");
                Ok(())
            }
            Command::Whoami => {
                self.whoami();
                Ok(())
            }
            Command::Answer => self.answer().await,
            Command::Admin { action } => {
                let session = self
                    .store
                    .require(Role::Admin)
                    .context("请先以管理员身份登录: quiz-desk login admin")?;
                admin_view::run(&self.client, session, action).await
            }
        }
    }

    async fn login(&mut self, account: LoginCommand) -> Result<()> {
        match account {
            LoginCommand::Admin { email, password } => {
                auth::login_admin(&self.client, &mut self.store, &email, &password).await?;
                println!("Signed in as admin.");
            }
            LoginCommand::User {
                identifier,
                unique_id,
            } => {
                let name =
                    auth::login_participant(&self.client, &mut self.store, &identifier, &unique_id)
                        .await?;
                println!("Welcome back, {}", name);
            }
        }
        Ok(())
    }

    fn whoami(&self) {
        let session = self.store.session();
        match session.role() {
            Some(role) if session.is_authenticated() => {
                println!("{} ({})", auth::greeting_name(session), role);
            }
            _ => println!("Not signed in."),
        }
    }

    async fn answer(&mut self) -> Result<()> {
        let session = self
            .store
            .require(Role::User)
            .context("请先以参与者身份登录: quiz-desk login user")?
            .clone();

        let poll_interval = Duration::from_secs(self.config.poll_interval_secs.max(1));
        info!("⏱ 每 {} 秒刷新一次当前题目", poll_interval.as_secs());

        let exit = participant_view::run(&self.client, &session, poll_interval).await?;
        if exit == Exit::Logout {
            auth::logout(&mut self.store)?;
            println!("Logged out.");
        }
        Ok(())
    }
}
