//! # Quiz Desk
//!
//! 工作坊问答平台的终端客户端：管理员出题、设置当前题目；
//! 参与者登录后查看当前题目并提交唯一一次作答。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP Client），只暴露能力
//! - `HttpTransport` - 唯一的 client owner，负责 Bearer 头和错误透传
//!
//! ### ② 会话与网关（Session / Clients）
//! - `session/` - `SessionStore`，token 与角色的唯一写入口，持久化到本地文件
//! - `clients/` - `QuizApi` 网关，每个业务操作对应一个请求，失败原样返回
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 纯状态机与流程驱动
//! - `SubmissionFlow` - 作答 → 确认 → 提交 → 锁定
//! - `AdminBoard` - 题目的新建 / 设为当前 / 删除
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 终端外壳：命令解析、路由守卫、轮询与输出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{QuizApi, QuizClient};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ErrorKind};
pub use infrastructure::HttpTransport;
pub use models::{Question, QuestionType, Response};
pub use session::{Role, Session, SessionStore};
pub use workflow::{AdminBoard, SubmissionFlow};
