//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 终端外壳：解析命令、路由守卫、调度流程并输出结果。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 加载会话、创建网关客户端
//! - 需要登录的命令先检查会话与角色
//!
//! ### `participant_view` - 参与者作答界面
//! - 轮询当前题目，驱动 `SubmissionFlow`
//!
//! ### `admin_view` - 管理端命令
//! - 题目列表 / 新建 / 设为当前 / 删除 / 查看作答
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (终端界面)
//!     ↓
//! workflow (SubmissionFlow / AdminBoard / auth)
//!     ↓
//! clients (QuizApi)  ←  session (Session)
//!     ↓
//! infrastructure (HttpTransport)
//! ```

pub mod admin_view;
pub mod app;
pub mod commands;
pub mod participant_view;

pub use app::App;
pub use commands::{AdminCommand, Cli, Command, LoginCommand};
