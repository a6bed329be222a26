//! 命令行定义

use clap::{Parser, Subcommand};

use crate::models::QuestionType;

/// quiz-desk - 工作坊问答终端
#[derive(Parser, Debug)]
#[command(name = "quiz-desk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 后端 API 根地址（覆盖 QUIZ_API_BASE_URL）
    #[arg(long)]
    pub base_url: Option<String>,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 登录
    Login {
        #[command(subcommand)]
        account: LoginCommand,
    },

    /// 退出登录并清除本地会话
    Logout,

    /// 显示当前登录身份
    Whoami,

    /// 进入参与者作答界面（交互式）
    Answer,

    /// 管理端操作
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum LoginCommand {
    /// 管理员登录
    Admin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// 参与者登录（邮箱或手机号 + 唯一编号）
    User {
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        unique_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// 列出全部题目
    Questions,

    /// 新建题目
    Create {
        /// 题干
        #[arg(long)]
        text: String,

        /// 题目类型：text 或 mcq
        #[arg(long = "type", default_value = "text")]
        kind: QuestionType,

        /// 选择题选项，可重复
        #[arg(long = "option")]
        options: Vec<String>,
    },

    /// 设为当前题目
    Activate {
        question_id: String,
    },

    /// 删除题目（需要确认）
    Delete {
        question_id: String,

        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },

    /// 列出全部作答记录
    Responses,
}
