//! 管理端命令 - 编排层
//!
//! 每个命令对应管理后台的一次操作，只负责调度和输出

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::clients::QuizApi;
use crate::models::{Question, QuestionType, Response};
use crate::orchestrator::commands::AdminCommand;
use crate::session::Session;
use crate::utils::logging::preview;
use crate::workflow::{load_responses, AdminBoard};

/// 执行一条管理端命令
pub async fn run<A: QuizApi>(api: &A, session: &Session, action: AdminCommand) -> Result<()> {
    let mut board = AdminBoard::new();

    match action {
        AdminCommand::Questions => {
            board
                .refresh(api, session)
                .await
                .context("Failed to load dashboard")?;
            print_questions(board.questions());
        }
        AdminCommand::Create {
            text,
            kind,
            options,
        } => {
            board.form.text = text;
            board.form.kind = kind;
            for option in options {
                board.form.push_option(option);
            }
            match board.create(api, session).await? {
                Some(created) => {
                    println!("Created question #{}", created.id);
                    print_questions(board.questions());
                }
                None => println!("Question text is required; nothing was created."),
            }
        }
        AdminCommand::Activate { question_id } => {
            board.refresh(api, session).await?;
            if board.set_active(api, session, &question_id).await? {
                println!("Question #{} is now active.", question_id);
            } else {
                println!("Question #{} is already active.", question_id);
            }
        }
        AdminCommand::Delete { question_id, yes } => {
            board.arm_delete(question_id.clone());
            if !yes && !confirm_delete_prompt(&question_id).await? {
                board.cancel_delete();
                println!("Cancelled.");
                return Ok(());
            }
            if let Some(deleted) = board.confirm_delete(api, session).await? {
                println!("Deleted question #{}.", deleted);
                print_questions(board.questions());
            }
        }
        AdminCommand::Responses => {
            let responses = load_responses(api, session)
                .await
                .context("Failed to load responses")?;
            print_responses(&responses);
        }
    }

    Ok(())
}

/// 删除前的二次确认
async fn confirm_delete_prompt(question_id: &str) -> Result<bool> {
    println!(
        "Delete question #{}? This action cannot be undone. [y/N]",
        question_id
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    info!("删除确认: {}", confirmed);
    Ok(confirmed)
}

fn print_questions(questions: &[Question]) {
    if questions.is_empty() {
        println!("No questions yet.");
        return;
    }
    for question in questions {
        let marker = if question.is_active { "*" } else { " " };
        println!(
            "{} #{} [{}] {}",
            marker,
            question.id,
            question.kind,
            preview(&question.text, 70)
        );
        if question.kind == QuestionType::Mcq {
            for (i, option) in question.options().iter().enumerate() {
                println!("      {}. {}", i + 1, option);
            }
        }
    }
}

fn print_responses(responses: &[Response]) {
    if responses.is_empty() {
        println!("No responses yet.");
        return;
    }
    for response in responses {
        println!(
            "{}  {} <{}> {}",
            response.submitted_at.format("%Y-%m-%d %H:%M:%S"),
            response.user.name,
            response.user.email,
            response.user.phone
        );
        println!("    Q: {}", preview(&response.question.text, 70));
        println!("    A: {}", response.answer);
    }
    println!("{} response(s)", responses.len());
}
