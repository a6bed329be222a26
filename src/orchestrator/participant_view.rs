//! 参与者作答界面 - 编排层
//!
//! 单任务事件循环，同时等待四类事件：
//! - 轮询定时器到点
//! - 当前题目拉取返回
//! - 在途提交请求返回
//! - 终端输入
//!
//! 拉取和提交都作为 future 挂在循环上，任何一个请求迟迟不返回都不会挡住输入。
//! 同一时间最多一个拉取在途；题目在提交途中被切换时，迟到的结果由状态机丢弃。

use anyhow::Result;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::clients::QuizApi;
use crate::error::ApiResult;
use crate::models::{Question, QuestionType};
use crate::session::Session;
use crate::workflow::auth::greeting_name;
use crate::workflow::{
    apply_active_question, send_submission, Completion, FlowState, PressOutcome, QuestionChange,
    SubmissionFlow, SubmitOutcome,
};

type Fetch<'a> = LocalBoxFuture<'a, ApiResult<Option<Question>>>;

/// 交互结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Logout,
}

/// 终端输入解析后的动作
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Answer(String),
    Choose(String),
    Submit,
    Confirm,
    Cancel,
    Refresh,
    Show,
    Help,
    Logout,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let input = match head.to_ascii_lowercase().as_str() {
        "answer" | "a" => Input::Answer(rest.to_string()),
        "choose" | "c" => Input::Choose(rest.to_string()),
        "submit" | "s" => Input::Submit,
        "confirm" | "yes" | "y" => Input::Confirm,
        "cancel" | "no" | "n" => Input::Cancel,
        "refresh" | "r" => Input::Refresh,
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "logout" => Input::Logout,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

/// 循环每一轮等到的事件
enum Event {
    Tick,
    Fetched(ApiResult<Option<Question>>),
    Completed(SubmitOutcome),
    Line(Option<String>),
}

/// 作答界面
///
/// 持有状态机、在途的题目拉取和在途的提交请求。
pub struct ParticipantView<'a, A> {
    api: &'a A,
    session: &'a Session,
    flow: SubmissionFlow,
    fetch: Option<Fetch<'a>>,
    /// 下一次拉取结果即使题目没变也要重新显示（手动刷新）
    force_render: bool,
    inflight: FuturesUnordered<LocalBoxFuture<'a, SubmitOutcome>>,
}

impl<'a, A: QuizApi + 'a> ParticipantView<'a, A> {
    pub fn new(api: &'a A, session: &'a Session) -> Self {
        Self {
            api,
            session,
            flow: SubmissionFlow::new(),
            fetch: None,
            force_render: false,
            inflight: FuturesUnordered::new(),
        }
    }

    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    /// 是否有题目拉取在途
    pub fn is_fetching(&self) -> bool {
        self.fetch.is_some()
    }

    /// 在途提交请求数
    pub fn submits_in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// 运行事件循环，直到输入结束、退出或登出
    ///
    /// # 参数
    /// - `input`: 按行读取的命令来源，终端下为 stdin
    /// - `poll_interval`: 轮询当前题目的间隔
    pub async fn run<R: AsyncBufRead + Unpin>(
        &mut self,
        input: R,
        poll_interval: Duration,
    ) -> Result<Exit> {
        let mut lines = input.lines();
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        println!("Welcome back, {}", greeting_name(self.session));
        print_help();

        loop {
            let event = tokio::select! {
                biased;
                _ = ticker.tick() => Event::Tick,
                fetched = next_fetch(&mut self.fetch) => Event::Fetched(fetched),
                Some(outcome) = self.inflight.next(), if !self.inflight.is_empty() => {
                    Event::Completed(outcome)
                }
                line = lines.next_line() => Event::Line(line?),
            };

            if let Some(exit) = self.handle(event) {
                if !self.inflight.is_empty() {
                    debug!("退出时仍有 {} 个提交请求在途，结果将被忽略", self.inflight.len());
                }
                return Ok(exit);
            }
        }
    }

    fn handle(&mut self, event: Event) -> Option<Exit> {
        match event {
            Event::Tick => self.start_fetch(false),
            Event::Fetched(fetched) => {
                self.fetch = None;
                let forced = std::mem::take(&mut self.force_render);
                match apply_active_question(&mut self.flow, fetched) {
                    Ok(QuestionChange::Unchanged) if !forced => {}
                    Ok(_) => render(&self.flow),
                    Err(_) => println!("Failed to load question"),
                }
            }
            Event::Completed(outcome) => {
                let completion = self.flow.complete(outcome);
                render_completion(&completion, &self.flow);
            }
            Event::Line(None) => {
                debug!("输入结束");
                return Some(Exit::Quit);
            }
            Event::Line(Some(line)) => {
                return parse_input(&line).and_then(|input| self.handle_input(input));
            }
        }
        None
    }

    /// 发起一次拉取；上一次还没返回时不再重复发
    fn start_fetch(&mut self, forced: bool) {
        self.force_render |= forced;
        if self.fetch.is_some() {
            debug!("上一次拉取尚未返回，跳过本轮");
            return;
        }
        let (api, session) = (self.api, self.session);
        self.fetch = Some(api.active_question(session).boxed_local());
    }

    fn handle_input(&mut self, input: Input) -> Option<Exit> {
        let flow = &mut self.flow;
        match input {
            Input::Answer(text) => match flow.enter_text(text) {
                Ok(()) => println!("Answer updated."),
                Err(e) => println!("{}", e),
            },
            Input::Choose(choice) => {
                let option = resolve_choice(flow, &choice);
                match flow.select_option(&option) {
                    Ok(()) => println!("Selected: {}", option),
                    Err(e) => println!("{}", e),
                }
            }
            Input::Submit => match flow.press_submit() {
                PressOutcome::Armed => render_confirm(flow),
                PressOutcome::MissingAnswer => render_error(flow),
                PressOutcome::Ignored => println!("Submit is not available right now."),
            },
            Input::Confirm => match flow.confirm() {
                Some(request) => {
                    println!("Submitting...");
                    let (api, session) = (self.api, self.session);
                    self.inflight
                        .push(send_submission(api, session, request).boxed_local());
                }
                None => println!("Nothing to confirm."),
            },
            Input::Cancel => {
                if flow.cancel() {
                    println!("Submission cancelled. Your answer is kept.");
                }
            }
            Input::Refresh => self.start_fetch(true),
            Input::Show => render(flow),
            Input::Help => print_help(),
            Input::Logout => return Some(Exit::Logout),
            Input::Quit => return Some(Exit::Quit),
            Input::Unknown(text) => println!("Unknown command: {} (type `help`)", text),
        }
        None
    }
}

/// 等待在途的拉取；没有拉取时永远不就绪
async fn next_fetch(slot: &mut Option<Fetch<'_>>) -> ApiResult<Option<Question>> {
    match slot {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

/// 从 stdin 读取命令运行作答界面
pub async fn run<A: QuizApi>(api: &A, session: &Session, poll_interval: Duration) -> Result<Exit> {
    let stdin = BufReader::new(tokio::io::stdin());
    ParticipantView::new(api, session)
        .run(stdin, poll_interval)
        .await
}

/// 选项可以用序号（从 1 开始）或原文指定
fn resolve_choice(flow: &SubmissionFlow, choice: &str) -> String {
    let options = flow.question().map(|q| q.options()).unwrap_or_default();
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| choice.to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  answer <text>    write your answer (text questions)");
    println!("  choose <n|text>  select an option (multiple choice)");
    println!("  submit           review your answer before sending");
    println!("  confirm | cancel confirm or cancel the pending submission");
    println!("  refresh | show   reload or redisplay the active question");
    println!("  logout | quit");
}

fn render(flow: &SubmissionFlow) {
    let Some(question) = flow.question() else {
        println!();
        println!("No Active Questions");
        println!("There are currently no questions available to answer.");
        return;
    };

    println!();
    println!("Active Question");
    println!("{}", question.text);
    match question.kind {
        QuestionType::Text => {
            if !flow.draft().answer.is_empty() {
                println!("Your Response: {}", flow.draft().answer);
            }
        }
        QuestionType::Mcq => {
            for (i, option) in question.options().iter().enumerate() {
                let marker = if flow.draft().answer == *option { "(x)" } else { "( )" };
                println!("  {} {}. {}", marker, i + 1, option);
            }
        }
    }

    match flow.state() {
        FlowState::ConfirmPending => render_confirm(flow),
        FlowState::Submitting(_) => println!("Submitting..."),
        FlowState::Submitted => println!("Successfully Submitted"),
        FlowState::Idle | FlowState::Editing => render_error(flow),
    }
}

fn render_confirm(flow: &SubmissionFlow) {
    let Some(answer) = flow.pending_answer() else {
        return;
    };
    println!("Confirm Submission");
    println!("Are you sure you want to submit this answer? Once submitted, you cannot change your response.");
    match flow.question().map(|q| q.kind) {
        Some(QuestionType::Text) => println!("Your Answer: \"{}\"", answer),
        _ => println!("Your Answer: {}", answer),
    }
    println!("Type `confirm` to submit or `cancel` to go back.");
}

fn render_error(flow: &SubmissionFlow) {
    if let Some(error) = &flow.draft().error {
        println!("{}", error);
    }
}

fn render_completion(completion: &Completion, flow: &SubmissionFlow) {
    match completion {
        Completion::Submitted => println!("Your response has been submitted successfully!"),
        Completion::Rejected(_) => render_error(flow),
        Completion::Stale => debug!("提交结果已过期，忽略"),
    }
}
