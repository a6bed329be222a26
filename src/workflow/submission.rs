//! 作答提交状态机 - 流程层
//!
//! 状态迁移：
//!
//! ```text
//! Idle ──题目到达──▶ Editing ──submit(有答案)──▶ ConfirmPending ──confirm──▶ Submitting ──成功──▶ Submitted
//!                     ▲  │                          │                         │
//!                     │  └─submit(空答案)─▶ Editing   └──cancel──▶ Editing      └──失败──▶ Editing
//!                     └──────────────── 题目 id 变化（任意状态）────────────────────────────────┘
//! ```
//!
//! 本模块不做任何 I/O：`confirm` 只返回待发送的请求和票据，
//! 网络调用结束后再通过 `complete` 回填结果。票据与当前状态不一致的结果一律丢弃。

use tracing::{debug, info, warn};

use crate::error::{ApiResult, ErrorKind, InputError};
use crate::models::{Question, QuestionType, SubmitAnswer};
use crate::utils::logging::preview;

/// 一次提交的票据
///
/// `generation` 在每次题目切换时递增，用来识别过期的响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    question_id: String,
    generation: u64,
}

impl SubmitTicket {
    pub fn question_id(&self) -> &str {
        &self.question_id
    }
}

/// 流程状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// 没有题目
    Idle,
    /// 可以编辑答案
    Editing,
    /// 已点过一次提交，等待二次确认
    ConfirmPending,
    /// 请求在途，拒绝一切提交/确认
    Submitting(SubmitTicket),
    /// 当前题目已提交成功
    Submitted,
}

/// 当前题目的作答草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub answer: String,
    pub confirmed: bool,
    pub submitted: bool,
    pub error: Option<ErrorKind>,
}

/// 待发送的提交请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub ticket: SubmitTicket,
    pub payload: SubmitAnswer,
}

/// 网络调用结束后的结果，交回 [`SubmissionFlow::complete`]
#[derive(Debug)]
pub struct SubmitOutcome {
    pub ticket: SubmitTicket,
    pub result: ApiResult<()>,
}

/// 刷新题目后的变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionChange {
    /// 题目 id 未变，草稿保留
    Unchanged,
    /// 换了新题，草稿已重置
    Replaced,
    /// 当前没有题目了
    Cleared,
}

/// 点击"提交"按钮的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// 答案为空，不发请求
    MissingAnswer,
    /// 进入二次确认
    Armed,
    /// 当前状态下按钮不可用
    Ignored,
}

/// 回填提交结果后的结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Submitted,
    Rejected(ErrorKind),
    /// 结果属于旧题目或旧的一轮，已丢弃
    Stale,
}

/// 作答提交状态机
#[derive(Debug)]
pub struct SubmissionFlow {
    question: Option<Question>,
    state: FlowState,
    draft: Draft,
    generation: u64,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            question: None,
            state: FlowState::Idle,
            draft: Draft::default(),
            generation: 0,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// 重复提交被后端拒绝后同样视为锁定
    pub fn is_locked(&self) -> bool {
        self.state == FlowState::Submitted || self.draft.error == Some(ErrorKind::AlreadySubmitted)
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.state == FlowState::Editing && !self.is_locked()
    }

    /// 二次确认时展示的答案
    pub fn pending_answer(&self) -> Option<&str> {
        match self.state {
            FlowState::ConfirmPending => Some(&self.draft.answer),
            _ => None,
        }
    }

    /// 载入最新拉取到的当前题目
    ///
    /// 题目 id 变化时无条件丢弃草稿；同一 id 只刷新题目内容。
    pub fn load_question(&mut self, question: Option<Question>) -> QuestionChange {
        let current_id = self.question.as_ref().map(|q| q.id.clone());
        match (current_id, question) {
            (Some(current), Some(next)) if current == next.id => {
                self.question = Some(next);
                QuestionChange::Unchanged
            }
            (_, Some(next)) => {
                self.reset();
                info!("📋 新题目 #{}: {}", next.id, preview(&next.text, 60));
                self.question = Some(next);
                self.state = FlowState::Editing;
                QuestionChange::Replaced
            }
            (None, None) => QuestionChange::Unchanged,
            (Some(current), None) => {
                info!("题目 #{} 已下线", current);
                self.reset();
                QuestionChange::Cleared
            }
        }
    }

    /// 文本题输入答案
    pub fn enter_text(&mut self, text: impl Into<String>) -> Result<(), InputError> {
        self.ensure_editable(QuestionType::Text)?;
        self.draft.answer = text.into();
        Ok(())
    }

    /// 选择题选中一个选项，覆盖之前的选择
    pub fn select_option(&mut self, option: &str) -> Result<(), InputError> {
        let question = self.ensure_editable(QuestionType::Mcq)?;
        if !question.has_option(option) {
            return Err(InputError::UnknownOption(option.to_string()));
        }
        self.draft.answer = option.to_string();
        Ok(())
    }

    /// 第一次点击提交：只做校验并进入确认，不发请求
    pub fn press_submit(&mut self) -> PressOutcome {
        if !self.can_submit() {
            debug!("提交按钮不可用，当前状态: {:?}", self.state);
            return PressOutcome::Ignored;
        }
        if self.draft.answer.trim().is_empty() {
            self.draft.error = Some(ErrorKind::MissingAnswer);
            return PressOutcome::MissingAnswer;
        }
        self.draft.error = None;
        self.draft.confirmed = false;
        self.state = FlowState::ConfirmPending;
        PressOutcome::Armed
    }

    /// 取消确认，答案保留
    pub fn cancel(&mut self) -> bool {
        if self.state != FlowState::ConfirmPending {
            return false;
        }
        self.draft.confirmed = false;
        self.state = FlowState::Editing;
        true
    }

    /// 确认提交，返回唯一一个待发送请求
    ///
    /// 已在 `Submitting` 时再次确认返回 None，不会产生第二个请求。
    pub fn confirm(&mut self) -> Option<SubmitRequest> {
        if self.state != FlowState::ConfirmPending {
            debug!("忽略确认，当前状态: {:?}", self.state);
            return None;
        }
        let question = self.question.as_ref()?;
        let ticket = SubmitTicket {
            question_id: question.id.clone(),
            generation: self.generation,
        };
        self.draft.confirmed = true;
        self.state = FlowState::Submitting(ticket.clone());

        info!(
            "📤 正在提交题目 #{} 的答案: {}",
            question.id,
            preview(&self.draft.answer, 40)
        );

        Some(SubmitRequest {
            ticket,
            payload: SubmitAnswer {
                question_id: question.id.clone(),
                answer: self.draft.answer.clone(),
            },
        })
    }

    /// 回填网络调用结果
    pub fn complete(&mut self, outcome: SubmitOutcome) -> Completion {
        match &self.state {
            FlowState::Submitting(current) if *current == outcome.ticket => {}
            _ => {
                debug!(
                    "丢弃过期的提交结果: 题目 #{}",
                    outcome.ticket.question_id()
                );
                return Completion::Stale;
            }
        }

        match outcome.result {
            Ok(()) => {
                info!("✓ 题目 #{} 提交成功", outcome.ticket.question_id());
                self.draft.answer.clear();
                self.draft.error = None;
                self.draft.submitted = true;
                self.state = FlowState::Submitted;
                Completion::Submitted
            }
            Err(err) => {
                let kind = ErrorKind::from_submit_failure(&err);
                warn!(
                    "⚠️ 题目 #{} 提交失败: {} ({})",
                    outcome.ticket.question_id(),
                    kind,
                    err
                );
                self.draft.confirmed = false;
                self.draft.error = Some(kind.clone());
                self.state = FlowState::Editing;
                Completion::Rejected(kind)
            }
        }
    }

    fn ensure_editable(&self, expected: QuestionType) -> Result<&Question, InputError> {
        let question = self.question.as_ref().ok_or(InputError::NoActiveQuestion)?;
        if self.is_locked() {
            return Err(InputError::Locked);
        }
        if matches!(self.state, FlowState::ConfirmPending | FlowState::Submitting(_)) {
            return Err(InputError::Busy);
        }
        if question.kind != expected {
            return Err(InputError::WrongQuestionType {
                expected: question.kind,
            });
        }
        Ok(question)
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.question = None;
        self.draft = Draft::default();
        self.state = FlowState::Idle;
    }
}
