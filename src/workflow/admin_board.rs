//! 管理端题目管理流程
//!
//! 读（题目列表）+ 三种写操作（新建 / 设为当前 / 删除），
//! 每次写成功后重新拉取列表。删除需要先选中再确认。

use tracing::{error, info};

use crate::clients::QuizApi;
use crate::error::{ApiResult, AppResult, InputError};
use crate::models::{NewQuestion, Question, QuestionType, Response};
use crate::session::Session;

/// 新建题目表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub text: String,
    pub kind: QuestionType,
    options: Vec<String>,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: QuestionType::Text,
            options: vec![String::new()],
        }
    }
}

impl QuestionForm {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// 追加一个空选项
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// 填入下一个选项：最后一格为空时复用，否则追加
    pub fn push_option(&mut self, value: impl Into<String>) {
        match self.options.last_mut() {
            Some(last) if last.is_empty() => *last = value.into(),
            _ => self.options.push(value.into()),
        }
    }

    /// 删除选项，至少保留一格
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= 1 || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// 生成请求体
    ///
    /// 题干为空时返回 `Ok(None)`，表示什么都不做。
    pub fn build(&self) -> Result<Option<NewQuestion>, InputError> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        let options = match self.kind {
            QuestionType::Mcq => {
                let options: Vec<String> = self
                    .options
                    .iter()
                    .filter(|opt| !opt.trim().is_empty())
                    .cloned()
                    .collect();
                if options.is_empty() {
                    return Err(InputError::MissingOptions);
                }
                options
            }
            QuestionType::Text => Vec::new(),
        };
        Ok(Some(NewQuestion {
            text: self.text.clone(),
            kind: self.kind,
            options,
        }))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 管理端题目面板
#[derive(Debug, Default)]
pub struct AdminBoard {
    questions: Vec<Question>,
    pub form: QuestionForm,
    pending_delete: Option<String>,
}

impl AdminBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.questions.iter().find(|q| q.is_active)
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// 重新拉取题目列表
    pub async fn refresh<A: QuizApi>(&mut self, api: &A, session: &Session) -> ApiResult<&[Question]> {
        self.questions = api.list_questions(session).await?;
        info!("✓ 共 {} 道题目", self.questions.len());
        Ok(&self.questions)
    }

    /// 按表单新建题目，成功后清空表单并刷新列表
    ///
    /// 题干为空时不发请求，返回 `Ok(None)`。
    pub async fn create<A: QuizApi>(&mut self, api: &A, session: &Session) -> AppResult<Option<Question>> {
        let Some(new_question) = self.form.build()? else {
            return Ok(None);
        };

        let created = api.create_question(session, &new_question).await.map_err(|e| {
            error!("❌ 新建题目失败: {}", e);
            e
        })?;
        info!("✓ 已新建题目 #{}", created.id);

        self.form.reset();
        self.refresh(api, session).await?;
        Ok(Some(created))
    }

    /// 设为当前题目；已经是当前题目时不发请求，返回 false
    pub async fn set_active<A: QuizApi>(
        &mut self,
        api: &A,
        session: &Session,
        question_id: &str,
    ) -> AppResult<bool> {
        let already_active = self
            .questions
            .iter()
            .any(|q| q.id == question_id && q.is_active);
        if already_active {
            info!("题目 #{} 已是当前题目", question_id);
            return Ok(false);
        }

        api.set_active_question(session, question_id).await.map_err(|e| {
            error!("❌ 设置当前题目失败: {}", e);
            e
        })?;
        info!("✓ 当前题目已切换为 #{}", question_id);

        self.refresh(api, session).await?;
        Ok(true)
    }

    /// 选中待删除的题目，等待确认
    pub fn arm_delete(&mut self, question_id: impl Into<String>) {
        self.pending_delete = Some(question_id.into());
    }

    pub fn cancel_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// 确认删除；没有选中题目时返回 `Ok(None)`
    ///
    /// 删除失败时保留选中状态，可以再次确认。
    pub async fn confirm_delete<A: QuizApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> AppResult<Option<String>> {
        let Some(question_id) = self.pending_delete.clone() else {
            return Ok(None);
        };

        api.delete_question(session, &question_id).await.map_err(|e| {
            error!("❌ 删除题目 #{} 失败: {}", question_id, e);
            e
        })?;
        info!("✓ 已删除题目 #{}", question_id);

        self.pending_delete = None;
        self.refresh(api, session).await?;
        Ok(Some(question_id))
    }
}

/// 拉取全部作答记录
pub async fn load_responses<A: QuizApi>(api: &A, session: &Session) -> ApiResult<Vec<Response>> {
    let responses = api.list_responses(session).await?;
    info!("✓ 共 {} 条作答记录", responses.len());
    Ok(responses)
}
