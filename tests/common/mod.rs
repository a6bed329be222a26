//! 测试用的内存网关

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use quiz_desk::error::{ApiError, ApiResult, ErrorBody};
use quiz_desk::models::{
    AdminCredentials, AdminLoginResponse, NewQuestion, ParticipantCredentials,
    ParticipantLoginResponse, ParticipantProfile, Question, QuestionType, Response,
    SubmitAnswer,
};
use quiz_desk::{QuizApi, Session};

/// 记录每次调用并按预设返回结果
#[derive(Default)]
pub struct FakeApi {
    pub active: Mutex<Option<Question>>,
    pub questions: Mutex<Vec<Question>>,
    pub submit_results: Mutex<VecDeque<ApiResult<()>>>,
    pub submissions: Mutex<Vec<(Option<String>, SubmitAnswer)>>,
    pub calls: Mutex<Vec<String>>,
    pub reject_login: bool,
    /// 前 n 次 `active_question` 正常返回，之后的调用永远挂起
    pub hang_active_after: Option<usize>,
}

impl FakeApi {
    pub fn with_active(question: Question) -> Self {
        let api = Self::default();
        *api.active.lock().unwrap() = Some(question);
        api
    }

    pub fn set_active(&self, question: Option<Question>) {
        *self.active.lock().unwrap() = question;
    }

    pub fn queue_submit(&self, result: ApiResult<()>) {
        self.submit_results.lock().unwrap().push_back(result);
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

pub fn status_error(endpoint: &str, status: u16, raw_body: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status,
        body: ErrorBody::parse(raw_body),
    }
}

pub fn text_question(id: &str) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Question {}", id),
        kind: QuestionType::Text,
        options: None,
        is_active: true,
    }
}

pub fn mcq_question(id: &str, options: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Question {}", id),
        kind: QuestionType::Mcq,
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        is_active: false,
    }
}

impl QuizApi for FakeApi {
    async fn admin_login(&self, credentials: &AdminCredentials) -> ApiResult<AdminLoginResponse> {
        self.record(format!("admin_login {}", credentials.email));
        if self.reject_login {
            return Err(status_error("/admin/login", 401, r#"{"message":"Invalid"}"#));
        }
        Ok(AdminLoginResponse {
            token: "admin-token".to_string(),
        })
    }

    async fn participant_login(
        &self,
        credentials: &ParticipantCredentials,
    ) -> ApiResult<ParticipantLoginResponse> {
        self.record(format!("participant_login {}", credentials.identifier));
        if self.reject_login {
            return Err(status_error("/user/login", 401, r#"{"message":"Invalid"}"#));
        }
        Ok(ParticipantLoginResponse {
            token: "user-token".to_string(),
            user: ParticipantProfile {
                name: "Ada".to_string(),
                email: Some(credentials.identifier.clone()),
                phone: None,
            },
        })
    }

    async fn active_question(&self, _session: &Session) -> ApiResult<Option<Question>> {
        self.record("active_question");
        let served = self
            .calls()
            .iter()
            .filter(|call| *call == "active_question")
            .count();
        if self.hang_active_after.is_some_and(|n| served > n) {
            std::future::pending::<()>().await;
        }
        Ok(self.active.lock().unwrap().clone())
    }

    async fn submit_response(&self, session: &Session, submission: &SubmitAnswer) -> ApiResult<()> {
        self.record(format!("submit_response {}", submission.question_id));
        self.submissions
            .lock()
            .unwrap()
            .push((session.token().map(str::to_string), submission.clone()));
        self.submit_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn list_questions(&self, _session: &Session) -> ApiResult<Vec<Question>> {
        self.record("list_questions");
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn create_question(&self, _session: &Session, question: &NewQuestion) -> ApiResult<Question> {
        self.record(format!("create_question {}", question.text));
        let mut questions = self.questions.lock().unwrap();
        let created = Question {
            id: format!("q{}", questions.len() + 1),
            text: question.text.clone(),
            kind: question.kind,
            options: Some(question.options.clone()),
            is_active: false,
        };
        questions.push(created.clone());
        Ok(created)
    }

    async fn set_active_question(&self, _session: &Session, question_id: &str) -> ApiResult<()> {
        self.record(format!("set_active_question {}", question_id));
        for question in self.questions.lock().unwrap().iter_mut() {
            question.is_active = question.id == question_id;
        }
        Ok(())
    }

    async fn delete_question(&self, _session: &Session, question_id: &str) -> ApiResult<()> {
        self.record(format!("delete_question {}", question_id));
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != question_id);
        if questions.len() == before {
            return Err(status_error(
                "/admin/deletequestions",
                404,
                r#"{"message":"Question not found"}"#,
            ));
        }
        Ok(())
    }

    async fn list_responses(&self, _session: &Session) -> ApiResult<Vec<Response>> {
        self.record("list_responses");
        Ok(Vec::new())
    }
}
