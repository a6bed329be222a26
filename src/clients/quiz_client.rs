//! 问答平台 API 客户端
//!
//! 每个业务操作对应恰好一个 HTTP 请求

use tracing::debug;

use crate::error::ApiResult;
use crate::infrastructure::HttpTransport;
use crate::models::{
    AdminCredentials, AdminLoginResponse, NewQuestion, ParticipantCredentials,
    ParticipantLoginResponse, Question, Response, SetActiveRequest, SubmitAnswer,
};
use crate::session::Session;

/// 后端网关
///
/// 登录之外的调用都需要传入当前会话，用于附带 Bearer token。
/// 失败一律以 [`crate::error::ApiError`] 原样返回，由调用方归类。
#[allow(async_fn_in_trait)]
pub trait QuizApi {
    /// 管理员登录 `POST /admin/login`
    async fn admin_login(&self, credentials: &AdminCredentials) -> ApiResult<AdminLoginResponse>;

    /// 参与者登录 `POST /user/login`
    async fn participant_login(
        &self,
        credentials: &ParticipantCredentials,
    ) -> ApiResult<ParticipantLoginResponse>;

    /// 当前题目 `GET /user/active-question`，没有题目时为 None
    async fn active_question(&self, session: &Session) -> ApiResult<Option<Question>>;

    /// 提交答案 `POST /user/submit-response`
    async fn submit_response(&self, session: &Session, submission: &SubmitAnswer) -> ApiResult<()>;

    /// 全部题目 `GET /admin/questions`
    async fn list_questions(&self, session: &Session) -> ApiResult<Vec<Question>>;

    /// 新建题目 `POST /admin/questions`
    async fn create_question(&self, session: &Session, question: &NewQuestion) -> ApiResult<Question>;

    /// 设置当前题目 `POST /admin/setactive`
    async fn set_active_question(&self, session: &Session, question_id: &str) -> ApiResult<()>;

    /// 删除题目 `DELETE /admin/deletequestions/{id}`
    async fn delete_question(&self, session: &Session, question_id: &str) -> ApiResult<()>;

    /// 全部作答 `GET /admin/responses`
    async fn list_responses(&self, session: &Session) -> ApiResult<Vec<Response>>;
}

/// 基于 HTTP 的网关实现
pub struct QuizClient {
    transport: HttpTransport,
}

impl QuizClient {
    /// 创建新的客户端
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

impl QuizApi for QuizClient {
    async fn admin_login(&self, credentials: &AdminCredentials) -> ApiResult<AdminLoginResponse> {
        debug!("管理员登录: {}", credentials.email);
        self.transport
            .post_json("/admin/login", None, credentials)
            .await
    }

    async fn participant_login(
        &self,
        credentials: &ParticipantCredentials,
    ) -> ApiResult<ParticipantLoginResponse> {
        debug!("参与者登录: {}", credentials.identifier);
        self.transport
            .post_json("/user/login", None, credentials)
            .await
    }

    async fn active_question(&self, session: &Session) -> ApiResult<Option<Question>> {
        self.transport
            .get_json("/user/active-question", Some(session))
            .await
    }

    async fn submit_response(&self, session: &Session, submission: &SubmitAnswer) -> ApiResult<()> {
        self.transport
            .post_ack("/user/submit-response", Some(session), submission)
            .await
    }

    async fn list_questions(&self, session: &Session) -> ApiResult<Vec<Question>> {
        self.transport
            .get_json("/admin/questions", Some(session))
            .await
    }

    async fn create_question(&self, session: &Session, question: &NewQuestion) -> ApiResult<Question> {
        self.transport
            .post_json("/admin/questions", Some(session), question)
            .await
    }

    async fn set_active_question(&self, session: &Session, question_id: &str) -> ApiResult<()> {
        let request = SetActiveRequest {
            question_id: question_id.to_string(),
        };
        self.transport
            .post_ack("/admin/setactive", Some(session), &request)
            .await
    }

    async fn delete_question(&self, session: &Session, question_id: &str) -> ApiResult<()> {
        self.transport
            .delete_item("/admin/deletequestions", question_id, Some(session))
            .await
    }

    async fn list_responses(&self, session: &Session) -> ApiResult<Vec<Response>> {
        self.transport
            .get_json("/admin/responses", Some(session))
            .await
    }
}
