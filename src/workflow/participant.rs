//! 参与者流程驱动
//!
//! 把 [`SubmissionFlow`] 与网关串起来。状态机本身不做 I/O，
//! 这里负责发请求并把结果交回状态机。

use tracing::{debug, warn};

use crate::clients::QuizApi;
use crate::error::ApiResult;
use crate::models::Question;
use crate::session::Session;
use crate::workflow::submission::{
    Completion, QuestionChange, SubmissionFlow, SubmitOutcome, SubmitRequest,
};

/// 拉取当前题目并交给状态机，题目 id 变化时草稿会被重置
pub async fn refresh_active_question<A: QuizApi>(
    api: &A,
    session: &Session,
    flow: &mut SubmissionFlow,
) -> ApiResult<QuestionChange> {
    apply_active_question(flow, api.active_question(session).await)
}

/// 把一次拉取结果交给状态机
///
/// 拉取与载入分开，调用方可以让拉取在后台进行，结果到达时再调用本函数。
pub fn apply_active_question(
    flow: &mut SubmissionFlow,
    fetched: ApiResult<Option<Question>>,
) -> ApiResult<QuestionChange> {
    let question = fetched.map_err(|e| {
        warn!("⚠️ 获取当前题目失败: {}", e);
        e
    })?;
    let change = flow.load_question(question);
    debug!("当前题目刷新结果: {:?}", change);
    Ok(change)
}

/// 发出一次提交请求，只调用一次网关，不重试
pub async fn send_submission<A: QuizApi>(
    api: &A,
    session: &Session,
    request: SubmitRequest,
) -> SubmitOutcome {
    let result = api.submit_response(session, &request.payload).await;
    SubmitOutcome {
        ticket: request.ticket,
        result,
    }
}

/// 确认并提交（顺序调用场景）
///
/// 状态不是 `ConfirmPending` 时返回 None 且不发请求。
pub async fn confirm_and_submit<A: QuizApi>(
    api: &A,
    session: &Session,
    flow: &mut SubmissionFlow,
) -> Option<Completion> {
    let request = flow.confirm()?;
    let outcome = send_submission(api, session, request).await;
    Some(flow.complete(outcome))
}
