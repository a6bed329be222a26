//! 网关对真实 HTTP 的行为：路径、Bearer 头、错误体透传
//!
//! 每个测试起一个只应答一次的本地监听器。

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use quiz_desk::error::{ApiError, ErrorKind, ALREADY_SUBMITTED_MARKER};
use quiz_desk::models::{ParticipantCredentials, QuestionType, SubmitAnswer};
use quiz_desk::{Config, HttpTransport, QuizApi, QuizClient, Role, Session};

/// 应答一次后返回收到的原始请求
async fn serve_once(status_line: &'static str, body: &'static str) -> (QuizClient, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (client_for(&format!("http://{}", addr)), handle)
}

fn client_for(base_url: &str) -> QuizClient {
    let config = Config {
        api_base_url: base_url.to_string(),
        request_timeout_secs: Some(5),
        ..Config::default()
    };
    QuizClient::new(HttpTransport::new(&config).unwrap())
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn participant() -> Session {
    Session::authenticated("tok-123", Role::User)
}

#[tokio::test]
async fn test_active_question_sends_bearer_token() {
    let (client, server) = serve_once(
        "200 OK",
        r#"{"id":"q1","text":"Pick","type":"MCQ","options":["A","B"],"isActive":true}"#,
    )
    .await;

    let question = client.active_question(&participant()).await.unwrap().unwrap();
    assert_eq!(question.id, "q1");
    assert_eq!(question.kind, QuestionType::Mcq);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /user/active-question HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn test_null_active_question() {
    let (client, server) = serve_once("200 OK", "null").await;
    assert!(client.active_question(&participant()).await.unwrap().is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn test_login_has_no_authorization_header() {
    let (client, server) = serve_once(
        "200 OK",
        r#"{"token":"fresh","user":{"name":"Ada","email":"ada@example.com"}}"#,
    )
    .await;

    let response = client
        .participant_login(&ParticipantCredentials {
            identifier: "ada@example.com".to_string(),
            unique_id: "U-1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.token, "fresh");
    assert_eq!(response.user.name, "Ada");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /user/login HTTP/1.1"));
    assert!(!request.to_ascii_lowercase().contains("authorization:"));
    assert!(request.contains(r#""uniqueId":"U-1""#));
}

#[tokio::test]
async fn test_submit_conflict_surfaces_status_and_body() {
    let (client, server) = serve_once(
        "400 Bad Request",
        r#"{"error":"You have already submitted a response"}"#,
    )
    .await;

    let err = client
        .submit_response(
            &participant(),
            &SubmitAnswer {
                question_id: "q1".to_string(),
                answer: "42".to_string(),
            },
        )
        .await
        .unwrap_err();

    match &err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(*status, 400);
            assert_eq!(body.error.as_deref(), Some(ALREADY_SUBMITTED_MARKER));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(ErrorKind::from_submit_failure(&err), ErrorKind::AlreadySubmitted);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /user/submit-response HTTP/1.1"));
    assert!(request.contains(r#""questionId":"q1""#));
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let (client, server) = serve_once("204 No Content", "").await;
    let admin = Session::authenticated("admin-token", Role::Admin);

    client.delete_question(&admin, "q7").await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("DELETE /admin/deletequestions/q7 HTTP/1.1"));
}

#[tokio::test]
async fn test_delete_encodes_question_id() {
    let (client, server) = serve_once("204 No Content", "").await;
    let admin = Session::authenticated("admin-token", Role::Admin);

    client.delete_question(&admin, "a/b?c#d").await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("DELETE /admin/deletequestions/a%2Fb%3Fc%23d HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer admin-token"));
}

#[tokio::test]
async fn test_delete_failure_reports_encoded_path() {
    let (client, server) = serve_once("404 Not Found", r#"{"message":"Question not found"}"#).await;
    let admin = Session::authenticated("admin-token", Role::Admin);

    let err = client.delete_question(&admin, "q 9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.endpoint(), "/admin/deletequestions/q%209");
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client.list_questions(&participant()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.endpoint(), "/admin/questions");
    assert_eq!(
        ErrorKind::from_submit_failure(&err),
        ErrorKind::SubmitFailed("Failed to submit response".to_string())
    );
}
