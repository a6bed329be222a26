mod common;

use common::{mcq_question, text_question, FakeApi};
use quiz_desk::error::{AppError, ErrorKind, InputError};
use quiz_desk::models::QuestionType;
use quiz_desk::workflow::auth::{greeting_name, login_admin, login_participant, logout};
use quiz_desk::{AdminBoard, Role, Session, SessionStore};

fn admin() -> Session {
    Session::authenticated("admin-token", Role::Admin)
}

#[tokio::test]
async fn test_participant_login_stores_token_and_name() {
    let api = FakeApi::default();
    let mut store = SessionStore::in_memory();

    let name = login_participant(&api, &mut store, "ada@example.com", "U-1")
        .await
        .unwrap();

    assert_eq!(name, "Ada");
    assert_eq!(store.token(), Some("user-token"));
    assert_eq!(store.role(), Some(Role::User));
    assert_eq!(greeting_name(store.session()), "Ada");

    logout(&mut store).unwrap();
    assert!(store.token().is_none());
    assert_eq!(greeting_name(store.session()), "User");
}

#[tokio::test]
async fn test_admin_login_sets_admin_role() {
    let api = FakeApi::default();
    let mut store = SessionStore::in_memory();

    login_admin(&api, &mut store, "root@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(store.role(), Some(Role::Admin));
    assert!(store.require(Role::Admin).is_ok());
}

#[tokio::test]
async fn test_login_rejected_by_backend() {
    let api = FakeApi {
        reject_login: true,
        ..Default::default()
    };
    let mut store = SessionStore::in_memory();

    let err = login_admin(&api, &mut store, "root@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Rejected(ErrorKind::LoginFailed)));
    assert!(store.token().is_none());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let api = FakeApi::default();
    let mut store = SessionStore::in_memory();

    let err = login_participant(&api, &mut store, "ada@example.com", " ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Input(InputError::RequiredField("unique id"))
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_create_resets_form_and_refetches() {
    let api = FakeApi::default();
    let session = admin();
    let mut board = AdminBoard::new();

    board.form.text = "Favourite colour?".to_string();
    board.form.kind = QuestionType::Mcq;
    board.form.push_option("Red");
    board.form.add_option();
    board.form.push_option("Blue");

    let created = board.create(&api, &session).await.unwrap().unwrap();
    assert_eq!(created.options, Some(vec!["Red".to_string(), "Blue".to_string()]));
    assert_eq!(board.questions().len(), 1);
    assert_eq!(board.form.text, "");
    assert_eq!(board.form.kind, QuestionType::Text);
    assert_eq!(
        api.calls(),
        vec!["create_question Favourite colour?", "list_questions"]
    );
}

#[tokio::test]
async fn test_create_with_blank_text_is_noop() {
    let api = FakeApi::default();
    let mut board = AdminBoard::new();

    assert!(board.create(&api, &admin()).await.unwrap().is_none());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_set_active_skips_already_active_question() {
    let api = FakeApi::default();
    *api.questions.lock().unwrap() = vec![text_question("q1"), mcq_question("q2", &["A"])];
    let session = admin();
    let mut board = AdminBoard::new();
    board.refresh(&api, &session).await.unwrap();

    assert!(!board.set_active(&api, &session, "q1").await.unwrap());
    assert!(board.set_active(&api, &session, "q2").await.unwrap());
    assert_eq!(board.active_question().unwrap().id, "q2");

    let calls = api.calls();
    assert_eq!(
        calls,
        vec!["list_questions", "set_active_question q2", "list_questions"]
    );
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let api = FakeApi::default();
    *api.questions.lock().unwrap() = vec![text_question("q1"), text_question("q2")];
    let session = admin();
    let mut board = AdminBoard::new();

    assert_eq!(board.confirm_delete(&api, &session).await.unwrap(), None);

    board.arm_delete("q1");
    assert_eq!(board.cancel_delete(), Some("q1".to_string()));
    assert_eq!(board.confirm_delete(&api, &session).await.unwrap(), None);
    assert!(api.calls().is_empty());

    board.arm_delete("q2");
    let deleted = board.confirm_delete(&api, &session).await.unwrap();
    assert_eq!(deleted.as_deref(), Some("q2"));
    assert!(board.pending_delete().is_none());
    assert_eq!(board.questions().len(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_pending_confirmation() {
    let api = FakeApi::default();
    let session = admin();
    let mut board = AdminBoard::new();

    board.arm_delete("missing");
    let err = board.confirm_delete(&api, &session).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(board.pending_delete(), Some("missing"));
}

#[test]
fn test_load_responses_uses_admin_session() {
    let api = FakeApi::default();
    let responses =
        tokio_test::block_on(quiz_desk::workflow::load_responses(&api, &admin())).unwrap();
    assert!(responses.is_empty());
    assert_eq!(api.calls(), vec!["list_responses"]);
}
