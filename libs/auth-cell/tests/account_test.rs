use std::sync::Arc;

use assert_matches::assert_matches;
use tempfile::tempdir;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path};

use auth_cell::{AuthError, AuthService, SignUpForm};
use auth_cell::models::{MISSING_FIELDS, PASSWORD_MISMATCH};
use shared_session::{FileSessionStore, SessionContext};
use shared_utils::test_utils::{MockApiResponses, TestConfig, TestSession, TestUser};

#[tokio::test]
async fn test_sign_in_persists_session() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();
    let user = TestUser::new("ana");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::login_response(&user.token)))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let session = SessionContext::new(Arc::new(FileSessionStore::new(dir.path().join("session.json"))));
    let service = AuthService::new(&config, session.clone());

    service.sign_in("ana", &user.password).await.unwrap();

    assert_eq!(session.token().await, Some(user.token.clone()));
    assert_eq!(session.username().await, Some("ana".to_string()));
}

#[tokio::test]
async fn test_failed_sign_in_leaves_session_empty() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(MockApiResponses::error_response("invalid credentials")))
        .mount(&mock_server)
        .await;

    let session = TestSession::empty();
    let service = AuthService::new(&config, session.clone());

    let err = service.sign_in("ana", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "invalid credentials");
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_sign_up_validation_never_calls_server() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config, TestSession::empty());

    let err = service.sign_up(&SignUpForm::new("ana", "", "")).await.unwrap_err();
    assert_eq!(err, AuthError::Validation(MISSING_FIELDS.to_string()));

    let err = service.sign_up(&SignUpForm::new("ana", "um", "dois")).await.unwrap_err();
    assert_eq!(err, AuthError::Validation(PASSWORD_MISMATCH.to_string()));
}

#[tokio::test]
async fn test_sign_up_registers_valid_form() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::register_response("ana")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = AuthService::new(&config, TestSession::empty());
    let payload = service.sign_up(&SignUpForm::new("ana", "segredo", "segredo")).await;

    assert_matches!(payload, Ok(ref body) if body["user"]["username"] == "ana");
}

#[tokio::test]
async fn test_sign_out_clears_both_keys() {
    let user = TestUser::new("ana");
    let session = TestSession::logged_in(&user).await;
    let service = AuthService::new(&TestConfig::default().to_app_config(), session.clone());

    service.sign_out().await.unwrap();

    assert_eq!(session.token().await, None);
    assert_eq!(session.username().await, None);
}

#[tokio::test]
async fn test_sign_in_and_out_recover_from_corrupt_session_file() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();
    let user = TestUser::new("ana");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::login_response(&user.token)))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(&file, "{not json").unwrap();

    let session = SessionContext::new(Arc::new(FileSessionStore::new(&file)));
    let service = AuthService::new(&config, session.clone());
    assert!(!session.is_authenticated().await);

    service.sign_in("ana", &user.password).await.unwrap();
    assert_eq!(session.username().await, Some("ana".to_string()));

    std::fs::write(&file, "{not json").unwrap();
    service.sign_out().await.unwrap();
    assert_eq!(session.token().await, None);
}
