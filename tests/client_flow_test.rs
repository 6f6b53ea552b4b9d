/// End-to-end client flow against a mock consultations API:
/// sign-up, login, empty list, booking, list again, logout.
use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{header, method, path, query_param};

use auth_cell::{AuthService, SignUpForm};
use consultation_cell::{
    BookingService, ConsultationClient, DateWindow, DoctorCatalog, ScheduleForm, SchedulingConfig,
};
use shared_models::error::AppError;
use shared_session::{FileSessionStore, SessionContext};
use shared_utils::test_utils::{MockApiResponses, TestConfig, TestUser};

#[tokio::test]
async fn test_full_booking_flow() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_api_url(mock_server.uri()).to_app_config();
    let user = TestUser::new("joana").with_id(21);

    let dir = tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let session = SessionContext::new(Arc::new(FileSessionStore::new(&session_file)));

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::register_response("joana")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::login_response(&user.token)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bearer = format!("Bearer {}", user.token);

    Mock::given(method("GET"))
        .and(path("/consultations"))
        .and(query_param("username", "joana"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::consultations_response(vec![])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = AuthService::new(&config, session.clone());
    auth.sign_up(&SignUpForm::new("joana", &user.password, &user.password)).await.unwrap();
    auth.sign_in("joana", &user.password).await.unwrap();

    // A fresh handle on the same file sees the stored session.
    let reopened = SessionContext::new(Arc::new(FileSessionStore::new(&session_file)));
    assert_eq!(reopened.username().await.as_deref(), Some("joana"));

    let consultations = ConsultationClient::new(&config, reopened.clone());
    assert!(consultations.get_consultations().await.unwrap().is_empty());

    let window = DateWindow::current(&SchedulingConfig::default());
    let day = window.min_day().succ_opt().unwrap();
    let booked_date = window.calendar_day(day);
    let booked_iso = shared_utils::dates::to_iso_millis(&booked_date);

    Mock::given(method("POST"))
        .and(path("/auth/get-user"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockApiResponses::user_response(&user)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/consultations"))
        .and(header("Authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockApiResponses::consultation_response(
            1, &user, &booked_iso, "Dra. Camila Costa", "Clínico Geral",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut form = ScheduleForm::new(Arc::new(DoctorCatalog::default()), window);
    form.select_specialty("Clínico Geral").unwrap();
    form.select_doctor("Dra. Camila Costa").unwrap();
    form.select_calendar_day(day).unwrap();

    let booking = BookingService::new(&config, reopened.clone());
    let confirmation = booking.submit(&form).await.unwrap();
    assert_eq!(confirmation.consultation.date, booked_date);
    assert_eq!(confirmation.summary.date, shared_utils::dates::format_short_pt_br(day));

    Mock::given(method("GET"))
        .and(path("/consultations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consultations": [MockApiResponses::consultation_response(
                1, &user, &booked_iso, "Dra. Camila Costa", "Clínico Geral",
            )]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let listed = consultations.get_consultations().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].doctor, "Dra. Camila Costa");

    auth.sign_out().await.unwrap();

    let err: AppError = consultations.get_consultations().await.unwrap_err().into();
    assert!(err.requires_login());
}
