use super::*;

// =============================================================
// Server-side normalization
// =============================================================

#[test]
fn server_error_takes_message_from_json_body() {
    let err = normalize_server(401, r#"{"message": "Invalid credentials"}"#);
    assert_eq!(err, ApiError::Server { message: "Invalid credentials".to_string(), status: 401 });
}

#[test]
fn server_error_falls_back_when_body_is_not_json() {
    let err = normalize_server(500, "<html>Internal Server Error</html>");
    assert_eq!(err, ApiError::Server { message: SERVER_ERROR_FALLBACK.to_string(), status: 500 });
}

#[test]
fn server_error_falls_back_when_json_has_no_message() {
    let err = normalize_server(404, r#"{"error": "nope"}"#);
    assert_eq!(err, ApiError::Server { message: SERVER_ERROR_FALLBACK.to_string(), status: 404 });
}

#[test]
fn server_error_falls_back_when_message_is_not_a_string() {
    let err = normalize_server(422, r#"{"message": 17}"#);
    assert_eq!(err, ApiError::Server { message: SERVER_ERROR_FALLBACK.to_string(), status: 422 });
}

// =============================================================
// Transport-side normalization
// =============================================================

#[test]
fn builder_failure_normalizes_to_request_setup() {
    let err = reqwest::Client::new().get("http://[not-a-host").build().unwrap_err();
    assert!(err.is_builder());
    assert_eq!(
        normalize_transport(&err),
        ApiError::RequestSetup { message: REQUEST_SETUP_MESSAGE.to_string() }
    );
}

#[tokio::test]
async fn connect_failure_normalizes_to_no_response() {
    // Port 1 on loopback: nothing listens, the connect is refused.
    let err = reqwest::Client::new()
        .get("http://127.0.0.1:1/")
        .send()
        .await
        .unwrap_err();
    assert_eq!(
        normalize_transport(&err),
        ApiError::NoResponse { message: NO_RESPONSE_MESSAGE.to_string() }
    );
}

// =============================================================
// User-facing messages
// =============================================================

#[test]
fn user_message_prefers_server_text() {
    let err = ApiError::Server { message: "profile incomplete".to_string(), status: 400 };
    assert_eq!(err.user_message(), "profile incomplete");
    assert_eq!(err.status(), Some(400));
}

#[test]
fn user_message_uses_fixed_text_without_a_response() {
    let err = ApiError::NoResponse { message: NO_RESPONSE_MESSAGE.to_string() };
    assert_eq!(err.user_message(), NO_RESPONSE_MESSAGE);
    assert_eq!(err.status(), None);
}
