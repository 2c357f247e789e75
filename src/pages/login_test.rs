use super::*;
use crate::net::transport::TransportError;

#[test]
fn missing_fields_message() {
    assert_eq!(login_error_message(&LoginError::MissingFields), "Please fill in all fields.");
}

#[test]
fn invalid_credentials_show_server_detail() {
    let err = LoginError::InvalidCredentials("Incorrect username or password".into());
    assert_eq!(login_error_message(&err), "Incorrect username or password");
}

#[test]
fn transport_failure_message() {
    let err = LoginError::Transport(TransportError::Request("offline".into()));
    assert_eq!(login_error_message(&err), "Could not connect to the server.");
}

#[test]
fn unexpected_status_is_generic() {
    let err = LoginError::Status { status: 500, detail: Some("trace".into()) };
    assert_eq!(login_error_message(&err), "Login failed. Please try again.");
}

#[test]
fn redirect_waits_one_and_a_half_seconds() {
    assert_eq!(REDIRECT_DELAY.as_millis(), 1500);
}
