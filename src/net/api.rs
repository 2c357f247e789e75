//! Typed REST calls against the PPR backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login is the one unauthenticated call and goes straight through the raw
//! transport. Every other call runs through
//! [`SessionContext::authenticated_fetch`], so the bearer header and the 401
//! teardown are applied uniformly.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses become `Status` errors carrying the backend's `detail`
//! text when it sent one. A 401 on an authenticated call has already cleared
//! the session and navigated away by the time `SessionExpired` comes back;
//! callers only need to stop.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::transport::{HttpRequest, HttpResponse, Method, RequestOptions, TransportError};
use super::types::{
    ErrorBody, LoginResponse, Ppr, PprAvance, PprAvanceFields, PprCreate, PprFilter, PprMeta, PprMetaFields,
    PprUpdate, PprValidationError, UserProfile,
};
use crate::session::{AuthOutcome, FetchError, SessionContext};

const LOGIN_PATH: &str = "/auth/login";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// =============================================================================
// ENDPOINTS
// =============================================================================

fn pprs_path(filter: &PprFilter) -> String {
    let query = filter.query_string();
    if query.is_empty() { "/ppr/".to_owned() } else { format!("/ppr/?{query}") }
}

fn ppr_path(id: i64) -> String {
    format!("/ppr/{id}")
}

fn metas_path(id: i64) -> String {
    format!("/ppr/{id}/metas")
}

fn avances_path(id: i64) -> String {
    format!("/ppr/{id}/avances")
}

fn login_form_body(username: &str, password: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("username", username)
        .append_pair("password", password)
        .finish()
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

// =============================================================================
// LOGIN / LOGOUT
// =============================================================================

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Username or password was blank. Nothing was sent.
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("login failed with status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected login response: {0}")]
    Decode(String),
}

/// Require both fields to be non-blank. The username is trimmed; the
/// password is returned exactly as typed.
///
/// # Errors
///
/// [`LoginError::MissingFields`] if either value is blank.
pub fn validate_login_input(username: &str, password: &str) -> Result<(String, String), LoginError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(LoginError::MissingFields);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Exchange credentials for a token and start the session.
///
/// # Errors
///
/// See [`LoginError`]. The session is left untouched on any error.
pub async fn login(session: &SessionContext, username: &str, password: &str) -> Result<UserProfile, LoginError> {
    let (username, password) = validate_login_input(username, password)?;
    let options = RequestOptions::new(Method::Post)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .body(login_form_body(&username, &password));
    let request = HttpRequest::new(session.config().endpoint(LOGIN_PATH), options);

    let resp = session.transport().send(request).await?;
    match resp.status {
        200..=299 => {}
        401 => {
            let detail = ErrorBody::detail_from(&resp.body).unwrap_or_else(|| "Incorrect username or password".to_owned());
            log::info!("login rejected for {username}");
            return Err(LoginError::InvalidCredentials(detail));
        }
        status => return Err(LoginError::Status { status, detail: ErrorBody::detail_from(&resp.body) }),
    }

    let body: LoginResponse = resp.json().map_err(|e| LoginError::Decode(e.to_string()))?;
    let profile = body.profile();
    session.start_session(&body.access_token, &profile);
    Ok(profile)
}

/// Clear the session and return to the entry page.
pub fn logout(session: &SessionContext) {
    session.end_session();
}

// =============================================================================
// AUTHENTICATED CALLS
// =============================================================================

/// Failures of authenticated REST calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    MissingCredential,

    /// The server rejected the token; the session is already cleared.
    #[error("session expired")]
    SessionExpired,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request failed with status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("request body could not be encoded: {0}")]
    Encode(String),

    #[error(transparent)]
    Invalid(#[from] PprValidationError),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::MissingCredential => Self::MissingCredential,
            FetchError::Transport(e) => Self::Transport(e),
        }
    }
}

impl ApiError {
    /// Whether the caller should stop without showing an error (the page is
    /// already navigating away).
    #[must_use]
    pub fn is_session_loss(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::MissingCredential)
    }
}

async fn send(session: &SessionContext, path: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
    let url = session.config().endpoint(path);
    match session.authenticated_fetch(&url, options).await? {
        AuthOutcome::SessionExpired => Err(ApiError::SessionExpired),
        AuthOutcome::Authorized(resp) if resp.ok() => Ok(resp),
        AuthOutcome::Authorized(resp) => {
            Err(ApiError::Status { status: resp.status, detail: ErrorBody::detail_from(&resp.body) })
        }
    }
}

async fn get_json<T: DeserializeOwned>(session: &SessionContext, path: &str) -> Result<T, ApiError> {
    let resp = send(session, path, RequestOptions::new(Method::Get)).await?;
    resp.json().map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_json<B, T>(session: &SessionContext, method: Method, path: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize + ?Sized,
    T: DeserializeOwned,
{
    let options = RequestOptions::new(method).json(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    let resp = send(session, path, options).await?;
    resp.json().map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET /ppr/` with optional paging and year filters.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_pprs(session: &SessionContext, filter: &PprFilter) -> Result<Vec<Ppr>, ApiError> {
    get_json(session, &pprs_path(filter)).await
}

/// `GET /ppr/{id}`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn get_ppr(session: &SessionContext, id: i64) -> Result<Ppr, ApiError> {
    get_json(session, &ppr_path(id)).await
}

/// `POST /ppr/` after checking required fields locally.
///
/// # Errors
///
/// [`ApiError::Invalid`] without a request when `codigo` or `nombre` is
/// blank; otherwise see [`ApiError`].
pub async fn create_ppr(session: &SessionContext, payload: &PprCreate) -> Result<Ppr, ApiError> {
    payload.validate()?;
    send_json(session, Method::Post, &pprs_path(&PprFilter::default()), payload).await
}

/// `PUT /ppr/{id}` with only the fields set in `payload`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn update_ppr(session: &SessionContext, id: i64, payload: &PprUpdate) -> Result<Ppr, ApiError> {
    send_json(session, Method::Put, &ppr_path(id), payload).await
}

/// `DELETE /ppr/{id}`. The response body is ignored.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn delete_ppr(session: &SessionContext, id: i64) -> Result<(), ApiError> {
    send(session, &ppr_path(id), RequestOptions::new(Method::Delete)).await?;
    Ok(())
}

/// `GET /ppr/{id}/metas`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_metas(session: &SessionContext, ppr_id: i64) -> Result<Vec<PprMeta>, ApiError> {
    get_json(session, &metas_path(ppr_id)).await
}

/// `POST /ppr/{id}/metas`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_meta(session: &SessionContext, ppr_id: i64, payload: &PprMetaFields) -> Result<PprMeta, ApiError> {
    send_json(session, Method::Post, &metas_path(ppr_id), payload).await
}

/// `GET /ppr/{id}/avances`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn list_avances(session: &SessionContext, ppr_id: i64) -> Result<Vec<PprAvance>, ApiError> {
    get_json(session, &avances_path(ppr_id)).await
}

/// `POST /ppr/{id}/avances`.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn create_avance(
    session: &SessionContext,
    ppr_id: i64,
    payload: &PprAvanceFields,
) -> Result<PprAvance, ApiError> {
    send_json(session, Method::Post, &avances_path(ppr_id), payload).await
}

/// User-facing text for an API failure.
#[must_use]
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 404, .. } => "The requested PPR no longer exists.".to_owned(),
        ApiError::Status { status: 403, .. } => "You do not have permission for this action.".to_owned(),
        ApiError::Transport(_) => "Could not reach the server. Check your connection.".to_owned(),
        other => other.to_string(),
    }
}
