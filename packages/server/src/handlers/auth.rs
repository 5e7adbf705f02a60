use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::instrument;

use crate::config::AuthConfig;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, SessionResponse, validate_login_request};
use crate::state::AppState;
use crate::utils::jwt;

/// Handle admin login.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as the site admin",
    description = "Checks the shared admin password and, on success, sets an httpOnly session \
        cookie valid for the configured TTL (24 hours by default).",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;

    if payload.password != state.config.auth.admin_password {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        &state.config.auth.session_secret,
        state.config.auth.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    let cookie = session_cookie(&state.config.auth, token);

    Ok((jar.add(cookie), Json(LoginResponse { success: true })))
}

/// Handle admin logout.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Clears the session cookie. Succeeds whether or not a session was present.",
    responses(
        (status = 204, description = "Session cookie cleared"),
    ),
)]
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let mut removal = Cookie::from(state.config.auth.cookie_name.clone());
    removal.set_path("/");

    (jar.remove(removal), StatusCode::NO_CONTENT)
}

/// Report whether the caller holds a valid admin session.
#[utoipa::path(
    get,
    path = "/session",
    tag = "Auth",
    operation_id = "getSession",
    summary = "Check the current session",
    responses(
        (status = 200, description = "Session is valid", body = SessionResponse),
        (status = 401, description = "Unauthorized (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
    ),
    security(("session" = [])),
)]
#[instrument(skip(session), fields(subject = %session.subject))]
pub async fn session(session: AdminSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
    })
}

fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(auth.secure_cookies)
        .same_site(SameSite::Strict)
        .max_age(Duration::hours(auth.session_ttl_hours))
        .build()
}
