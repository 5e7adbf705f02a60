use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Verified admin session extracted from the session cookie.
///
/// Add this as a handler parameter to require an authenticated admin.
pub struct AdminSession {
    pub subject: String,
}

impl<S> FromRequestParts<S> for AdminSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AppState::from_ref(state).config.auth;

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&auth.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::SessionMissing)?;

        let claims =
            jwt::verify(&token, &auth.session_secret).map_err(|_| AppError::SessionInvalid)?;

        Ok(AdminSession {
            subject: claims.sub,
        })
    }
}
