//! Authentication Handlers
//!
//! Login answers with the session token in the body and in the session
//! cookie, so browsers and API clients can both use it.

use axum::extract::State;
use axum::response::{AppendHeaders, IntoResponse};
use http::HeaderMap;
use http::header::{SET_COOKIE, USER_AGENT};
use serde::Serialize;
use shared::error::ApiResponse;
use shared::models::{LoginRequest, UserCreate};

use crate::api::{ApiJson, Created};
use crate::auth::extractor::{clear_session_cookie, session_cookie};
use crate::auth::{ClientInfo, CurrentUser, SessionToken};
use crate::error::ServiceResult;
use crate::services::users;
use crate::state::AppState;
use crate::util::now_millis;

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ServiceResult<impl IntoResponse> {
    let client = ClientInfo {
        ip_address: client_ip(&headers),
        user_agent: headers.get(USER_AGENT).and_then(|v| v.to_str().ok()),
    };
    let outcome = state
        .auth
        .login(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
            client,
            now_millis(),
        )
        .await?;

    let cookie = session_cookie(
        &state.config.session_cookie,
        &outcome.token,
        state.auth.session_lifetime_secs(),
    );
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        ApiResponse::success_with_message("Login successful", outcome),
    ))
}

/// POST /api/auth/logout - always succeeds, clears the cookie
pub async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> impl IntoResponse {
    if let Some(token) = token {
        state.auth.logout(&token);
    }
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie(&state.config.session_cookie))]),
        ApiResponse::ok_with_message("Logged out successfully"),
    )
}

/// GET /api/auth/check
pub async fn check(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResponse<AuthStatus> {
    let user = state.auth.current_user(token.as_deref(), now_millis());
    ApiResponse::success(AuthStatus {
        authenticated: user.is_some(),
        user,
    })
}

/// GET /api/auth/user
pub async fn user(user: CurrentUser) -> ApiResponse<CurrentUser> {
    ApiResponse::success(user)
}

/// POST /api/auth/register - staff account created by an authorised caller
pub async fn register(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(payload): ApiJson<UserCreate>,
) -> ServiceResult<ApiResponse<Created>> {
    let id = users::create(&state.pool, &caller, &payload).await?;
    Ok(ApiResponse::success_with_message(
        "User registered successfully",
        Created { id },
    ))
}

/// First `X-Forwarded-For` hop, else `X-Real-IP`
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(client_ip(&headers), Some("10.0.0.1"));

        headers.remove("x-forwarded-for");
        assert_eq!(client_ip(&headers), Some("10.0.0.9"));
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
