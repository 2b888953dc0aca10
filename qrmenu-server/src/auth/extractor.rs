//! Request extractors
//!
//! The session token is read from the `Authorization: Bearer` header first,
//! then from the session cookie.

use axum::{extract::FromRequestParts, http::request::Parts};
use http::HeaderMap;
use shared::error::AppError;

use super::session::CurrentUser;
use crate::state::AppState;
use crate::util::now_millis;

/// Raw session token of the request, if any
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(session_token(
            &parts.headers,
            &state.config.session_cookie,
        )))
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = session_token(&parts.headers, &state.config.session_cookie);
        if token.is_none() {
            crate::security_log!("WARN", "auth_missing", uri = parts.uri.to_string());
        }

        let user = state
            .auth
            .require_authenticated(token.as_deref(), now_millis())?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> String {
    format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc"),
        );
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("qrmenu_session=xyz"),
        );
        assert_eq!(session_token(&headers, "qrmenu_session").as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; qrmenu_session=xyz; lang=en"),
        );
        assert_eq!(session_token(&headers, "qrmenu_session").as_deref(), Some("xyz"));
        assert_eq!(session_token(&headers, "other"), None);
        assert_eq!(session_token(&HeaderMap::new(), "qrmenu_session"), None);
    }

    #[test]
    fn test_cookie_strings() {
        let set = session_cookie("s", "t", 7200);
        assert!(set.starts_with("s=t;"));
        assert!(set.contains("HttpOnly"));
        assert!(clear_session_cookie("s").contains("Max-Age=0"));
    }
}
