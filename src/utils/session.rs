// src/utils/session.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::user::User, state::AppState};

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Session token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub username: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a session token for the user, valid for `expiration_seconds`.
pub fn sign_session(user: &User, secret: &str, expiration_seconds: u64) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: expiration,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies and decodes a session token.
pub fn verify_session(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// The cookie set after a successful login.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A cookie that, once added to a jar, removes the session.
pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// The visitor, if they carry a valid session for an existing user.
///
/// Never rejects: a missing, forged or expired session means "anonymous".
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(CurrentUser(None));
        };

        let claims = match verify_session(cookie.value(), &state.config.jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Ignoring invalid session: {}", e);
                return Ok(CurrentUser(None));
            }
        };

        let Ok(user_id) = claims.sub.parse::<i64>() else {
            return Ok(CurrentUser(None));
        };

        Ok(CurrentUser(User::find(&state.pool, user_id).await?))
    }
}

/// An authenticated visitor. Anonymous requests are redirected to the
/// login page with `next` pointing back at the requested URL.
#[derive(Debug, Clone)]
pub struct LoginRequired(pub User);

impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        user.map(LoginRequired).ok_or_else(|| AppError::LoginRequired {
            next: requested_url(parts),
        })
    }
}

/// Path and query of the request as the client sent it.
fn requested_url(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash::UNUSABLE_PASSWORD;

    fn user() -> User {
        User {
            id: 7,
            username: "Автор".to_string(),
            password: UNUSABLE_PASSWORD.to_string(),
        }
    }

    #[test]
    fn signed_session_round_trips() {
        let token = sign_session(&user(), "secret", 60).unwrap();
        let claims = verify_session(&token, "secret").unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "Автор");
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = sign_session(&user(), "secret", 60).unwrap();
        assert!(verify_session(&token, "other").is_err());
    }

    #[test]
    fn expired_session_is_rejected() {
        let claims = Claims {
            sub: "7".to_string(),
            username: "Автор".to_string(),
            exp: 1_000,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_session(&token, "secret").is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
