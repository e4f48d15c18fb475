// src/handlers/users.rs

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    forms::{FormErrors, LoginForm, NON_FIELD_ERRORS, SignupForm},
    handlers::found,
    html::pages,
    models::user::User,
    urls::{Route, is_safe_redirect},
    utils::{
        hash::{hash_password, verify_password},
        session::{CurrentUser, logout_cookie, session_cookie, sign_session},
    },
};

const INVALID_LOGIN: &str = "Пожалуйста, введите правильные имя пользователя и пароль.";
const USERNAME_TAKEN: &str = "Пользователь с таким именем уже существует.";

#[derive(Debug, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}

pub async fn login_page(
    CurrentUser(user): CurrentUser,
    Query(params): Query<NextParams>,
) -> Html<String> {
    let page = pages::login("", params.next.as_deref(), user.as_ref(), &FormErrors::default());
    Html(page.into_string())
}

/// Authenticates a user and starts a session.
///
/// Verifies the username and password against the database, then stores a
/// signed session token in the session cookie and redirects to `next`
/// (local paths only) or the homepage.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    CurrentUser(current): CurrentUser,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let mut errors = form.check();

    if errors.is_empty() {
        let user = User::find_by_username(&pool, form.username.trim()).await?;

        match user {
            Some(user) if verify_password(&form.password, &user.password) => {
                let token = sign_session(&user, &config.jwt_secret, config.jwt_expiration)?;
                let target = form
                    .next
                    .as_deref()
                    .filter(|next| is_safe_redirect(next))
                    .map(str::to_string)
                    .unwrap_or_else(|| Route::Home.path());

                tracing::info!("User {} logged in", user.username);
                return Ok((jar.add(session_cookie(token)), found(&target)).into_response());
            }
            _ => {
                tracing::info!("Failed login attempt for {}", form.username);
                errors.add(NON_FIELD_ERRORS, INVALID_LOGIN);
            }
        }
    }

    let page = pages::login(&form.username, form.next.as_deref(), current.as_ref(), &errors);
    Ok(Html(page.into_string()).into_response())
}

/// Ends the session and says so.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(logout_cookie()), Html(pages::logged_out().into_string()))
}

pub async fn signup_page(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(pages::signup("", user.as_ref(), &FormErrors::default()).into_string())
}

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it, then sends the
/// visitor to the login page.
pub async fn signup(
    State(pool): State<SqlitePool>,
    CurrentUser(current): CurrentUser,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let mut errors = form.check();
    let username = form.username.trim();

    if errors.field("username").is_empty()
        && User::find_by_username(&pool, username).await?.is_some()
    {
        errors.add("username", USERNAME_TAKEN);
    }

    if errors.is_empty() {
        let hashed_password = hash_password(&form.password1)?;

        match User::create(&pool, username, &hashed_password).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.username);
                return Ok(found(&Route::Login.path()));
            }
            // Lost a race with a concurrent signup for the same name
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                errors.add("username", USERNAME_TAKEN);
            }
            Err(e) => {
                tracing::error!("Failed to register user: {:?}", e);
                return Err(AppError::from(e));
            }
        }
    }

    let page = pages::signup(&form.username, current.as_ref(), &errors);
    Ok(Html(page.into_string()).into_response())
}
