// src/routes.rs

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{comments, news, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * News pages and comment management (`news:*`).
/// * Account pages (`users:*`).
/// * Applies global middleware (Trace).
///
/// Paths mirror [`crate::urls::Route::path`].
pub fn create_router(state: AppState) -> Router {
    let news_routes = Router::new()
        .route("/", get(news::home))
        .route("/news/{id}/", get(news::detail).post(news::create_comment))
        .route(
            "/edit_comment/{id}/",
            get(comments::edit_comment_page).post(comments::edit_comment),
        )
        .route(
            "/delete_comment/{id}/",
            get(comments::delete_comment_page)
                .post(comments::delete_comment)
                .delete(comments::delete_comment),
        );

    let user_routes = Router::new()
        .route("/auth/login/", get(users::login_page).post(users::login))
        .route("/auth/logout/", get(users::logout).post(users::logout))
        .route("/auth/signup/", get(users::signup_page).post(users::signup));

    Router::new()
        .merge(news_routes)
        .merge(user_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
