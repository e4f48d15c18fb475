use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    forms::{CommentForm, FormErrors, WARNING},
    handlers::{ObjectId, found},
    html::pages,
    models::{comment::Comment, news::News},
    urls::Route,
    utils::session::{CurrentUser, LoginRequired},
};

/// Homepage: the freshest news, newest first.
pub async fn home(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let news = News::latest(&pool, config.news_count_on_home_page).await?;

    Ok(Html(pages::home(&news, user.as_ref()).into_string()))
}

/// A news item with its comments, oldest first.
/// Logged-in visitors also get the comment form.
pub async fn detail(
    State(pool): State<SqlitePool>,
    ObjectId(id): ObjectId,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    let news = find_news(&pool, id).await?;
    let comments = Comment::for_news(&pool, news.id).await?;

    Ok(Html(
        pages::detail(&news, &comments, user.as_ref(), "", &FormErrors::default()).into_string(),
    ))
}

/// Adds a comment to a news item.
/// Requires: Login. Rejected text re-renders the page with the form errors.
pub async fn create_comment(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    LoginRequired(user): LoginRequired,
    ObjectId(id): ObjectId,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let news = find_news(&pool, id).await?;

    let errors = match form.clean(&config.bad_words) {
        Ok(text) => {
            let comment = Comment::create(&pool, news.id, user.id, &text).await?;
            tracing::info!(
                "User {} added comment {} to news {}",
                user.username,
                comment.id,
                news.id
            );
            return Ok(found(&Route::comments_of(news.id)));
        }
        Err(errors) => errors,
    };

    if errors.field("text").iter().any(|e| e == WARNING) {
        tracing::warn!("Rejected comment with forbidden words from user {}", user.username);
    }

    let comments = Comment::for_news(&pool, news.id).await?;
    let page = pages::detail(&news, &comments, Some(&user), &form.text, &errors);

    Ok(Html(page.into_string()).into_response())
}

async fn find_news(pool: &SqlitePool, id: i64) -> Result<News, AppError> {
    News::find(pool, id)
        .await?
        .ok_or(AppError::NotFound("Новость не найдена".to_string()))
}
