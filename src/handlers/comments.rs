use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    forms::{CommentForm, FormErrors},
    handlers::{ObjectId, found},
    html::pages,
    models::{comment::Comment, user::User},
    urls::Route,
    utils::session::LoginRequired,
};

/// Edit form, pre-filled with the current text.
/// Requires: Login + Author.
pub async fn edit_comment_page(
    State(pool): State<SqlitePool>,
    LoginRequired(user): LoginRequired,
    ObjectId(id): ObjectId,
) -> Result<Html<String>, AppError> {
    let comment = own_comment(&pool, id, &user).await?;

    Ok(Html(
        pages::edit_comment(&comment, &user, &comment.text, &FormErrors::default()).into_string(),
    ))
}

/// Replaces the text of a comment.
/// Requires: Login + Author. `created` is kept.
pub async fn edit_comment(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    LoginRequired(user): LoginRequired,
    ObjectId(id): ObjectId,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let comment = own_comment(&pool, id, &user).await?;

    match form.clean(&config.bad_words) {
        Ok(text) => {
            Comment::update_text(&pool, comment.id, &text).await?;
            tracing::info!("User {} edited comment {}", user.username, comment.id);
            Ok(found(&Route::comments_of(comment.news_id)))
        }
        Err(errors) => {
            tracing::warn!("Rejected edit of comment {} by {}", comment.id, user.username);
            let page = pages::edit_comment(&comment, &user, &form.text, &errors);
            Ok(Html(page.into_string()).into_response())
        }
    }
}

/// Confirmation page.
/// Requires: Login + Author.
pub async fn delete_comment_page(
    State(pool): State<SqlitePool>,
    LoginRequired(user): LoginRequired,
    ObjectId(id): ObjectId,
) -> Result<Html<String>, AppError> {
    let comment = own_comment(&pool, id, &user).await?;

    Ok(Html(pages::delete_comment(&comment, &user).into_string()))
}

/// Deletes a comment (POST from the confirmation page, or DELETE).
/// Requires: Login + Author.
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    LoginRequired(user): LoginRequired,
    ObjectId(id): ObjectId,
) -> Result<Response, AppError> {
    let comment = own_comment(&pool, id, &user).await?;

    Comment::delete(&pool, comment.id).await.map_err(|e| {
        tracing::error!("Failed to delete comment: {:?}", e);
        AppError::from(e)
    })?;
    tracing::info!("User {} deleted comment {}", user.username, comment.id);

    Ok(found(&Route::comments_of(comment.news_id)))
}

/// Fetches a comment and checks that `user` wrote it.
/// Someone else's comment is reported exactly like a missing one.
async fn own_comment(pool: &SqlitePool, id: i64, user: &User) -> Result<Comment, AppError> {
    let not_found = || AppError::NotFound("Комментарий не найден".to_string());

    let comment = Comment::find(pool, id).await?.ok_or_else(not_found)?;

    if comment.author_id != user.id {
        tracing::warn!(
            "User {} is not the author of comment {}",
            user.username,
            comment.id
        );
        return Err(not_found());
    }

    Ok(comment)
}
