use axum::http::StatusCode;
use maud::{Markup, html};

use super::{error_list, layout, truncate_words};
use crate::{
    forms::FormErrors,
    models::{
        comment::{Comment, CommentView},
        news::{News, NewsListItem},
        user::User,
    },
    urls::{COMMENTS_ANCHOR, Route},
};

/// Id of the comment form, present only for logged-in visitors.
pub const COMMENT_FORM_ID: &str = "comment-form";

const PREVIEW_WORDS: usize = 10;

pub fn home(news: &[NewsListItem], user: Option<&User>) -> Markup {
    let body = html! {
        h1 { "Новости" }
        @if news.is_empty() {
            p.empty { "Новостей пока нет." }
        }
        @for item in news {
            article.news-item data-date=(item.date.to_string()) {
                h2 {
                    a href=(Route::Detail(item.id).path()) { (item.title) }
                }
                time { (item.date.format("%d.%m.%Y").to_string()) }
                p { (truncate_words(&item.text, PREVIEW_WORDS)) }
                a.comments-count href=(Route::comments_of(item.id)) {
                    "Комментариев: " (item.comments_count)
                }
            }
        }
    };

    layout("Главная", user, body)
}

/// Detail page. The comment form is rendered only for `user`s; `text` and
/// `errors` refill it after a rejected submission.
pub fn detail(
    news: &News,
    comments: &[CommentView],
    user: Option<&User>,
    text: &str,
    errors: &FormErrors,
) -> Markup {
    let body = html! {
        article.news-detail {
            h1 { (news.title) }
            time data-date=(news.date.to_string()) { (news.date.format("%d.%m.%Y").to_string()) }
            p { (news.text) }
        }
        section id=(COMMENTS_ANCHOR) {
            h2 { "Комментарии" }
            @for comment in comments {
                div.comment data-created=(comment.created.to_rfc3339()) {
                    p.meta {
                        span.author { (comment.author_username) }
                        " "
                        time { (comment.created.format("%d.%m.%Y %H:%M").to_string()) }
                    }
                    p.text { (comment.text) }
                    @if user.is_some_and(|u| u.id == comment.author_id) {
                        a.edit href=(Route::Edit(comment.id).path()) { "Редактировать" }
                        " "
                        a.delete href=(Route::Delete(comment.id).path()) { "Удалить" }
                    }
                }
            }
            @if user.is_some() {
                (comment_form(&Route::Detail(news.id).path(), text, errors, "Отправить"))
            }
        }
    };

    layout(&news.title, user, body)
}

pub fn edit_comment(comment: &Comment, user: &User, text: &str, errors: &FormErrors) -> Markup {
    let body = html! {
        h1 { "Редактирование комментария" }
        (comment_form(&Route::Edit(comment.id).path(), text, errors, "Сохранить"))
        a href=(Route::comments_of(comment.news_id)) { "Отмена" }
    };

    layout("Редактирование комментария", Some(user), body)
}

pub fn delete_comment(comment: &Comment, user: &User) -> Markup {
    let body = html! {
        h1 { "Удалить комментарий?" }
        blockquote.comment { (comment.text) }
        form #delete-form method="post" action=(Route::Delete(comment.id).path()) {
            button type="submit" { "Удалить" }
        }
        a href=(Route::comments_of(comment.news_id)) { "Отмена" }
    };

    layout("Удаление комментария", Some(user), body)
}

fn comment_form(action: &str, text: &str, errors: &FormErrors, submit: &str) -> Markup {
    html! {
        form id=(COMMENT_FORM_ID) method="post" action=(action) {
            (error_list(errors.non_field()))
            label for="id_text" { "Текст комментария" }
            textarea #id_text name="text" rows="4" { (text) }
            (error_list(errors.field("text")))
            button type="submit" { (submit) }
        }
    }
}

pub fn login(
    username: &str,
    next: Option<&str>,
    user: Option<&User>,
    errors: &FormErrors,
) -> Markup {
    let body = html! {
        h1 { "Вход" }
        form #login-form method="post" action=(Route::Login.path()) {
            (error_list(errors.non_field()))
            label for="id_username" { "Имя пользователя" }
            input #id_username type="text" name="username" value=(username);
            (error_list(errors.field("username")))
            label for="id_password" { "Пароль" }
            input #id_password type="password" name="password";
            (error_list(errors.field("password")))
            @if let Some(next) = next {
                input type="hidden" name="next" value=(next);
            }
            button type="submit" { "Войти" }
        }
        p {
            "Нет аккаунта? "
            a href=(Route::Signup.path()) { "Зарегистрируйтесь" }
        }
    };

    layout("Вход", user, body)
}

pub fn signup(username: &str, user: Option<&User>, errors: &FormErrors) -> Markup {
    let body = html! {
        h1 { "Регистрация" }
        form #signup-form method="post" action=(Route::Signup.path()) {
            (error_list(errors.non_field()))
            label for="id_username" { "Имя пользователя" }
            input #id_username type="text" name="username" value=(username);
            (error_list(errors.field("username")))
            label for="id_password1" { "Пароль" }
            input #id_password1 type="password" name="password1";
            (error_list(errors.field("password1")))
            label for="id_password2" { "Подтверждение пароля" }
            input #id_password2 type="password" name="password2";
            (error_list(errors.field("password2")))
            button type="submit" { "Зарегистрироваться" }
        }
    };

    layout("Регистрация", user, body)
}

pub fn logged_out() -> Markup {
    let body = html! {
        h1 { "Вы вышли из своей учётной записи" }
        a href=(Route::Login.path()) { "Войти снова" }
    };

    layout("Выход", None, body)
}

pub fn error(status: StatusCode, message: &str) -> Markup {
    let body = html! {
        h1 { (status.as_u16()) }
        p { (message) }
        a href=(Route::Home.path()) { "На главную" }
    };

    layout(status.canonical_reason().unwrap_or("Ошибка"), None, body)
}
