//! Server-side HTML rendering with `maud`.

use maud::{DOCTYPE, Markup, html};

use crate::{models::user::User, urls::Route};

pub mod pages;

/// Page skeleton shared by every view: navigation that depends on the
/// visitor, then the page body.
pub(crate) fn layout(title: &str, user: Option<&User>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "YaNews | " (title) }
            }
            body {
                header {
                    nav #topnav {
                        a href=(Route::Home.path()) { "Главная" }
                        @if let Some(user) = user {
                            span.username { (user.username) }
                            a href=(Route::Logout.path()) { "Выйти" }
                        } @else {
                            a href=(Route::Login.path()) { "Войти" }
                            a href=(Route::Signup.path()) { "Регистрация" }
                        }
                    }
                }
                main {
                    (body)
                }
            }
        }
    }
}

/// Error messages for one field; renders nothing when there are none.
pub(crate) fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errorlist {
                @for error in errors {
                    li { (error) }
                }
            }
        }
    }
}

/// First `limit` words of `text`, with an ellipsis when something was cut.
pub(crate) fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        words.join(" ")
    } else {
        format!("{} …", words[..limit].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_words("Просто текст.", 10), "Просто текст.");
    }

    #[test]
    fn truncate_cuts_long_text() {
        assert_eq!(truncate_words("a b c d", 2), "a b …");
    }

    #[test]
    fn layout_shows_login_links_to_anonymous() {
        let page = layout("Главная", None, html! { p { "body" } }).into_string();
        assert!(page.contains(r#"href="/auth/login/""#));
        assert!(page.contains(r#"href="/auth/signup/""#));
        assert!(!page.contains(r#"href="/auth/logout/""#));
    }

    #[test]
    fn user_content_is_escaped() {
        let markup = error_list(&["<script>".to_string()]).into_string();
        assert!(markup.contains("&lt;script&gt;"));
    }
}
