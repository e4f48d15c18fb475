//! Named routes.
//!
//! Every link and redirect in the site is built from a [`Route`], so route
//! paths live in one place.

use std::fmt;

use url::form_urlencoded;

/// Fragment of the detail page that holds the comments section.
pub const COMMENTS_ANCHOR: &str = "comments";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Detail(i64),
    Edit(i64),
    Delete(i64),
    Login,
    Logout,
    Signup,
}

impl Route {
    /// Namespaced route name, e.g. `news:detail`.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "news:home",
            Route::Detail(_) => "news:detail",
            Route::Edit(_) => "news:edit",
            Route::Delete(_) => "news:delete",
            Route::Login => "users:login",
            Route::Logout => "users:logout",
            Route::Signup => "users:signup",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Detail(id) => format!("/news/{id}/"),
            Route::Edit(id) => format!("/edit_comment/{id}/"),
            Route::Delete(id) => format!("/delete_comment/{id}/"),
            Route::Login => "/auth/login/".to_string(),
            Route::Logout => "/auth/logout/".to_string(),
            Route::Signup => "/auth/signup/".to_string(),
        }
    }

    /// `<detail-url>#comments` for the given news item.
    pub fn comments_of(news_id: i64) -> String {
        format!("{}#{}", Route::Detail(news_id).path(), COMMENTS_ANCHOR)
    }

    /// `<login-url>?next=<next>`. Slashes in `next` stay readable.
    pub fn login_with_next(next: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
        format!("{}?next={}", Route::Login.path(), encoded.replace("%2F", "/"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Accepts only local absolute paths as post-login targets.
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}
