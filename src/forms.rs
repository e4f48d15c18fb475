//! Submitted forms and their validation.
//!
//! Field rules are declared with `validator`; rules that depend on runtime
//! configuration (forbidden words) or on the database (unique usernames)
//! are checked by hand and recorded in the same [`FormErrors`].

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Message attached to the `text` field when a comment contains a forbidden word.
pub const WARNING: &str = "Не ругайтесь!";

/// Key for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name -> error messages, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                form_errors.add(&field.to_string(), message);
            }
        }
        form_errors
    }
}

/// Runs the declarative rules and collects their failures.
fn declared_errors<T: Validate>(form: &T) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(errors) => errors.into(),
    }
}

/// Case-insensitive substring match against the configured word list.
/// `bad_words` are expected lower-cased.
pub fn contains_bad_word(text: &str, bad_words: &[String]) -> bool {
    let lowered = text.to_lowercase();
    bad_words.iter().any(|word| !word.is_empty() && lowered.contains(word.as_str()))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Обязательное поле."))]
    pub text: String,
}

impl CommentForm {
    /// Returns the cleaned text, or the errors to show next to the form.
    pub fn clean(&self, bad_words: &[String]) -> Result<String, FormErrors> {
        let cleaned = CommentForm {
            text: self.text.trim().to_string(),
        };

        let mut errors = declared_errors(&cleaned);
        if contains_bad_word(&cleaned.text, bad_words) {
            errors.add("text", WARNING);
        }

        if errors.is_empty() {
            Ok(cleaned.text)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Обязательное поле."))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Обязательное поле."))]
    pub password: String,

    /// Where to go after a successful login.
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn check(&self) -> FormErrors {
        declared_errors(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 150,
        message = "Имя пользователя должно содержать от 1 до 150 символов."
    ))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Пароль должен содержать не менее 8 символов."))]
    pub password1: String,

    #[serde(default)]
    #[validate(must_match(other = "password1", message = "Введенные пароли не совпадают."))]
    pub password2: String,
}

impl SignupForm {
    /// Checks field rules; username uniqueness is left to the caller.
    pub fn check(&self) -> FormErrors {
        let trimmed = SignupForm {
            username: self.username.trim().to_string(),
            ..self.clone()
        };
        declared_errors(&trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_words() -> Vec<String> {
        vec!["редиска".to_string(), "негодяй".to_string()]
    }

    #[test]
    fn clean_comment_passes() {
        let form = CommentForm {
            text: "  Хорошая новость  ".to_string(),
        };
        assert_eq!(form.clean(&bad_words()).unwrap(), "Хорошая новость");
    }

    #[test]
    fn bad_word_attaches_warning_to_text() {
        let form = CommentForm {
            text: "Какой-то текст, редиска, еще текст".to_string(),
        };
        let errors = form.clean(&bad_words()).unwrap_err();
        assert_eq!(errors.field("text"), [WARNING.to_string()]);
    }

    #[test]
    fn bad_word_match_ignores_case() {
        assert!(contains_bad_word("Ты НЕГОДЯЙ!", &bad_words()));
        assert!(!contains_bad_word("Ты молодец", &bad_words()));
    }

    #[test]
    fn blank_comment_is_required() {
        let form = CommentForm {
            text: "   ".to_string(),
        };
        let errors = form.clean(&bad_words()).unwrap_err();
        assert_eq!(errors.field("text").len(), 1);
        assert!(errors.field("text")[0].contains("Обязательное"));
    }

    #[test]
    fn signup_passwords_must_match() {
        let form = SignupForm {
            username: "reader".to_string(),
            password1: "long-password".to_string(),
            password2: "other-password".to_string(),
        };
        let errors = form.check();
        assert_eq!(errors.field("password2").len(), 1);
        assert!(errors.field("username").is_empty());
    }

    #[test]
    fn signup_rejects_short_password_and_blank_name() {
        let form = SignupForm {
            username: "  ".to_string(),
            password1: "short".to_string(),
            password2: "short".to_string(),
        };
        let errors = form.check();
        assert!(!errors.field("username").is_empty());
        assert!(!errors.field("password1").is_empty());
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().check();
        assert!(!errors.field("username").is_empty());
        assert!(!errors.field("password").is_empty());
        assert!(errors.non_field().is_empty());
    }
}
