// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Forbidden words used when `BAD_WORDS` is not set.
pub const DEFAULT_BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Number of news items shown on the homepage when `NEWS_COUNT_ON_HOME_PAGE` is not set.
pub const DEFAULT_NEWS_COUNT_ON_HOME_PAGE: i64 = 10;

/// Two weeks, in seconds.
pub const DEFAULT_SESSION_AGE: u64 = 60 * 60 * 24 * 14;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Session lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub listen_addr: SocketAddr,
    pub news_count_on_home_page: i64,
    /// Lower-cased forbidden words checked against comment text.
    pub bad_words: Vec<String>,
    /// Optional JSON file with news items seeded into an empty database.
    pub news_fixture: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SESSION_AGE);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let listen_addr = env::var("LISTEN_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let news_count_on_home_page = env::var("NEWS_COUNT_ON_HOME_PAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NEWS_COUNT_ON_HOME_PAGE);

        let bad_words = match env::var("BAD_WORDS") {
            Ok(raw) => parse_word_list(&raw),
            Err(_) => DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        let news_fixture = env::var("NEWS_FIXTURE").ok().map(PathBuf::from);

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            listen_addr,
            news_count_on_home_page,
            bad_words,
            news_fixture,
        }
    }

    /// Configuration for tests and local experiments: in-memory database,
    /// default limits and word list.
    pub fn for_testing(jwt_secret: &str) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration: 600,
            rust_log: "error".to_string(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            news_count_on_home_page: DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
            bad_words: DEFAULT_BAD_WORDS.iter().map(|w| w.to_string()).collect(),
            news_fixture: None,
        }
    }
}

/// Splits a comma separated list, dropping blanks and lower-casing each entry.
fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
