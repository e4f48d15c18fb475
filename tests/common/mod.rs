// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use reqwest::{
    Client, Response,
    header::{COOKIE, HeaderMap, HeaderValue, LOCATION},
    redirect::Policy,
};
use sqlx::SqlitePool;
use ya_news::{
    config::Config,
    db,
    models::{
        comment::Comment,
        news::{NewNews, News},
        user::User,
    },
    routes,
    state::AppState,
    urls::Route,
    utils::{
        hash::UNUSABLE_PASSWORD,
        session::{SESSION_COOKIE, sign_session},
    },
};

pub const TEST_SECRET: &str = "test_secret_for_integration_tests";

pub const OLD_COMMENT_TEXT: &str = "Текст Коментария";
pub const NEW_COMMENT_TEXT: &str = "TEXT";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub config: Config,
}

/// Spawns the app on a random port, backed by a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // 1. Create a migrated pool
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create in-memory database");

    // 2. Create test configuration and state
    let config = Config::for_testing(TEST_SECRET);
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
    };

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        config,
    }
}

impl TestApp {
    pub fn url(&self, route: Route) -> String {
        format!("{}{}", self.address, route.path())
    }

    /// Anonymous client that does not follow redirects.
    pub fn client(&self) -> Client {
        Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    /// Client already logged in as `user`.
    pub fn client_for(&self, user: &User) -> Client {
        let token = sign_session(user, &self.config.jwt_secret, self.config.jwt_expiration).unwrap();
        self.client_with_session(&token)
    }

    pub fn client_with_session(&self, token: &str) -> Client {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token)).unwrap(),
        );

        Client::builder()
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .unwrap()
    }

    pub async fn user(&self, username: &str) -> User {
        User::create(&self.pool, username, UNUSABLE_PASSWORD)
            .await
            .unwrap()
    }

    pub async fn author(&self) -> User {
        self.user("Автор").await
    }

    pub async fn not_author(&self) -> User {
        self.user("Не автор").await
    }

    pub async fn news(&self) -> News {
        News::create(
            &self.pool,
            &NewNews {
                title: "Заголовок".to_string(),
                text: "Текст".to_string(),
                date: None,
            },
        )
        .await
        .unwrap()
    }

    /// One more news item than the homepage shows, one per day going back
    /// from today, inserted oldest first.
    pub async fn all_news(&self) -> Vec<News> {
        let today = Utc::now().date_naive();
        let mut all_news = Vec::new();
        for index in (0..=self.config.news_count_on_home_page).rev() {
            let news = News::create(
                &self.pool,
                &NewNews {
                    title: format!("Новость {index}"),
                    text: "Просто текст.".to_string(),
                    date: Some(today - Duration::days(index)),
                },
            )
            .await
            .unwrap();
            all_news.push(news);
        }
        all_news
    }

    pub async fn comment(&self, author: &User, news: &News) -> Comment {
        Comment::create(&self.pool, news.id, author.id, OLD_COMMENT_TEXT)
            .await
            .unwrap()
    }

    /// Ten comments one day apart, inserted newest first.
    pub async fn comments(&self, author: &User, news: &News) -> Vec<Comment> {
        let now = Utc::now();
        let mut comments = Vec::new();
        for index in (0..10).rev() {
            let comment = Comment::create_at(
                &self.pool,
                news.id,
                author.id,
                &format!("Tекст {index}"),
                now + Duration::days(index),
            )
            .await
            .unwrap();
            comments.push(comment);
        }
        comments
    }

    pub async fn comments_count(&self) -> i64 {
        Comment::count(&self.pool).await.unwrap()
    }

    pub async fn find_comment(&self, id: i64) -> Option<Comment> {
        Comment::find(&self.pool, id).await.unwrap()
    }
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("Response is not a redirect")
        .to_str()
        .unwrap()
        .to_string()
}

/// Asserts a `302 Found` to `expected`.
pub fn assert_redirects(response: &Response, expected: &str) {
    assert_eq!(response.status().as_u16(), 302);
    assert_eq!(location(response), expected);
}

/// Values of every `attr="..."` occurrence in `html`, in document order.
pub fn attr_values(html: &str, attr: &str) -> Vec<String> {
    let needle = format!(r#"{attr}=""#);
    html.match_indices(&needle)
        .filter_map(|(start, _)| {
            let rest = &html[start + needle.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .collect()
}

pub fn parse_timestamps(values: &[String]) -> Vec<DateTime<Utc>> {
    values
        .iter()
        .map(|v| DateTime::parse_from_rfc3339(v).unwrap().with_timezone(&Utc))
        .collect()
}
