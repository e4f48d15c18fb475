// tests/routes_tests.rs

mod common;

use common::{assert_redirects, spawn_app};
use ya_news::urls::Route;

#[tokio::test]
async fn pages_are_available_to_anonymous_users() {
    // Arrange
    let app = spawn_app().await;
    let news = app.news().await;
    let client = app.client();

    for route in [
        Route::Detail(news.id),
        Route::Home,
        Route::Login,
        Route::Logout,
        Route::Signup,
    ] {
        // Act
        let response = client
            .get(app.url(route))
            .send()
            .await
            .expect("Failed to execute request");

        // Assert
        assert_eq!(response.status().as_u16(), 200, "{} is not available", route.name());
    }
}

#[tokio::test]
async fn unknown_news_is_404() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.url(Route::Detail(999)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn malformed_ids_are_404() {
    let app = spawn_app().await;
    let author = app.author().await;

    for path in ["/news/abc/", "/news/99999999999999999999/"] {
        let response = app
            .client()
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404, "unexpected status for {}", path);
    }

    for path in ["/edit_comment/abc/", "/delete_comment/99999999999999999999/"] {
        let response = app
            .client_for(&author)
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404, "unexpected status for {}", path);
    }
}

#[tokio::test]
async fn comment_edit_and_delete_pages_are_for_author_only() {
    let app = spawn_app().await;
    let author = app.author().await;
    let not_author = app.not_author().await;
    let news = app.news().await;
    let comment = app.comment(&author, &news).await;

    let cases = [
        (app.client_for(&not_author), 404),
        (app.client_for(&author), 200),
    ];

    for (client, expected_status) in &cases {
        for route in [Route::Delete(comment.id), Route::Edit(comment.id)] {
            let response = client.get(app.url(route)).send().await.unwrap();
            assert_eq!(
                response.status().as_u16(),
                *expected_status,
                "unexpected status for {}",
                route.name()
            );
        }
    }
}

#[tokio::test]
async fn anonymous_user_is_redirected_to_login() {
    let app = spawn_app().await;
    let author = app.author().await;
    let news = app.news().await;
    let comment = app.comment(&author, &news).await;
    let client = app.client();

    for route in [Route::Delete(comment.id), Route::Edit(comment.id)] {
        let url = route.path();
        let expected_url = format!("{}?next={}", Route::Login.path(), url);

        let response = client.get(app.url(route)).send().await.unwrap();

        assert_redirects(&response, &expected_url);
    }
}

#[tokio::test]
async fn missing_comment_is_404_for_logged_in_user() {
    let app = spawn_app().await;
    let author = app.author().await;

    let response = app
        .client_for(&author)
        .get(app.url(Route::Edit(12345)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn forged_session_is_treated_as_anonymous() {
    let app = spawn_app().await;
    let author = app.author().await;
    let news = app.news().await;
    let comment = app.comment(&author, &news).await;

    let response = app
        .client_with_session("not-a-valid-token")
        .get(app.url(Route::Edit(comment.id)))
        .send()
        .await
        .unwrap();

    assert_redirects(
        &response,
        &format!("/auth/login/?next=/edit_comment/{}/", comment.id),
    );
}
