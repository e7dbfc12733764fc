//! Integration tests for the route guard.

mod helpers;

use http::StatusCode;

use clickaulas_entity::UserRole;

#[tokio::test]
async fn test_protected_api_without_session_is_401() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/admin/dashboard", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/admin/teachers", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_login_page_redirects_signed_in_user_home() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Teacher).await;

    let response = app.request("GET", "/login", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/admin"));
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/admin/dashboard", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stale_cookie_falls_back_to_bearer() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Admin).await;

    let response = app
        .request_with_cookie_and_bearer(
            "GET",
            "/api/admin/dashboard",
            "clickaulas_session=expired.or.garbage",
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_public_paths_pass_through() {
    let app = helpers::TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["store"], "memory");

    let unknown = app.request("GET", "/about", None, None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_navigation_follows_role() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Teacher).await;

    let response = app
        .request("GET", "/api/admin/navigation", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let keys: Vec<&str> = response
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["key"].as_str())
        .collect();
    assert!(keys.contains(&"schedule"));
    assert!(!keys.contains(&"coordinators"));
    assert!(!keys.contains(&"settings"));
}
