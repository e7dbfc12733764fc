//! Integration tests for institutions and rooms.

mod helpers;

use http::StatusCode;
use serde_json::json;

use clickaulas_entity::UserRole;

#[tokio::test]
async fn test_admin_manages_institutions_and_rooms() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Admin).await;

    let institution = app
        .request(
            "POST",
            "/api/admin/settings/institutions",
            Some(json!({ "name": "Escola Sul", "address": "Rua 1" })),
            Some(&token),
        )
        .await;
    assert_eq!(institution.status, StatusCode::OK);
    let institution_id = institution.data()["id"].as_str().expect("id").to_string();

    let room = app
        .request(
            "POST",
            "/api/admin/settings/rooms",
            Some(json!({ "name": "Sala 10", "capacity": 40, "institutionId": institution_id })),
            Some(&token),
        )
        .await;
    assert_eq!(room.status, StatusCode::OK);
    assert_eq!(room.data()["capacity"], 40);

    let rooms = app
        .request("GET", "/api/admin/settings/rooms", None, Some(&token))
        .await;
    assert_eq!(rooms.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_referenced_institution_cannot_be_deleted() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Admin).await;
    let institution = app.seed_institution("Escola Leste").await;
    app.seed_room("Sala 1", Some(institution.id)).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/settings/institutions/{}", institution.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "IN_USE");
    let still_there = app
        .stores
        .institutions
        .find_institution(institution.id)
        .await
        .expect("lookup");
    assert!(still_there.is_some());
}

#[tokio::test]
async fn test_settings_are_admin_only() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Coordinator).await;

    let response = app
        .request(
            "POST",
            "/api/admin/settings/rooms",
            Some(json!({ "name": "Sala 2" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    let rooms = app.stores.rooms.list_rooms().await.expect("rooms");
    assert!(rooms.is_empty());
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = helpers::TestApp::new();
    let (_, token) = app.sign_in_as(UserRole::Admin).await;

    let response = app
        .request(
            "DELETE",
            "/api/admin/settings/rooms/not-a-uuid",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
