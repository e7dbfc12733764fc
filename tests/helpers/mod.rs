//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router against a fresh in-memory store.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use clickaulas_api::{build_app, build_state};
use clickaulas_auth::{JwtEncoder, PasswordHasher};
use clickaulas_core::config::AppConfig;
use clickaulas_database::Stores;
use clickaulas_entity::{CreateUser, Institution, NewInstitution, NewRoom, Room, User, UserRole};

/// Password given to every seeded account.
pub const PASSWORD: &str = "secret123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handles for seeding and direct assertions
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Value of the `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The first `Set-Cookie` header.
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let stores = Stores::memory();
        let router = build_app(build_state(config.clone(), stores.clone()));
        Self {
            router,
            stores,
            config,
        }
    }

    /// Insert a user holding `role` with the shared test password
    pub async fn seed_user(&self, name: &str, email: &str, role: UserRole) -> User {
        let mut account = CreateUser::account(name, email, role);
        account.password_hash = Some(
            PasswordHasher::new()
                .hash(PASSWORD)
                .expect("hash"),
        );
        self.stores
            .users
            .insert_user(&account)
            .await
            .expect("Failed to seed user")
    }

    /// Session token for `user`
    pub fn token_for(&self, user: &User) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue(user)
            .expect("Failed to issue token")
            .token
    }

    /// Seed a user and return a bearer token for it
    pub async fn sign_in_as(&self, role: UserRole) -> (User, String) {
        let email = format!("{}@school.org", Uuid::new_v4().simple());
        let user = self.seed_user(role.as_str(), &email, role).await;
        let token = self.token_for(&user);
        (user, token)
    }

    /// Insert an institution
    pub async fn seed_institution(&self, name: &str) -> Institution {
        self.stores
            .institutions
            .insert_institution(&NewInstitution {
                name: name.to_string(),
                address: None,
            })
            .await
            .expect("Failed to seed institution")
    }

    /// Insert a room
    pub async fn seed_room(&self, name: &str, institution_id: Option<Uuid>) -> Room {
        self.stores
            .rooms
            .insert_room(&NewRoom {
                name: name.to_string(),
                capacity: Some(30),
                institution_id,
            })
            .await
            .expect("Failed to seed room")
    }

    /// Make a request, authenticating with a bearer token when given
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder, body).await
    }

    /// Make a request carrying a raw `Cookie` header
    pub async fn request_with_cookie(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        cookie: &str,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie);
        self.send(builder, body).await
    }

    /// Make a bodiless request carrying both a `Cookie` header and a bearer token
    pub async fn request_with_cookie_and_bearer(
        &self,
        method: &str,
        uri: &str,
        cookie: &str,
        token: &str,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        self.send(builder, None).await
    }

    async fn send(&self, mut builder: http::request::Builder, body: Option<Value>) -> TestResponse {
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// `name=value` pair from a `Set-Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default()
}
