use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use summer_api::app::{build_app, services::AppServices};
use summer_auth::JwtClaims;
use summer_core::UserId;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory storage, ephemeral port.
        let services = Arc::new(AppServices::in_memory(JWT_SECRET));
        let app = build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn sign_up(&self, username: &str, password: &str) -> Value {
        let res = self
            .client
            .post(self.url("/sign_up"))
            .json(&json!({
                "username": username,
                "name": format!("{username} name"),
                "email": format!("{username}@example.com"),
                "password": password,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        res.json().await.unwrap()
    }

    async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap()
    }

    async fn token_for(&self, username: &str, password: &str) -> String {
        let res = self.login(username, password).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn browse(&self, token: &str) -> Vec<Value> {
        let res = self
            .client
            .get(self.url("/browse"))
            .header("Authorization", token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(secret: &str, algorithm: Algorithm, claims: &JwtClaims) -> String {
    jsonwebtoken::encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn liveness_needs_no_token() {
    let srv = TestServer::spawn().await;

    let res = srv.client.get(srv.url("/")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "Up and running...");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;

    let requests = [
        srv.client.get(srv.url("/browse")),
        srv.client.post(srv.url("/posts")).json(&json!({ "caption": "hi" })),
        srv.client.get(srv.url("/users/1")),
        srv.client.patch(srv.url("/users/update")).json(&json!({ "name": "x" })),
    ];

    for req in requests {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["kind"], "unauthorized");
        assert_eq!(body["message"], "not authorized");
    }
}

#[tokio::test]
async fn bearer_scheme_without_token_is_unauthorized() {
    let srv = TestServer::spawn().await;

    for value in ["Bearer ", "Bearer"] {
        let res = srv
            .client
            .post(srv.url("/posts"))
            .header("Authorization", value)
            .json(&json!({ "caption": "hi" }))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header {value:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["kind"], "unauthorized");
    }
}

#[tokio::test]
async fn sign_up_login_post_and_browse() {
    let srv = TestServer::spawn().await;

    let user = srv.sign_up("andy", "pw-andy").await;
    assert!(user.get("password").is_none());
    assert_eq!(user["username"], "andy");
    let user_id = user["id"].as_i64().unwrap();

    let token = srv.token_for("andy", "pw-andy").await;
    assert!(srv.browse(&token).await.is_empty());

    let res = srv
        .client
        .post(srv.url("/posts"))
        .header("Authorization", &token)
        .json(&json!({ "caption": "first post" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let post: Value = res.json().await.unwrap();
    assert_eq!(post["caption"], "first post");
    assert_eq!(post["user_id"].as_i64(), Some(user_id));

    let posts = srv.browse(&token).await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0], post);
}

#[tokio::test]
async fn bearer_prefix_is_tolerated() {
    let srv = TestServer::spawn().await;
    srv.sign_up("bea", "pw").await;
    let token = srv.token_for("bea", "pw").await;

    let res = srv
        .client
        .get(srv.url("/browse"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_post_form_body_and_owner_from_token() {
    let srv = TestServer::spawn().await;
    let user = srv.sign_up("formy", "pw").await;
    let token = srv.token_for("formy", "pw").await;

    let res = srv
        .client
        .post(srv.url("/posts"))
        .header("Authorization", &token)
        .form(&[("caption", "from a form"), ("user_id", "999")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let post: Value = res.json().await.unwrap();
    assert_eq!(post["caption"], "from a form");
    assert_eq!(post["user_id"], user["id"]);
}

#[tokio::test]
async fn rejected_tokens_never_reach_the_handler() {
    let srv = TestServer::spawn().await;
    let user = srv.sign_up("mallory", "pw").await;
    let user_id = UserId::new(user["id"].as_i64().unwrap());
    let good = srv.token_for("mallory", "pw").await;

    let now = Utc::now();
    let fresh = JwtClaims::for_user(user_id, now);
    let expired = JwtClaims {
        user_id,
        authorized: true,
        iat: now - ChronoDuration::minutes(20),
        exp: now - ChronoDuration::minutes(5),
    };

    let bad_tokens = [
        "garbage".to_string(),
        mint_jwt("another-secret", Algorithm::HS256, &fresh),
        mint_jwt(JWT_SECRET, Algorithm::HS512, &fresh),
        mint_jwt(JWT_SECRET, Algorithm::HS256, &expired),
    ];

    for token in &bad_tokens {
        let res = srv
            .client
            .post(srv.url("/posts"))
            .header("Authorization", token)
            .json(&json!({ "caption": "should not exist" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["kind"], "invalid_token");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    assert!(srv.browse(&good).await.is_empty());
}

#[tokio::test]
async fn sign_up_reports_first_failing_field() {
    let srv = TestServer::spawn().await;

    let cases = [
        (json!({ "name": "n", "email": "a@b.co", "password": "p" }), "users_username_key"),
        (json!({ "username": "u", "email": "a@b.co", "password": "p" }), "users_name_key"),
        (json!({ "username": "u", "name": "n", "password": "p" }), "users_email_key"),
        (json!({ "username": "u", "name": "n", "email": "nope", "password": "p" }), "users_email_key"),
        (json!({}), "users_username_key"),
    ];

    for (body, field) in cases {
        let res = srv
            .client
            .post(srv.url("/sign_up"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["kind"], "validation_error");
        assert_eq!(body["field"], field);
    }
}

#[tokio::test]
async fn duplicate_username_is_a_store_error() {
    let srv = TestServer::spawn().await;
    srv.sign_up("twin", "pw").await;

    let res = srv
        .client
        .post(srv.url("/sign_up"))
        .json(&json!({ "username": "twin", "name": "n", "email": "t@x.io", "password": "p" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "store_error");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    srv.sign_up("carol", "right").await;

    let wrong_password = srv.login("carol", "wrong").await;
    let unknown_user = srv.login("nobody", "right").await;

    assert_eq!(wrong_password.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(wrong_password.status(), unknown_user.status());

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_user.json().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a["kind"], "invalid_credentials");
}

#[tokio::test]
async fn get_user_by_id() {
    let srv = TestServer::spawn().await;
    let user = srv.sign_up("dora", "pw").await;
    let token = srv.token_for("dora", "pw").await;

    let res = srv
        .client
        .get(srv.url(&format!("/users/{}", user["id"])))
        .header("Authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["username"], "dora");
    assert!(fetched.get("password").is_none());

    let res = srv
        .client
        .get(srv.url("/users/abc"))
        .header("Authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_id");

    let res = srv
        .client
        .get(srv.url("/users/424242"))
        .header("Authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn update_changes_only_the_fields_sent() {
    let srv = TestServer::spawn().await;
    let before = srv.sign_up("andy", "pw").await;
    let token = srv.token_for("andy", "pw").await;

    let res = srv
        .client
        .patch(srv.url("/users/update"))
        .header("Authorization", &token)
        .json(&json!({ "username": "joko" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let after: Value = res.json().await.unwrap();

    assert_eq!(after["username"], "joko");
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["email"], before["email"]);
    assert!(after.get("password").is_none());

    // The password was not touched: logging in under the new name still works.
    srv.token_for("joko", "pw").await;
}

#[tokio::test]
async fn update_rejects_invalid_email() {
    let srv = TestServer::spawn().await;
    srv.sign_up("erin", "pw").await;
    let token = srv.token_for("erin", "pw").await;

    let res = srv
        .client
        .patch(srv.url("/users/update"))
        .header("Authorization", &token)
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "validation_error");
    assert_eq!(body["field"], "users_email_key");
}

#[tokio::test]
async fn malformed_json_is_reported_in_the_envelope() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/login"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["kind"], "malformed_body");
}
