use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use server::{ServerState, TokenService, router};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build();

    router(ServerState {
        engine: Arc::new(engine),
        tokens: Arc::new(TokenService::new("test-secret")),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth-token", token);
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let token = response
        .headers()
        .get("x-auth-token")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, token, body)
}

fn shop_payload(email: &str) -> Value {
    json!({
        "name": "Mama Nkechi",
        "email": email,
        "shopType": "provisions",
        "description": "provisions and household goods",
        "password": "super-secret-pass",
        "city": "Enugu",
        "phoneNumber": "08012345678",
    })
}

async fn register_shop(app: &Router, email: &str) -> String {
    let (status, token, _) =
        send(app, "POST", "/api/register", None, Some(shop_payload(email))).await;
    assert_eq!(status, StatusCode::CREATED);
    token.unwrap()
}

fn admin_payload(n: u32) -> Value {
    json!({
        "username": format!("admin{n}"),
        "email": format!("admin{n}@example.com"),
        "password": "super-secret-pass",
    })
}

async fn register_admin(app: &Router, n: u32) -> (String, String) {
    let (status, token, body) =
        send(app, "POST", "/api/admin/register", None, Some(admin_payload(n))).await;
    assert_eq!(status, StatusCode::CREATED);
    (token.unwrap(), body["data"]["id"].as_str().unwrap().to_string())
}

fn soap_credit() -> Value {
    json!({
        "nameOfCollector": "Ada Obi",
        "genderOfCollector": "female",
        "initialPay": 1.0,
        "products": [{ "product": "soap", "price": 2.0, "quantity": 3 }],
    })
}

#[tokio::test]
async fn register_and_login_shop() {
    let app = app().await;

    let (status, token, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(shop_payload("nkechi@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(token.is_some());
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["email"], "nkechi@example.com");
    assert!(body["data"].get("password").is_none());

    // duplicate email
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(shop_payload("nkechi@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    // wrong password
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "nkechi@example.com", "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // valid credentials
    let (status, token, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "nkechi@example.com", "password": "super-secret-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(token.is_some());
    assert_eq!(body["data"]["name"], "Mama Nkechi");
}

#[tokio::test]
async fn protected_routes_demand_a_valid_token() {
    let app = app().await;

    let (status, _, body) = send(&app, "GET", "/api/shop/my-shop", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _, body) = send(&app, "GET", "/api/shop/my-shop", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn shop_token_cannot_reach_admin_routes() {
    let app = app().await;
    let token = register_shop(&app, "nkechi@example.com").await;

    let (status, _, _) = send(&app, "GET", "/api/credit/get-all", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // and an admin token cannot act as a shop
    let (admin_token, _) = register_admin(&app, 1).await;
    let (status, _, _) = send(&app, "GET", "/api/shop/my-shop", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn credit_lifecycle_over_http() {
    let app = app().await;
    let token = register_shop(&app, "nkechi@example.com").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/credit/create",
        Some(&token),
        Some(soap_credit()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let credit_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["completed"], false);

    // malformed path id fails before any lookup
    let (status, _, _) = send(
        &app,
        "GET",
        "/api/credit/debt-summary/not-a-uuid",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let summary_uri = format!("/api/credit/debt-summary/{credit_id}");
    let (status, _, body) = send(&app, "GET", &summary_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalProductPrice"], 6.0);
    assert_eq!(body["data"]["debt"], 5.0);
    assert_eq!(body["data"]["completed"], false);

    // pay to exactly zero
    let pay_uri = format!("/api/credit/pay-debt/{credit_id}");
    let (status, _, _) = send(
        &app,
        "PUT",
        &pay_uri,
        Some(&token),
        Some(json!({ "amountPaid": 5.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, "GET", &summary_uri, Some(&token), None).await;
    assert_eq!(body["data"]["debt"], 0.0);
    assert_eq!(body["data"]["completed"], true);

    // over-payment reopens the account under strict equality
    let (status, _, _) = send(
        &app,
        "PUT",
        &pay_uri,
        Some(&token),
        Some(json!({ "amountPaid": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&app, "GET", &summary_uri, Some(&token), None).await;
    assert_eq!(body["data"]["debt"], -1.0);
    assert_eq!(body["data"]["completed"], false);

    // a different shop never sees the credit
    let other = register_shop(&app, "other@example.com").await;
    let (status, _, _) = send(
        &app,
        "PUT",
        &pay_uri,
        Some(&other),
        Some(json!({ "amountPaid": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // owner deletes the ledger
    let delete_uri = format!("/api/credit/{credit_id}");
    let (status, _, _) = send(&app, "DELETE", &delete_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, "GET", &summary_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_cap_and_power_bounds() {
    let app = app().await;

    let (super_token, _) = register_admin(&app, 1).await;
    let (_, second_id) = register_admin(&app, 2).await;
    register_admin(&app, 3).await;

    // the cap holds regardless of email uniqueness
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/admin/register",
        None,
        Some(admin_payload(4)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    // raise the second admin to the top, then one step too far
    let empower_uri = format!("/api/admin/empower/{second_id}");
    let (status, _, body) = send(&app, "PUT", &empower_uri, Some(&super_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["power"], 2);
    let (_, _, body) = send(&app, "PUT", &empower_uri, Some(&super_token), None).await;
    assert_eq!(body["data"]["power"], 3);

    let (status, _, _) = send(&app, "PUT", &empower_uri, Some(&super_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // power unchanged after the failed attempt
    let get_uri = format!("/api/admin/{second_id}");
    let (_, _, body) = send(&app, "GET", &get_uri, Some(&super_token), None).await;
    assert_eq!(body["data"]["power"], 3);

    // reduce back down to the floor, then one step too far
    let reduce_uri = format!("/api/admin/reduce/{second_id}");
    let (_, _, _) = send(&app, "PUT", &reduce_uri, Some(&super_token), None).await;
    let (_, _, body) = send(&app, "PUT", &reduce_uri, Some(&super_token), None).await;
    assert_eq!(body["data"]["power"], 1);
    let (status, _, _) = send(&app, "PUT", &reduce_uri, Some(&super_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn base_admin_cannot_empower() {
    let app = app().await;

    let (_, first_id) = register_admin(&app, 1).await;
    let (base_token, _) = register_admin(&app, 2).await;

    let uri = format!("/api/admin/empower/{first_id}");
    let (status, _, _) = send(&app, "PUT", &uri, Some(&base_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn home_publishing_flow() {
    let app = app().await;
    let shop_token = register_shop(&app, "nkechi@example.com").await;
    let (admin_token, _) = register_admin(&app, 1).await;

    // only admins create home content
    let home = json!({
        "title": "Grand opening",
        "description1": "The collector now keeps your change safe.",
        "imageLink": "https://example.com/banner.png",
    });
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/home/create",
        Some(&shop_token),
        Some(home.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/home/create",
        Some(&admin_token),
        Some(home),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let home_id = body["data"]["id"].as_str().unwrap().to_string();

    // nothing published yet: landing falls back to the greeting
    let (status, _, body) = send(&app, "GET", "/api/home", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    // edits are fine while unpublished
    let edit_uri = format!("/api/home/edit/{home_id}");
    let (status, _, _) = send(
        &app,
        "PUT",
        &edit_uri,
        Some(&admin_token),
        Some(json!({ "title": "Now open" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let publish_uri = format!("/api/home/publish/{home_id}");
    let (status, _, body) = send(&app, "PUT", &publish_uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isPublished"], true);

    // published content is frozen
    let (status, _, _) = send(
        &app,
        "PUT",
        &edit_uri,
        Some(&admin_token),
        Some(json!({ "title": "Too late" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // and now the landing serves it
    let (_, _, body) = send(&app, "GET", "/api/home", None, None).await;
    assert_eq!(body["data"]["id"], home_id.as_str());
}

#[tokio::test]
async fn change_collect_flow() {
    let app = app().await;
    let token = register_shop(&app, "nkechi@example.com").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/change/create",
        Some(&token),
        Some(json!({
            "nameOfCollector": "Chidi Eze",
            "genderOfCollector": "male",
            "amount": 2.5,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let change_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["collected"], false);

    let collect_uri = format!("/api/change/collect/{change_id}");
    let (status, _, body) = send(&app, "PUT", &collect_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["collected"], true);

    // collecting twice is refused
    let (status, _, _) = send(&app, "PUT", &collect_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // another shop cannot see the record
    let other = register_shop(&app, "other@example.com").await;
    let get_uri = format!("/api/change/get-one/{change_id}");
    let (status, _, _) = send(&app, "GET", &get_uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
