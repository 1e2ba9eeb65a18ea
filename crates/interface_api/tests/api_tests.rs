//! HTTP tests over the in-memory table

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain_finance::{FinanceService, InMemoryTable};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use serde_json::{json, Value};

const SECRET: &str = "api-test-secret";

fn offline_server() -> TestServer {
    let config = ApiConfig {
        offline: true,
        ..ApiConfig::default()
    };
    let service = FinanceService::new(Arc::new(InMemoryTable::new()));
    TestServer::new(create_router(service, config)).unwrap()
}

fn authenticated_server() -> TestServer {
    let config = ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..ApiConfig::default()
    };
    let service = FinanceService::new(Arc::new(InMemoryTable::new()));
    TestServer::new(create_router(service, config)).unwrap()
}

fn bearer(user: &str) -> HeaderValue {
    let token = create_token(user, SECRET, 300).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn create_milk(server: &TestServer) -> Value {
    let response = server
        .post("/api/v1/expenses")
        .json(&json!({
            "name": "Milk",
            "amount": 2.5,
            "date": "2024-03-15T09:30:00Z",
            "category": "ESSEN"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()
}

#[tokio::test]
async fn test_health_is_public() {
    let server = authenticated_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");

    let ready = server.get("/health/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    assert_eq!(ready.json::<Value>()["store"], "in-memory-table");
}

#[tokio::test]
async fn test_create_then_list_and_overview() {
    let server = offline_server();
    let created = create_milk(&server).await;
    assert_eq!(created["name"], "Milk");
    assert_eq!(created["amount"], json!(2.5));
    assert_eq!(created["category"], "ESSEN");
    assert_eq!(created["date"], "2024-03-15T09:30:00Z");
    assert!(created["id"].as_str().is_some());

    let listed = server
        .get("/api/v1/expenses")
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    assert_eq!(listed.json::<Value>(), json!([created]));

    let overview = server.get("/api/v1/overview").add_query_param("year", 2024).await;
    assert_eq!(overview.status_code(), StatusCode::OK);
    let months = overview.json::<Value>();
    assert_eq!(months.as_array().unwrap().len(), 12);
    assert_eq!(months[2]["ESSEN"], json!(2.5));
    assert_eq!(months[2]["WOHNEN"], json!(0.0));
    assert_eq!(months[3]["ESSEN"], json!(0.0));
}

#[tokio::test]
async fn test_create_defaults_category() {
    let server = offline_server();
    let response = server
        .post("/api/v1/expenses")
        .json(&json!({ "name": "Stamps", "amount": "3.20", "date": "2024-05-02" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["category"], "SONSTIGES");
    assert_eq!(body["date"], "2024-05-02T00:00:00Z");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let server = offline_server();
    let response = server
        .post("/api/v1/expenses")
        .json(&json!({ "name": "", "amount": -4 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["amount", "name"]);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = offline_server();
    let response = server
        .post("/api/v1/expenses")
        .json(&json!({ "name": "Milk", "amount": 1, "category": "SNACKS" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["details"][0]["field"], "body");
}

#[tokio::test]
async fn test_newest_sort_and_lenient_fallback() {
    let server = offline_server();
    for (name, amount, date) in [
        ("Rent", 950, "2024-03-01"),
        ("Milk", 2, "2024-03-15"),
        ("Train", 40, "2024-03-20"),
    ] {
        let response = server
            .post("/api/v1/expenses")
            .json(&json!({ "name": name, "amount": amount, "date": date, "category": "ESSEN" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let names = |body: Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect()
    };

    let newest = server
        .get("/api/v1/expenses")
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .add_query_param("sort", "NEWEST")
        .await;
    assert_eq!(names(newest.json()), vec!["Train", "Milk", "Rent"]);

    let fallback = server
        .get("/api/v1/expenses")
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .add_query_param("sort", "whatever")
        .await;
    assert_eq!(names(fallback.json()), vec!["Milk", "Train", "Rent"]);
}

#[tokio::test]
async fn test_invalid_month_is_bad_request() {
    let server = offline_server();
    let response = server.get("/api/v1/expenses").add_query_param("month", 13).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["details"][0]["field"], "month");

    let response = server.get("/api/v1/expenses").add_query_param("year", "soon").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_moves_expense_and_delete_removes_it() {
    let server = offline_server();
    let created = create_milk(&server).await;
    let path = format!("/api/v1/expenses/{}", created["id"].as_str().unwrap());

    let patched = server.patch(&path).json(&json!({ "date": "2024-04-02" })).await;
    assert_eq!(patched.status_code(), StatusCode::OK);
    assert_eq!(patched.json::<Value>(), json!({ "success": true }));

    let march = server
        .get("/api/v1/expenses")
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .await;
    assert_eq!(march.json::<Value>(), json!([]));

    let april = server
        .get("/api/v1/expenses")
        .add_query_param("year", 2024)
        .add_query_param("month", 4)
        .await
        .json::<Value>();
    assert_eq!(april[0]["id"], created["id"]);
    assert_eq!(april[0]["name"], "Milk");

    let deleted = server.delete(&path).await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_errors() {
    let server = offline_server();
    let created = create_milk(&server).await;
    let path = format!("/api/v1/expenses/{}", created["id"].as_str().unwrap());

    let empty = server.patch(&path).json(&json!({})).await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let zero = server.patch(&path).json(&json!({ "amount": 0 })).await;
    assert_eq!(zero.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(zero.json::<Value>()["details"][0]["field"], "amount");

    let missing = server
        .patch("/api/v1/expenses/550e8400-e29b-41d4-a716-446655440404")
        .json(&json!({ "name": "ghost" }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let bad_id = server.delete("/api/v1/expenses/not-a-uuid").await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json::<Value>()["details"][0]["field"], "id");
}

#[tokio::test]
async fn test_budget_default_and_update() {
    let server = offline_server();

    let budget = server.get("/api/v1/budget").await;
    assert_eq!(budget.status_code(), StatusCode::OK);
    assert_eq!(budget.json::<Value>(), json!({ "budget": 1000.0 }));

    let updated = server.put("/api/v1/budget").json(&json!({ "budget": 450.5 })).await;
    assert_eq!(updated.json::<Value>(), json!({ "success": true }));
    assert_eq!(server.get("/api/v1/budget").await.json::<Value>(), json!({ "budget": 450.5 }));

    let negative = server.put("/api/v1/budget").json(&json!({ "budget": -1 })).await;
    assert_eq!(negative.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = authenticated_server();
    let response = server.get("/api/v1/budget").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "unauthorized");

    let forged = server
        .get("/api/v1/budget")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"))
        .await;
    assert_eq!(forged.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_subject_scopes_data() {
    let server = authenticated_server();

    let created = server
        .post("/api/v1/expenses")
        .add_header(AUTHORIZATION, bearer("alice"))
        .json(&json!({ "name": "Milk", "amount": 2.5, "date": "2024-03-15", "category": "ESSEN" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::OK);

    let alice = server
        .get("/api/v1/expenses")
        .add_header(AUTHORIZATION, bearer("alice"))
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .await;
    assert_eq!(alice.json::<Value>().as_array().unwrap().len(), 1);

    let bob = server
        .get("/api/v1/expenses")
        .add_header(AUTHORIZATION, bearer("bob"))
        .add_query_param("year", 2024)
        .add_query_param("month", 3)
        .await;
    assert_eq!(bob.json::<Value>(), json!([]));
}
