//! API integration tests
//!
//! These run against a live server with a migrated database and the default
//! bootstrap account (admin/admin). Run with: cargo test -- --ignored

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated client token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Suffix keeping usernames unique across runs
fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn post_json(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn patch_json(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .patch(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn put_json(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn delete(client: &Client, token: &str, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn create_equipment(client: &Client, token: &str, body: Value) -> Value {
    let (status, body) = post_json(client, token, "/equipment", body).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn create_user(client: &Client, token: &str) -> Value {
    let (status, body) = post_json(
        client,
        token,
        "/users",
        json!({ "username": unique("borrower"), "password": "password" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("No ID in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_category_and_location_with_name_only() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, category) = post_json(&client, &token, "/categories", json!({ "name": "Stationery" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["name"], "Stationery");
    assert!(category["description"].is_null());

    let (status, location) = post_json(&client, &token, "/locations", json!({ "name": "1F Office" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(location["description"].is_null());

    // Duplicate names are allowed
    let (status, _) = post_json(&client, &token, "/categories", json!({ "name": "Stationery" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore]
async fn test_create_category_without_name_is_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, body) = post_json(&client, &token, "/categories", json!({ "description": "nameless" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "name");
}

#[tokio::test]
#[ignore]
async fn test_equipment_status_defaults_to_available() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment = create_equipment(&client, &token, json!({ "name": "Projector" })).await;
    assert_eq!(equipment["status"], "available");
    assert!(equipment["category"].is_null());
    assert!(equipment["category_name"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_equipment_validation_errors() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, body) = post_json(&client, &token, "/equipment", json!({ "name": "Tablet", "status": "lost" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "status");

    let (status, body) =
        post_json(&client, &token, "/equipment", json!({ "name": "Tablet", "purchase_date": "soon" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "purchase_date");

    let (status, body) =
        post_json(&client, &token, "/equipment", json!({ "name": "Tablet", "purchase_price": "10.001" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "purchase_price");

    let (status, _) =
        post_json(&client, &token, "/equipment", json!({ "name": "Tablet", "purchase_price": "123456789" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        post_json(&client, &token, "/equipment", json!({ "name": "Tablet", "category": 2147483647 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "category");
}

#[tokio::test]
#[ignore]
async fn test_purchase_price_has_two_fractional_digits() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment = create_equipment(&client, &token, json!({ "name": "Laptop", "purchase_price": 100000 })).await;
    assert_eq!(equipment["purchase_price"], "100000.00");

    let (status, updated) = patch_json(
        &client,
        &token,
        &format!("/equipment/{}", id_of(&equipment)),
        json!({ "purchase_price": "12.5" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["purchase_price"], "12.50");
}

#[tokio::test]
#[ignore]
async fn test_deleting_category_clears_equipment_reference() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, category) = post_json(&client, &token, "/categories", json!({ "name": "Furniture" })).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Desk", "category": category["id"] })).await;
    assert_eq!(equipment["category_name"], "Furniture");

    let status = delete(&client, &token, &format!("/categories/{}", id_of(&category))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, equipment) = get_json(&client, &token, &format!("/equipment/{}", id_of(&equipment))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(equipment["category"].is_null());
    assert!(equipment["category_name"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_deleting_location_clears_equipment_reference() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, location) = post_json(&client, &token, "/locations", json!({ "name": "Storage B" })).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Ladder", "location": location["id"] })).await;

    delete(&client, &token, &format!("/locations/{}", id_of(&location))).await;

    let (_, equipment) = get_json(&client, &token, &format!("/equipment/{}", id_of(&equipment))).await;
    assert!(equipment["location"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_deleting_equipment_deletes_its_logs() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let user = create_user(&client, &token).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Camera" })).await;

    let mut log_ids = Vec::new();
    for _ in 0..3 {
        let (status, log) = post_json(
            &client,
            &token,
            "/equipment-logs",
            json!({ "equipment": equipment["id"], "checked_out_by": user["id"] }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        log_ids.push(id_of(&log));
    }

    let status = delete(&client, &token, &format!("/equipment/{}", id_of(&equipment))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for log_id in log_ids {
        let (status, _) = get_json(&client, &token, &format!("/equipment-logs/{}", log_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
#[ignore]
async fn test_deleting_user_deletes_their_logs() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let user = create_user(&client, &token).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Headset" })).await;
    let (_, log) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({ "equipment": equipment["id"], "checked_out_by": user["id"] }),
    )
    .await;

    let status = delete(&client, &token, &format!("/users/{}", id_of(&user))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_json(&client, &token, &format!("/equipment-logs/{}", id_of(&log))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Equipment itself is untouched
    let (status, _) = get_json(&client, &token, &format!("/equipment/{}", id_of(&equipment))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_checkout_ignores_supplied_checked_out_date() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let user = create_user(&client, &token).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Drill" })).await;

    let before = Utc::now() - chrono::Duration::minutes(5);
    let (status, log) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({
            "equipment": equipment["id"],
            "checked_out_by": user["id"],
            "checked_out_date": "2000-01-01T00:00:00Z",
            "expected_return_date": "2030-01-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(log["checked_in_date"].is_null());

    let checked_out: chrono::DateTime<Utc> = log["checked_out_date"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("checked_out_date missing");
    assert!(checked_out > before);
    assert_eq!(log["expected_return_date"], "2030-01-01");

    // Updates cannot move it either
    let (_, updated) = patch_json(
        &client,
        &token,
        &format!("/equipment-logs/{}", id_of(&log)),
        json!({ "checked_out_date": "2000-01-01T00:00:00Z", "notes": "battery pack included" }),
    )
    .await;
    assert_eq!(updated["checked_out_date"], log["checked_out_date"]);
    assert_eq!(updated["notes"], "battery pack included");
}

#[tokio::test]
#[ignore]
async fn test_checkout_with_unknown_references_is_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment = create_equipment(&client, &token, json!({ "name": "Scanner" })).await;

    let (status, body) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({ "equipment": equipment["id"], "checked_out_by": 2147483647 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "checked_out_by");

    let (status, body) = post_json(&client, &token, "/equipment-logs", json!({ "checked_out_by": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "equipment");
}

#[tokio::test]
#[ignore]
async fn test_status_filter() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let target = create_equipment(&client, &token, json!({ "name": "Printer", "status": "maintenance" })).await;
    create_equipment(&client, &token, json!({ "name": "Monitor" })).await;

    let (_, filtered) = get_json(&client, &token, "/equipment?status=maintenance").await;
    let filtered = filtered.as_array().expect("expected array");
    assert!(filtered.iter().all(|e| e["status"] == "maintenance"));
    assert!(filtered.iter().any(|e| e["id"] == target["id"]));

    let (_, all) = get_json(&client, &token, "/equipment").await;
    let all = all.as_array().expect("expected array");
    assert!(all.len() > filtered.len());

    let (_, empty_filter) = get_json(&client, &token, "/equipment?status=").await;
    assert_eq!(empty_filter.as_array().map(Vec::len), Some(all.len()));

    let (status, none) = get_json(&client, &token, "/equipment?status=lost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));
}

#[tokio::test]
#[ignore]
async fn test_summary_shape() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    create_equipment(&client, &token, json!({ "name": "Whiteboard", "serial_number": "WB-1", "status": "broken" })).await;

    let (status, summaries) = get_json(&client, &token, "/equipment/summary?status=broken").await;
    assert_eq!(status, StatusCode::OK);
    let first = summaries[0].as_object().expect("expected object");
    let mut keys: Vec<_> = first.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["category_name", "id", "location_name", "name", "status"]);
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return_scenario() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, category) = post_json(&client, &token, "/categories", json!({ "name": "Electronics" })).await;
    let (_, location) = post_json(&client, &token, "/locations", json!({ "name": "Office" })).await;
    let equipment = create_equipment(
        &client,
        &token,
        json!({ "name": "Laptop", "category": category["id"], "location": location["id"] }),
    )
    .await;
    assert_eq!(equipment["status"], "available");
    assert_eq!(equipment["category_name"], "Electronics");
    assert_eq!(equipment["location_name"], "Office");

    let user = create_user(&client, &token).await;
    let (status, log) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({ "equipment": equipment["id"], "checked_out_by": user["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(log["checked_in_date"].is_null());

    let now = Utc::now().to_rfc3339();
    let (status, _) = patch_json(
        &client,
        &token,
        &format!("/equipment-logs/{}", id_of(&log)),
        json!({ "checked_in_date": now }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, log) = get_json(&client, &token, &format!("/equipment-logs/{}", id_of(&log))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(log["checked_in_date"].is_string());
    assert_eq!(log["equipment_name"], "Laptop");
    assert_eq!(log["checked_out_by_name"], user["username"]);
}

#[tokio::test]
#[ignore]
async fn test_category_and_location_update_and_retrieve() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    for resource in ["/categories", "/locations"] {
        let (_, created) =
            post_json(&client, &token, resource, json!({ "name": "Original", "description": "first" })).await;
        let path = format!("{}/{}", resource, id_of(&created));

        let (status, fetched) = get_json(&client, &token, &path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        // Absent description is left alone
        let (status, renamed) = put_json(&client, &token, &path, json!({ "name": "Renamed" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "Renamed");
        assert_eq!(renamed["description"], "first");

        let (status, cleared) = patch_json(&client, &token, &path, json!({ "description": null })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["name"], "Renamed");
        assert!(cleared["description"].is_null());

        let (status, body) = patch_json(&client, &token, &path, json!({ "name": null })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "name");
    }
}

#[tokio::test]
#[ignore]
async fn test_missing_ids_return_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    for resource in ["/categories", "/locations", "/equipment", "/equipment-logs"] {
        let path = format!("{}/2147483647", resource);

        let (status, body) = get_json(&client, &token, &path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", path);
        assert_eq!(body["error"], "NoSuchData");

        let (status, _) = patch_json(&client, &token, &path, json!({ "notes": "x", "name": "x" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {}", path);

        let status = delete(&client, &token, &path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", path);
    }

    // Missing log wins over an invalid reference in the body
    let (status, _) =
        patch_json(&client, &token, "/equipment-logs/2147483647", json!({ "equipment": 2147483647 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_equipment_status_moves_freely() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let equipment = create_equipment(&client, &token, json!({ "name": "Forklift" })).await;
    let path = format!("/equipment/{}", id_of(&equipment));

    for status in ["discarded", "available", "broken", "in_use", "maintenance", "available"] {
        let (code, updated) = patch_json(&client, &token, &path, json!({ "status": status })).await;
        assert_eq!(code, StatusCode::OK, "{}", updated);
        assert_eq!(updated["status"], status);
    }

    let (code, body) = patch_json(&client, &token, &path, json!({ "status": null })).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "status");
}

#[tokio::test]
#[ignore]
async fn test_equipment_update_null_clears_and_absent_keeps() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, category) = post_json(&client, &token, "/categories", json!({ "name": "Tools" })).await;
    let equipment = create_equipment(
        &client,
        &token,
        json!({
            "name": "Saw",
            "category": category["id"],
            "description": "circular",
            "serial_number": "SAW-1"
        }),
    )
    .await;
    let path = format!("/equipment/{}", id_of(&equipment));

    let (status, renamed) = patch_json(&client, &token, &path, json!({ "name": "Table saw" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Table saw");
    assert_eq!(renamed["description"], "circular");
    assert_eq!(renamed["serial_number"], "SAW-1");
    assert_eq!(renamed["category"], category["id"]);
    assert_eq!(renamed["category_name"], "Tools");

    let (status, cleared) = patch_json(&client, &token, &path, json!({ "category": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["category"].is_null());
    assert!(cleared["category_name"].is_null());
    assert_eq!(cleared["description"], "circular");

    let (status, body) = patch_json(&client, &token, &path, json!({ "name": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "name");
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_log() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let user = create_user(&client, &token).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Tripod" })).await;
    let (_, log) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({ "equipment": equipment["id"], "checked_out_by": user["id"] }),
    )
    .await;
    let path = format!("/equipment-logs/{}", id_of(&log));

    let status = delete(&client, &token, &path).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_json(&client, &token, &path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Equipment and user survive
    let (status, _) = get_json(&client, &token, &format!("/equipment/{}", id_of(&equipment))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_json(&client, &token, &format!("/users/{}", id_of(&user))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_closed_checkout_can_be_reopened() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let user = create_user(&client, &token).await;
    let equipment = create_equipment(&client, &token, json!({ "name": "Microphone" })).await;
    let (_, log) = post_json(
        &client,
        &token,
        "/equipment-logs",
        json!({ "equipment": equipment["id"], "checked_out_by": user["id"] }),
    )
    .await;
    let path = format!("/equipment-logs/{}", id_of(&log));

    let (status, closed) =
        patch_json(&client, &token, &path, json!({ "checked_in_date": Utc::now().to_rfc3339() })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(closed["checked_in_date"].is_string());

    let (status, reopened) = patch_json(&client, &token, &path, json!({ "checked_in_date": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(reopened["checked_in_date"].is_null());
    assert_eq!(reopened["checked_out_date"], log["checked_out_date"]);
}
