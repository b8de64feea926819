//! API integration tests.
//!
//! These run against a live server (with its database and Redis) started
//! separately. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated admin token
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

/// Helper to create a department with a unique name, returning its ID
async fn create_department(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/departments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create department");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No department ID")
}

/// Helper to create a computer, returning the full body
async fn create_computer(client: &Client, token: &str, name: &str, department_id: i64) -> Value {
    let response = client
        .post(format!("{}/computers", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name, "department_id": department_id }))
        .send()
        .await
        .expect("Failed to create computer");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

fn unique(name: &str) -> String {
    format!("{}-{}", name, std::process::id())
}

#[tokio::test]
#[ignore]
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
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
async fn test_login_missing_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_login_throttle_serializes_same_origin() {
    // Two concurrent attempts from one forwarded origin: the lock admits
    // one at a time, so at most one may be throttled and at least one must
    // be evaluated normally.
    let client = Client::new();

    let attempt = |client: Client| async move {
        client
            .post(format!("{}/auth/login", BASE_URL))
            .header("X-Forwarded-For", "203.0.113.77")
            .json(&json!({ "username": "admin", "password": "admin" }))
            .send()
            .await
            .expect("Failed to send request")
            .status()
            .as_u16()
    };

    let (a, b) = tokio::join!(attempt(client.clone()), attempt(client.clone()));

    assert!(a == 200 || a == 429, "unexpected status {}", a);
    assert!(b == 200 || b == 429, "unexpected status {}", b);
    assert!(a == 200 || b == 200, "both attempts throttled");

    // The lock is released once the first attempt completes, so a follow-up
    // from the same origin goes through.
    let c = attempt(client).await;
    assert_eq!(c, 200);
}

#[tokio::test]
#[ignore]
async fn test_asset_tag_sequence() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let dept_name = unique("Tagging");
    let department_id = create_department(&client, &token, &dept_name).await;

    let first = create_computer(&client, &token, "Laptop", department_id).await;
    let second = create_computer(&client, &token, "Laptop", department_id).await;

    let prefix = format!("LAPTOP-{}", dept_name.to_uppercase());
    let first_tag = first["asset_tag"].as_str().expect("No asset tag");
    let second_tag = second["asset_tag"].as_str().expect("No asset tag");

    assert_eq!(first_tag, format!("{}-01", prefix));
    assert_eq!(second_tag, format!("{}-02", prefix));

    // A fresh computer always starts in inventory
    assert_eq!(first["status"], "inventory");
}

#[tokio::test]
#[ignore]
async fn test_assignment_rejected_for_faulty_computer() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Faulty")).await;
    let computer = create_computer(&client, &token, "Workstation", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let mut employee_ids = Vec::new();
    for i in 0..2 {
        let response = client
            .post(format!("{}/employees", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "username": unique(&format!("faulty-user-{}", i)),
                "password": "password123",
                "department_id": department_id
            }))
            .send()
            .await
            .expect("Failed to onboard employee");
        assert_eq!(response.status(), 201);
        let employee: Value = response.json().await.expect("Failed to parse response");
        employee_ids.push(employee["id"].as_i64().expect("No employee ID"));
    }

    // Open custody for the first employee so the faulty flag survives
    // reconciliation (an unassigned computer always derives to inventory)
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "computer_id": computer_id, "employee_id": employee_ids[0] }))
        .send()
        .await
        .expect("Failed to open assignment");
    assert_eq!(response.status(), 201);

    let response = client
        .put(format!("{}/computers/{}", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "faulty" }))
        .send()
        .await
        .expect("Failed to update computer");
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["status"], "faulty");

    // Opening against a faulty computer is rejected with no new ledger row
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "computer_id": computer_id, "employee_id": employee_ids[1] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/computers/{}/assignments", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list assignments");
    let history: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(history.as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_my_computer_flow() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Custody")).await;
    let computer = create_computer(&client, &token, "MacBook", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let username = unique("custody-user");
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": username,
            "password": "password123",
            "department_id": department_id
        }))
        .send()
        .await
        .expect("Failed to onboard employee");
    assert_eq!(response.status(), 201);
    let employee: Value = response.json().await.expect("Failed to parse response");
    let employee_id = employee["id"].as_i64().expect("No employee ID");

    // Before any assignment: 404
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .expect("Failed to login as employee");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    let employee_token = body["token"].as_str().expect("No token").to_string();

    let response = client
        .get(format!("{}/my-computer", BASE_URL))
        .header("Authorization", format!("Bearer {}", employee_token))
        .send()
        .await
        .expect("Failed to fetch my-computer");
    assert_eq!(response.status(), 404);

    // Open custody, then the view resolves from the ledger
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
        .send()
        .await
        .expect("Failed to open assignment");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/my-computer", BASE_URL))
        .header("Authorization", format!("Bearer {}", employee_token))
        .send()
        .await
        .expect("Failed to fetch my-computer");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "MacBook");
    assert!(body["asset_tag"].is_string());
    assert!(body["current_assignment"]["start_date"].is_string());
    assert!(body["repair_history"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_open_assignment_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Dup")).await;
    let computer = create_computer(&client, &token, "Desktop", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let mut employee_ids = Vec::new();
    for i in 0..2 {
        let response = client
            .post(format!("{}/employees", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "username": unique(&format!("dup-user-{}", i)),
                "password": "password123",
                "department_id": department_id
            }))
            .send()
            .await
            .expect("Failed to onboard employee");
        assert_eq!(response.status(), 201);
        let employee: Value = response.json().await.expect("Failed to parse response");
        employee_ids.push(employee["id"].as_i64().expect("No employee ID"));
    }

    let open = |employee_id: i64| {
        client
            .post(format!("{}/assignments", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
            .send()
    };

    let response = open(employee_ids[0]).await.expect("Failed to open");
    assert_eq!(response.status(), 201);

    // Second open for the same computer is rejected
    let response = open(employee_ids[1]).await.expect("Failed to send");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_bulk_close_reports_count_and_keeps_rows() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Bulk")).await;

    let mut assignment_ids = Vec::new();
    let mut computer_ids = Vec::new();
    for i in 0..2 {
        let computer = create_computer(&client, &token, "Ultrabook", department_id).await;
        let computer_id = computer["id"].as_i64().expect("No computer ID");
        computer_ids.push(computer_id);

        let response = client
            .post(format!("{}/employees", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "username": unique(&format!("bulk-user-{}", i)),
                "password": "password123",
                "department_id": department_id
            }))
            .send()
            .await
            .expect("Failed to onboard employee");
        let employee: Value = response.json().await.expect("Failed to parse response");
        let employee_id = employee["id"].as_i64().expect("No employee ID");

        let response = client
            .post(format!("{}/assignments", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
            .send()
            .await
            .expect("Failed to open assignment");
        assert_eq!(response.status(), 201);
        let assignment: Value = response.json().await.expect("Failed to parse response");
        assignment_ids.push(assignment["id"].as_i64().expect("No assignment ID"));
    }

    let response = client
        .post(format!("{}/assignments/close", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "ids": assignment_ids }))
        .send()
        .await
        .expect("Failed to bulk close");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["closed"], 2);

    // Rows are closed, not deleted, and the computers return to inventory
    for computer_id in computer_ids {
        let response = client
            .get(format!("{}/computers/{}/assignments", BASE_URL, computer_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to list assignments");
        let history: Value = response.json().await.expect("Failed to parse response");
        let rows = history.as_array().expect("Expected array");
        assert_eq!(rows.len(), 1);
        assert!(rows[0]["end_date"].is_string());

        let response = client
            .get(format!("{}/computers/{}", BASE_URL, computer_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to fetch computer");
        let computer: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(computer["status"], "inventory");
    }
}

#[tokio::test]
#[ignore]
async fn test_close_rejects_end_date_before_start() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Backdate")).await;
    let computer = create_computer(&client, &token, "Notebook", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let response = client
        .post(format!("{}/employees", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": unique("backdate-user"),
            "password": "password123",
            "department_id": department_id
        }))
        .send()
        .await
        .expect("Failed to onboard employee");
    let employee: Value = response.json().await.expect("Failed to parse response");
    let employee_id = employee["id"].as_i64().expect("No employee ID");

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
        .send()
        .await
        .expect("Failed to open assignment");
    assert_eq!(response.status(), 201);
    let assignment: Value = response.json().await.expect("Failed to parse response");
    let assignment_id = assignment["id"].as_i64().expect("No assignment ID");

    // An end date before the interval started is rejected, not a 500
    let response = client
        .post(format!("{}/assignments/{}/close", BASE_URL, assignment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "end_date": "2000-01-01T00:00:00Z" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // The interval is still open
    let response = client
        .get(format!("{}/computers/{}/assignments", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list assignments");
    let history: Value = response.json().await.expect("Failed to parse response");
    let rows = history.as_array().expect("Expected array");
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["end_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_concurrent_opens_have_one_winner() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Race")).await;
    let computer = create_computer(&client, &token, "Convertible", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let mut employee_ids = Vec::new();
    for i in 0..2 {
        let response = client
            .post(format!("{}/employees", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "username": unique(&format!("race-user-{}", i)),
                "password": "password123",
                "department_id": department_id
            }))
            .send()
            .await
            .expect("Failed to onboard employee");
        assert_eq!(response.status(), 201);
        let employee: Value = response.json().await.expect("Failed to parse response");
        employee_ids.push(employee["id"].as_i64().expect("No employee ID"));
    }

    let open = |client: Client, token: String, employee_id: i64| async move {
        client
            .post(format!("{}/assignments", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
            .send()
            .await
            .expect("Failed to send request")
            .status()
            .as_u16()
    };

    let (a, b) = tokio::join!(
        open(client.clone(), token.clone(), employee_ids[0]),
        open(client.clone(), token.clone(), employee_ids[1])
    );

    // Exactly one winner: the loser fails its precondition check, the
    // partial unique index or serialization, all surfaced as 409
    let mut statuses = [a, b];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);

    let response = client
        .get(format!("{}/computers/{}/assignments", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list assignments");
    let history: Value = response.json().await.expect("Failed to parse response");
    let rows = history.as_array().expect("Expected array");
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["end_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_department_move_revalidates_retained_role() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let dept_a = create_department(&client, &token, &unique("MoveFrom")).await;
    let dept_b = create_department(&client, &token, &unique("MoveTo")).await;

    let response = client
        .post(format!("{}/departments/{}/roles", BASE_URL, dept_a))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Technician" }))
        .send()
        .await
        .expect("Failed to create role");
    assert_eq!(response.status(), 201);
    let role: Value = response.json().await.expect("Failed to parse response");
    let role_a = role["id"].as_i64().expect("No role ID");

    let response = client
        .post(format!("{}/employees", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": unique("mover"),
            "password": "password123",
            "department_id": dept_a,
            "role_id": role_a
        }))
        .send()
        .await
        .expect("Failed to onboard employee");
    assert_eq!(response.status(), 201);
    let employee: Value = response.json().await.expect("Failed to parse response");
    let employee_id = employee["id"].as_i64().expect("No employee ID");

    // Moving departments while keeping a role from the old one is rejected
    let response = client
        .put(format!("{}/employees/{}", BASE_URL, employee_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "department_id": dept_b }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Moving together with a role from the new department goes through
    let response = client
        .post(format!("{}/departments/{}/roles", BASE_URL, dept_b))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Technician" }))
        .send()
        .await
        .expect("Failed to create role");
    let role: Value = response.json().await.expect("Failed to parse response");
    let role_b = role["id"].as_i64().expect("No role ID");

    let response = client
        .put(format!("{}/employees/{}", BASE_URL, employee_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "department_id": dept_b, "role_id": role_b }))
        .send()
        .await
        .expect("Failed to update employee");
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["department_id"], dept_b);
    assert_eq!(updated["role_id"], role_b);
}

#[tokio::test]
#[ignore]
async fn test_offboarding_closes_assignments() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Offboard")).await;
    let computer = create_computer(&client, &token, "Tower", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let response = client
        .post(format!("{}/employees", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": unique("leaver"),
            "password": "password123",
            "department_id": department_id
        }))
        .send()
        .await
        .expect("Failed to onboard employee");
    let employee: Value = response.json().await.expect("Failed to parse response");
    let employee_id = employee["id"].as_i64().expect("No employee ID");

    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "computer_id": computer_id, "employee_id": employee_id }))
        .send()
        .await
        .expect("Failed to open assignment");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, employee_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to offboard");
    assert_eq!(response.status(), 204);

    // History survives with an end date; the computer is back in inventory
    let response = client
        .get(format!("{}/computers/{}/assignments", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list assignments");
    let history: Value = response.json().await.expect("Failed to parse response");
    let rows = history.as_array().expect("Expected array");
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["end_date"].is_string());

    let response = client
        .get(format!("{}/computers/{}", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch computer");
    let computer: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(computer["status"], "inventory");
}

#[tokio::test]
#[ignore]
async fn test_repair_history_append_only() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let department_id = create_department(&client, &token, &unique("Repairs")).await;
    let computer = create_computer(&client, &token, "Server", department_id).await;
    let computer_id = computer["id"].as_i64().expect("No computer ID");

    let response = client
        .post(format!("{}/computers/{}/repairs", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "repaired_component": "PSU",
            "repair_cost": 120.50,
            "comments": "Replaced under warranty"
        }))
        .send()
        .await
        .expect("Failed to record repair");
    assert_eq!(response.status(), 201);

    // Negative cost is rejected
    let response = client
        .post(format!("{}/computers/{}/repairs", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "repaired_component": "Fan",
            "repair_cost": -5
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/computers/{}/repairs", BASE_URL, computer_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list repairs");
    let history: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(history.as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/computers", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
