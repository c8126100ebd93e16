//! End-to-end workflow tests driving the full router over an in-memory
//! database: employee onboarding, contract creation with overlap rules,
//! the leave request lifecycle and the notification hub.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};
use tower::ServiceExt;

use hr_server::core::Config;
use hr_server::notify::{HubPublisher, NotificationHub, NotificationPublisher};
use hr_server::{DbService, ServerState, api};

async fn test_state() -> ServerState {
    let db = DbService::memory().await.unwrap();
    let hub = Arc::new(NotificationHub::new(64));
    let publisher: Arc<dyn NotificationPublisher> = Arc::new(HubPublisher::new(hub.clone()));
    ServerState::with_parts(Config::from_env(), db.pool, hub, publisher)
}

fn today() -> NaiveDate {
    shared::util::today_utc()
}

fn day(offset: i64) -> String {
    (today() + Duration::days(offset)).to_string()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Onboard an employee with department and position, return the employee id
async fn onboard(app: &Router, email: &str) -> i64 {
    let (status, dept) = send(
        app,
        "POST",
        "/api/departments",
        Some(json!({"name": "Engineering", "manager_id": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, pos) = send(
        app,
        "POST",
        "/api/positions",
        Some(json!({"title": "Engineer", "department_id": dept["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, employee) = send(
        app,
        "POST",
        "/api/employees",
        Some(json!({
            "full_name": "Erin Example",
            "email": email,
            "phone": "+34 600 123 456",
            "avatar_url": null,
            "department_id": dept["id"],
            "position_id": pos["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["department_name"], "Engineering");
    employee["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = api::router(test_state().await);
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = api::router(test_state().await);
    onboard(&app, "dup@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(json!({
            "full_name": "Other Person",
            "email": "dup@example.com",
            "phone": null,
            "avatar_url": null,
            "department_id": null,
            "position_id": null,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn contract_rules_over_http() {
    let state = test_state().await;
    let app = api::router(state.clone());
    let emp = onboard(&app, "contracts@example.com").await;
    let mut events = state.hub.subscribe();

    // Create an active contract; employee id mismatch is rejected first
    let contract_body = json!({
        "employee_id": emp,
        "start_date": day(-30),
        "end_date": day(300),
        "employment_type": "FULL_TIME",
        "base_salary": 4200.0,
    });
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{}/contracts", emp + 1),
        Some(contract_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, contract) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/contracts"),
        Some(contract_body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contract["status"], "ACTIVE");
    assert_eq!(contract["employee_name"], "Erin Example");

    // The hub saw the activation
    let event = events.recv().await.unwrap();
    assert_eq!(event.name(), "ContractUpdated");

    // Overlapping second contract is refused
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/contracts"),
        Some(json!({
            "employee_id": emp,
            "start_date": day(0),
            "end_date": null,
            "employment_type": "PART_TIME",
            "base_salary": 1000.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "OVERLAPPING_CONTRACT");

    // Back-to-back renewal starting on the end date passes
    let (status, renewal) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/contracts"),
        Some(json!({
            "employee_id": emp,
            "start_date": day(300),
            "end_date": null,
            "employment_type": "FULL_TIME",
            "base_salary": 4600.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renewal["status"], "ACTIVE");

    // Point lookup and per-employee listing (newest first)
    let id = contract["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/contracts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], contract["id"]);

    let (status, listed) = send(&app, "GET", &format!("/api/employees/{emp}/contracts"), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], renewal["id"]);

    // Unknown employee 404s on the nested route
    let (status, body) = send(&app, "GET", "/api/employees/9999/contracts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn leave_request_lifecycle_over_http() {
    let state = test_state().await;
    let app = api::router(state.clone());
    let emp = onboard(&app, "leaves@example.com").await;

    // Active contract covering [today-30, today+300]
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/contracts"),
        Some(json!({
            "employee_id": emp,
            "start_date": day(-30),
            "end_date": day(300),
            "employment_type": "FULL_TIME",
            "base_salary": 4200.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Draft outside the contract is refused
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/leave-requests"),
        Some(json!({
            "employee_id": emp,
            "leave_type": "ANNUAL",
            "start_date": day(290),
            "end_date": day(310),
            "reason": "Too long",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_VALID_CONTRACT");

    // Contained draft succeeds
    let (status, leave) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/leave-requests"),
        Some(json!({
            "employee_id": emp,
            "leave_type": "ANNUAL",
            "start_date": day(10),
            "end_date": day(19),
            "reason": "Family trip",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["status"], "DRAFT");
    let leave_id = leave["id"].as_i64().unwrap();

    // Drafts can still be edited
    let (status, edited) = send(
        &app,
        "PUT",
        &format!("/api/leave-requests/{leave_id}"),
        Some(json!({"leave_type": "PERSONAL"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["leave_type"], "PERSONAL");

    // Submit; a second submit is an invalid transition
    let (status, submitted) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{leave_id}/submit"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["status"], "SUBMITTED");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{leave_id}/submit"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATUS_TRANSITION");

    // Approve with approver name
    let mut events = state.hub.subscribe();
    let (status, approved) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{leave_id}/approve"),
        Some(json!({"approver_name": "Jane"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["approver_name"], "Jane");

    let event = events.recv().await.unwrap();
    assert_eq!(event.name(), "LeaveRequestUpdated");

    // Overlapping second leave: draft and submit pass, approve collides
    let (status, second) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/leave-requests"),
        Some(json!({
            "employee_id": emp,
            "leave_type": "SICK",
            "start_date": day(14),
            "end_date": day(16),
            "reason": null,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let second_id = second["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{second_id}/submit"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{second_id}/approve"),
        Some(json!({"approver_name": "Jane"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "OVERLAPPING_LEAVE");

    // Reject it instead; terminal states refuse further actions
    let (status, rejected) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{second_id}/reject"),
        Some(json!({"approver_name": "Grace"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "REJECTED");
    assert_eq!(rejected["approver_name"], "Grace");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leave-requests/{second_id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Listing returns both, newest start date first
    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/employees/{emp}/leave-requests"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["id"], second_id);
}

#[tokio::test]
async fn employee_status_actions() {
    let app = api::router(test_state().await);
    let emp = onboard(&app, "status@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/set-on-leave"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ON_LEAVE");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/employees/{emp}/set-active"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ACTIVE");

    let (status, _) = send(&app, "POST", "/api/employees/9999/set-active", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
