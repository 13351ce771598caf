//! Route tests for the ThriftLife API.
//!
//! Each test drives the real router against a fresh in-memory store.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use testresult::TestResult;
use thriftlife_api::{adapters::InMemoryAdapter, config::Config, web};
use thriftlife_core::domain::{Donation, DonationStatus, ImpactStats, ThriftItem, User};
use thriftlife_core::ports::{DatabaseService, PortResult};
use tower::ServiceExt;
use uuid::Uuid;

fn app_with(config: Config) -> Router {
    web::router(web::AppState::new(Arc::new(InMemoryAdapter::new()), config))
}

fn app() -> Router {
    app_with(Config::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn donation_form() -> Value {
    json!({
        "donor_name": "Priya Patel",
        "email": "priya@example.com",
        "phone": "555-0199",
        "address": "9 Orchard Lane",
        "city": "Eco City",
        "postal_code": "12345",
        "pickup_date": "2024-06-01",
        "pickup_time": "10:00 AM",
        "categories": ["Men"],
        "estimated_weight": 4.0
    })
}

#[tokio::test]
async fn health_and_greeting_respond() -> TestResult {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap_or_default().contains("Second Life"));
    Ok(())
}

#[tokio::test]
async fn scheduled_donation_can_be_tracked() -> TestResult {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/api/donations", Some(donation_form())).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Donation = serde_json::from_value(created)?;
    let tracking = created.tracking_id.as_str().to_string();
    assert!(tracking.starts_with("DN"));
    assert!(tracking[2..].chars().all(|c| c.is_ascii_digit()));

    let (status, fetched) = send(&app, Method::GET, &format!("/api/donations/{tracking}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "Scheduled");
    assert_eq!(fetched["points_earned"], 0);
    Ok(())
}

#[tokio::test]
async fn incomplete_donation_is_rejected() -> TestResult {
    let app = app();
    let mut form = donation_form();
    form["categories"] = json!([]);
    let (status, body) = send(&app, Method::POST, "/api/donations", Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap_or_default().contains("category"));

    let (_, listed) = send(&app, Method::GET, "/api/donations", None).await;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn omitted_form_keys_are_a_400_with_detail() -> TestResult {
    let app = app();
    let mut form = donation_form();
    if let Some(fields) = form.as_object_mut() {
        for key in ["categories", "city", "postal_code"] {
            fields.remove(key);
        }
    }
    let (status, body) = send(&app, Method::POST, "/api/donations", Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap_or_default().contains("category"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/donations",
        Some(json!({ "donor_name": "Priya Patel" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap_or_default().contains("email"));
    Ok(())
}

#[tokio::test]
async fn unknown_tracking_id_is_404() -> TestResult {
    let (status, body) = send(&app(), Method::GET, "/api/donations/DN00000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Donation not found");
    Ok(())
}

#[tokio::test]
async fn status_moves_forward_and_completion_awards_points() -> TestResult {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/donations", Some(donation_form())).await;
    let created: Donation = serde_json::from_value(created)?;

    let uri = format!(
        "/api/donations/{}/status?new_status=Picked%20Up&assigned_agent=Agent-001",
        created.id
    );
    let (status, updated) = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Picked Up");
    assert_eq!(updated["assigned_agent"], "Agent-001");

    let uri = format!("/api/donations/{}/status?new_status=Completed", created.id);
    let (status, updated) = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Donation = serde_json::from_value(updated)?;
    assert_eq!(updated.status, DonationStatus::Completed);
    assert_eq!(updated.points_earned, 40);
    assert!(updated.processed_at.is_some());
    assert_eq!(updated.assigned_agent.as_deref(), Some("Agent-001"));
    Ok(())
}

#[tokio::test]
async fn backward_status_is_a_conflict_unless_disabled() -> TestResult {
    for (enforce, expected) in [(true, StatusCode::CONFLICT), (false, StatusCode::OK)] {
        let app = app_with(Config {
            enforce_forward_status: enforce,
            ..Config::default()
        });
        let (_, created) = send(&app, Method::POST, "/api/donations", Some(donation_form())).await;
        let created: Donation = serde_json::from_value(created)?;

        let forward = format!("/api/donations/{}/status?new_status=Processed", created.id);
        assert_eq!(send(&app, Method::PUT, &forward, None).await.0, StatusCode::OK);

        let backward = format!("/api/donations/{}/status?new_status=Scheduled", created.id);
        assert_eq!(send(&app, Method::PUT, &backward, None).await.0, expected);
    }
    Ok(())
}

#[tokio::test]
async fn status_update_for_unknown_donation_is_404() -> TestResult {
    let uri = format!(
        "/api/donations/{}/status?new_status=Completed",
        uuid::Uuid::new_v4()
    );
    let (status, _) = send(&app(), Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn seeded_catalog_can_be_filtered() -> TestResult {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/seed-mock-data", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = send(&app, Method::GET, "/api/thrift-items", None).await;
    let all: Vec<ThriftItem> = serde_json::from_value(all)?;
    assert_eq!(all.len(), 6);

    let (_, men) = send(&app, Method::GET, "/api/thrift-items?category=Men&max_price=20", None).await;
    let men: Vec<ThriftItem> = serde_json::from_value(men)?;
    assert_eq!(men.len(), 1);
    assert_eq!(men[0].name, "Casual Summer Shirt");

    let (_, pricey) = send(&app, Method::GET, "/api/thrift-items?min_price=35", None).await;
    let pricey: Vec<ThriftItem> = serde_json::from_value(pricey)?;
    let names: Vec<_> = pricey.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Vintage Denim Jacket", "Vintage Leather Shoes"]);
    Ok(())
}

#[tokio::test]
async fn created_item_gets_placeholder_and_is_retrievable() -> TestResult {
    let app = app();
    let body = json!({
        "name": "Wool Scarf",
        "description": "Warm and soft",
        "category": "Accessories",
        "size": "S",
        "condition": "Needs Repair",
        "price": 7.5
    });
    let (status, created) = send(&app, Method::POST, "/api/thrift-items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: ThriftItem = serde_json::from_value(created)?;
    assert_eq!(created.images, vec![thriftlife_core::domain::PLACEHOLDER_IMAGE.to_string()]);

    let (status, fetched) = send(&app, Method::GET, &format!("/api/thrift-items/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Wool Scarf");

    let negative = json!({
        "name": "Broken Umbrella",
        "description": "",
        "category": "Accessories",
        "size": "M",
        "condition": "Fair",
        "price": -1
    });
    let (status, _) = send(&app, Method::POST, "/api/thrift-items", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn reseeding_keeps_submitted_donations() -> TestResult {
    let app = app();
    send(&app, Method::POST, "/api/seed-mock-data", None).await;
    let (_, before) = send(&app, Method::GET, "/api/donations", None).await;

    let (_, created) = send(&app, Method::POST, "/api/donations", Some(donation_form())).await;
    let created: Donation = serde_json::from_value(created)?;

    let (status, body) = send(&app, Method::POST, "/api/seed-mock-data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Mock data already present");

    let uri = format!("/api/donations/{}", created.tracking_id);
    let (status, found) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], json!(created.id));

    let (_, after) = send(&app, Method::GET, "/api/donations", None).await;
    let after: Vec<Donation> = serde_json::from_value(after)?;
    let before: Vec<Donation> = serde_json::from_value(before)?;
    assert_eq!(after.len(), before.len() + 1);
    for seeded in &before {
        assert!(after.iter().any(|d| d.tracking_id == seeded.tracking_id));
    }
    Ok(())
}

#[tokio::test]
async fn impact_stats_reflect_seeded_donations() -> TestResult {
    let app = app();
    send(&app, Method::POST, "/api/seed-mock-data", None).await;
    let (status, stats) = send(&app, Method::GET, "/api/impact-stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats: ImpactStats = serde_json::from_value(stats)?;
    assert!((stats.total_clothes_collected_kg - 13.7).abs() < 1e-9);
    assert!((stats.carbon_footprint_saved_kg - 28.77).abs() < 1e-9);
    assert_eq!(stats.total_donors, 2);
    assert_eq!(stats.total_items_reused, 0);
    assert_eq!(stats.total_items_recycled, 2);
    Ok(())
}

#[tokio::test]
async fn user_profiles_round_trip() -> TestResult {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": "Sam Rivera", "email": "sam@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["total_points"], 0);

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", uuid::Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

/// Holds every donation read for a while before handing it back, so that
/// concurrent status updates work from the same snapshot.
struct SlowReads {
    inner: InMemoryAdapter,
    delay: Duration,
}

#[async_trait]
impl DatabaseService for SlowReads {
    async fn insert_donation(&self, donation: &Donation) -> PortResult<()> {
        self.inner.insert_donation(donation).await
    }

    async fn list_donations(&self) -> PortResult<Vec<Donation>> {
        self.inner.list_donations().await
    }

    async fn get_donation_by_tracking_id(&self, tracking_id: &str) -> PortResult<Donation> {
        self.inner.get_donation_by_tracking_id(tracking_id).await
    }

    async fn get_donation(&self, id: Uuid) -> PortResult<Donation> {
        let donation = self.inner.get_donation(id).await?;
        tokio::time::sleep(self.delay).await;
        Ok(donation)
    }

    async fn save_donation_status(&self, donation: &Donation, forward_only: bool) -> PortResult<()> {
        self.inner.save_donation_status(donation, forward_only).await
    }

    async fn insert_thrift_item(&self, item: &ThriftItem) -> PortResult<()> {
        self.inner.insert_thrift_item(item).await
    }

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>> {
        self.inner.list_thrift_items().await
    }

    async fn get_thrift_item(&self, id: Uuid) -> PortResult<ThriftItem> {
        self.inner.get_thrift_item(id).await
    }

    async fn insert_user(&self, user: &User) -> PortResult<()> {
        self.inner.insert_user(user).await
    }

    async fn get_user(&self, id: Uuid) -> PortResult<User> {
        self.inner.get_user(id).await
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_updates_never_move_a_donation_backwards() -> TestResult {
    let store = Arc::new(SlowReads {
        inner: InMemoryAdapter::new(),
        delay: Duration::from_millis(50),
    });
    let app = web::router(web::AppState::new(store, Config::default()));
    let (_, created) = send(&app, Method::POST, "/api/donations", Some(donation_form())).await;
    let created: Donation = serde_json::from_value(created)?;

    // Completed reads first and writes at 50 ms; Picked Up reads the same
    // Scheduled snapshot at 10 ms and writes last.
    let completed = {
        let app = app.clone();
        let uri = format!("/api/donations/{}/status?new_status=Completed", created.id);
        tokio::spawn(async move { send(&app, Method::PUT, &uri, None).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let uri = format!("/api/donations/{}/status?new_status=Picked%20Up", created.id);
    let (picked_up_status, body) = send(&app, Method::PUT, &uri, None).await;

    assert_eq!(completed.await?.0, StatusCode::OK);
    assert_eq!(picked_up_status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap_or_default().contains("Completed"));

    let (_, stored) = send(&app, Method::GET, &format!("/api/donations/{}", created.tracking_id), None).await;
    let stored: Donation = serde_json::from_value(stored)?;
    assert_eq!(stored.status, DonationStatus::Completed);
    assert_eq!(stored.points_earned, 40);
    Ok(())
}
