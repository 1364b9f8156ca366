use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use solar_system_demo::server::{AppState, router, ticker};
use solar_system_demo::sim::clock::ClockSettings;
use solar_system_demo::sim::solar_system;

fn state() -> AppState {
    AppState::new(
        Arc::new(solar_system()),
        ClockSettings::default(),
        Duration::from_millis(16),
        16,
    )
}

async fn call(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, "GET", uri, Body::empty()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, "POST", uri, Body::from(body.to_string())).await
}

#[tokio::test]
async fn lists_every_body_with_its_position() {
    let app = router(state());
    let (status, body) = get(&app, "/api/bodies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 9);
    assert_eq!(body["Earth"]["orbital_radius"], 40.0);
    assert_eq!(body["Earth"]["current_position"]["x"], 40.0);
    assert_eq!(body["Sun"]["color"], "#ffff00");
}

#[tokio::test]
async fn single_body_lookup() {
    let app = router(state());
    let (status, body) = get(&app, "/api/body/Mars").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mars");
    assert_eq!(body["data"]["orbital_period"], 687.0);
    assert!(body["info"].as_str().unwrap().starts_with("Mars is about"));
    assert_eq!(body["current_position"]["x"], 60.0);
}

#[tokio::test]
async fn unknown_body_is_404() {
    let app = router(state());
    let (status, body) = get(&app, "/api/body/Vulcan").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Body not found" }));
}

#[tokio::test]
async fn relationship_is_symmetric_and_has_a_distance() {
    let app = router(state());
    let (_, forward) = get(&app, "/api/relationship/Earth/Mars").await;
    let (_, backward) = get(&app, "/api/relationship/Mars/Earth").await;

    assert_eq!(forward["relationship"], backward["relationship"]);
    assert!(forward["relationship"].as_str().unwrap().starts_with("Mars and Earth"));
    // Both start on the +x axis: 20 scene units apart.
    let km = forward["current_distance_km"].as_f64().unwrap();
    assert!((km - 20.0 * 1.5e8 / 40.0).abs() < 1.0);
}

#[tokio::test]
async fn undocumented_pairs_get_a_default() {
    let app = router(state());
    let (status, body) = get(&app, "/api/relationship/Neptune/Mercury").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["relationship"],
        "No specific relationship documented for Neptune and Mercury."
    );
    assert!(body["current_distance_km"].is_number());

    let (_, body) = get(&app, "/api/relationship/Earth/Vulcan").await;
    assert!(body["current_distance_km"].is_null());
}

#[tokio::test]
async fn pause_toggles() {
    let app = router(state());
    let (_, first) = post(&app, "/api/simulation/pause", json!({})).await;
    let (_, second) = post(&app, "/api/simulation/pause", json!({})).await;

    assert_eq!(first["paused"], true);
    assert_eq!(second["paused"], false);
}

#[tokio::test]
async fn reset_rewinds_and_unpauses() {
    let state = state();
    let app = router(state.clone());
    ticker::tick_once(&state);
    post(&app, "/api/simulation/pause", json!({})).await;

    let (_, body) = post(&app, "/api/simulation/reset", json!({})).await;
    assert_eq!(body["message"], "Simulation reset");
    assert_eq!(body["time"], 0.0);
    assert_eq!(body["positions"]["Earth"]["x"], 40.0);

    let (_, snapshot) = get(&app, "/api/simulation/state").await;
    assert_eq!(snapshot["paused"], false);
    assert_eq!(snapshot["time"], 0.0);
}

#[tokio::test]
async fn state_reports_time_in_hundredths() {
    let state = state();
    let app = router(state.clone());
    for _ in 0..3 {
        ticker::tick_once(&state);
    }

    let (_, snapshot) = get(&app, "/api/simulation/state").await;
    assert_eq!(snapshot["time"], 0.05);
    assert_eq!(snapshot["positions"].as_object().unwrap().len(), 9);
}

#[tokio::test]
async fn speed_ignores_non_positive_values() {
    let app = router(state());

    let (_, body) = post(&app, "/api/simulation/speed", json!({ "speed": 2.5 })).await;
    assert_eq!(body["speed"], 2.5);

    let (_, body) = post(&app, "/api/simulation/speed", json!({ "speed": -1.0 })).await;
    assert_eq!(body["speed"], 2.5);

    let (_, body) = post(&app, "/api/simulation/speed", json!({ "speed": 0.0 })).await;
    assert_eq!(body["speed"], 2.5);

    let (_, body) = post(&app, "/api/simulation/speed", json!({})).await;
    assert_eq!(body["speed"], 1.0);

    let (_, snapshot) = get(&app, "/api/simulation/state").await;
    assert_eq!(snapshot["time_scale"], 1.0);
}

#[tokio::test]
async fn garbage_speed_body_is_a_bad_request() {
    let app = router(state());
    let (status, body) = call(&app, "POST", "/api/simulation/speed", Body::from("speed=fast")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn state_reports_the_clock() {
    let state = state();
    let app = router(state.clone());
    ticker::tick_once(&state);

    let (status, body) = get(&app, "/api/simulation/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paused"], false);
    assert_eq!(body["time_scale"], 1.0);
    assert!(body["time"].as_f64().unwrap() > 0.0);
    assert_eq!(body["positions"].as_object().unwrap().len(), 9);
}
