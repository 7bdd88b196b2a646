// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Router tests: request validation, error bodies and state snapshots.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use common::{create_test_app, Scripted};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_missing_credential() {
    let (app, _) = create_test_app(Scripted::happy());
    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ai_available"], false);
}

#[tokio::test]
async fn test_initial_state_snapshot() {
    let (app, _) = create_test_app(Scripted::happy());
    let body = json_body(send(&app, Method::GET, "/api/state", None).await).await;

    assert_eq!(body["tab"], "explore");
    assert_eq!(body["viewMode"], "grid");
    assert_eq!(body["signedIn"], false);
    assert_eq!(body["headline"], "Find Your Getaway");
    assert_eq!(body["signIn"], "closed");
    assert_eq!(body["suggestions"]["loading"], false);
    assert!(body["detail"].is_null());
}

#[tokio::test]
async fn test_refresh_with_wait_returns_cards() {
    let (app, _) = create_test_app(Scripted::happy());
    let response = send(&app, Method::POST, "/api/suggestions/refresh?wait=true", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[0]["imageUrls"].as_array().unwrap().len(), 5);
    assert_eq!(cards[0]["priceLabel"], "Avg. $150/night");

    let map = json_body(send(&app, Method::GET, "/api/map", None).await).await;
    assert_eq!(map["pins"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_guest_personalized_tab_is_bad_request() {
    let (app, _) = create_test_app(Scripted::happy());
    let response = send(
        &app,
        Method::POST,
        "/api/tab",
        Some(json!({ "tab": "personalized" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_days_out_of_range_rejected() {
    let (app, _) = create_test_app(Scripted::happy());
    for days in [0, 15] {
        let response = send(&app, Method::POST, "/api/days", Some(json!({ "days": days }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "days = {}", days);
    }
}

#[tokio::test]
async fn test_overlong_search_rejected() {
    let (app, _) = create_test_app(Scripted::happy());
    let query = "a".repeat(201);
    let response = send(&app, Method::POST, "/api/search", Some(json!({ "query": query }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_suggestion_is_not_found() {
    let (app, _) = create_test_app(Scripted::happy());
    let response = send(&app, Method::POST, "/api/suggestions/missing/select", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_flow_and_download() {
    let (app, _) = create_test_app(Scripted::happy());
    send(&app, Method::POST, "/api/suggestions/refresh?wait=true", None).await;

    let body = json_body(
        send(&app, Method::POST, "/api/suggestions/s0/select?wait=true", None).await,
    )
    .await;
    assert_eq!(body["detail"]["suggestion"]["id"], "s0");
    assert_eq!(body["detail"]["days"], 4);
    assert_eq!(body["accommodationCards"].as_array().unwrap().len(), 3);

    let body = json_body(send(&app, Method::POST, "/api/days", Some(json!({ "days": 2 }))).await).await;
    assert_eq!(body["detail"]["days"], 2);
    assert_eq!(body["nightsLabel"], "(1 night)");

    let missing = send(&app, Method::GET, "/api/export/itinerary", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/api/plan?wait=true", None).await;
    let export = json_body(send(&app, Method::GET, "/api/export/itinerary", None).await).await;
    assert_eq!(export["filename"], "EdenAI_Itinerary.pdf");
    assert_eq!(export["title"], "Eden AI Getaway Details");
    assert_eq!(export["pages"][0][0], "Day 1: Arrival and Unwinding");

    let download = send(&app, Method::GET, "/api/export/itinerary/download", None).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"EdenAI_Itinerary.txt\""
    );
    assert!(download
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_export_kind_rejected() {
    let (app, _) = create_test_app(Scripted::happy());
    let response = send(&app, Method::GET, "/api/export/brochure", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_profile_flow() {
    let (app, state) = create_test_app(Scripted::happy());
    send(&app, Method::POST, "/api/sign-in/open", None).await;
    let body = json_body(send(&app, Method::POST, "/api/sign-in/create-profile", None).await).await;
    assert_eq!(body["signIn"], "create_profile");

    let form = json!({
        "name": "grace hopper",
        "jobTitle": "Rear Admiral",
        "location": "Arlington, VA",
        "preferences": "Sailing, Compilers"
    });
    let response = send(&app, Method::POST, "/api/sign-in/profile?wait=true", Some(form)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["signedIn"], true);
    assert_eq!(body["tab"], "personalized");
    assert_eq!(body["headline"], "Welcome, Grace");
    assert_eq!(body["profile"]["workHours"], "40-50 hours/week");
    assert_eq!(body["cards"].as_array().unwrap().len(), 6);

    let logout = json_body(send(&app, Method::POST, "/api/logout?wait=true", None).await).await;
    assert_eq!(logout["signedIn"], false);
    assert_eq!(logout["tab"], "explore");
    assert!(state.controller.state().await.profile.is_guest());
}

#[tokio::test]
async fn test_blank_profile_form_rejected() {
    let (app, _) = create_test_app(Scripted::happy());
    send(&app, Method::POST, "/api/sign-in/open", None).await;
    send(&app, Method::POST, "/api/sign-in/create-profile", None).await;

    let form = json!({ "name": " ", "jobTitle": "x", "location": "y" });
    let response = send(&app, Method::POST, "/api/sign-in/profile", Some(form)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
