// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Detail view and booking routes.

use crate::controller::ViewSnapshot;
use crate::error::Result;
use crate::routes::{respond, WaitParams};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/suggestions/{id}/select", post(select_suggestion))
        .route("/api/back", post(back))
        .route("/api/days", post(set_days))
        .route("/api/duration/suggest", post(suggest_duration))
        .route("/api/plan", post(generate_plan))
        .route("/api/packing-list", post(generate_packing_list))
        .route("/api/accommodations", post(fetch_accommodations))
        .route(
            "/api/accommodations/{index}/select",
            post(select_accommodation),
        )
        .route("/api/check-in", post(set_check_in))
        .route("/api/book", post(book))
}

async fn select_suggestion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.select_suggestion(&id).await?;
    Ok(respond(&state, Some(pending), params.wait).await)
}

async fn back(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Json<ViewSnapshot> {
    let pending = state.controller.back().await;
    respond(&state, pending, params.wait).await
}

// ─── Trip length and plans ───────────────────────────────────

#[derive(Deserialize, Validate)]
struct DaysRequest {
    #[validate(range(min = 1, max = 14))]
    days: u32,
}

async fn set_days(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DaysRequest>,
) -> Result<Json<ViewSnapshot>> {
    request.validate()?;
    state.controller.set_days(request.days).await?;
    Ok(Json(state.controller.snapshot().await))
}

async fn suggest_duration(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.suggest_duration().await?;
    Ok(respond(&state, Some(pending), params.wait).await)
}

async fn generate_plan(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.generate_plan().await?;
    Ok(respond(&state, pending, params.wait).await)
}

async fn generate_packing_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.generate_packing_list().await?;
    Ok(respond(&state, pending, params.wait).await)
}

// ─── Stays and booking ───────────────────────────────────────

async fn fetch_accommodations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.fetch_accommodations().await?;
    Ok(respond(&state, Some(pending), params.wait).await)
}

async fn select_accommodation(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ViewSnapshot>> {
    state.controller.select_accommodation(index).await?;
    Ok(Json(state.controller.snapshot().await))
}

#[derive(Deserialize)]
struct CheckInRequest {
    /// `None` clears the date
    date: Option<NaiveDate>,
}

async fn set_check_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<ViewSnapshot>> {
    state.controller.set_check_in(request.date).await?;
    Ok(Json(state.controller.snapshot().await))
}

async fn book(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.book().await?;
    Ok(respond(&state, Some(pending), params.wait).await)
}
