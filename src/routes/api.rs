// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! State, navigation and search routes.

use crate::controller::{Tab, ViewMode, ViewSnapshot};
use crate::error::Result;
use crate::models::{MapView, TripStyle};
use crate::routes::{respond, WaitParams};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/map", get(get_map))
        .route("/api/tab", post(set_tab))
        .route("/api/trip-style", post(set_trip_style))
        .route("/api/view-mode", post(set_view_mode))
        .route("/api/suggestions/refresh", post(refresh_suggestions))
        .route("/api/search", post(search))
        .route("/api/search/input", post(search_input))
        .route("/api/search/focus", post(search_focus))
}

// ─── State ───────────────────────────────────────────────────

async fn get_state(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    Json(state.controller.snapshot().await)
}

async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapView> {
    Json(state.controller.map_view().await)
}

// ─── Navigation ──────────────────────────────────────────────

#[derive(Deserialize)]
struct TabRequest {
    tab: Tab,
}

async fn set_tab(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(request): Json<TabRequest>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.switch_tab(request.tab).await?;
    Ok(respond(&state, pending, params.wait).await)
}

#[derive(Deserialize)]
struct TripStyleRequest {
    style: TripStyle,
}

async fn set_trip_style(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(request): Json<TripStyleRequest>,
) -> Json<ViewSnapshot> {
    let pending = state.controller.set_trip_style(request.style).await;
    respond(&state, pending, params.wait).await
}

#[derive(Deserialize)]
struct ViewModeRequest {
    mode: ViewMode,
}

async fn set_view_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewModeRequest>,
) -> Json<ViewSnapshot> {
    state.controller.set_view_mode(request.mode).await;
    Json(state.controller.snapshot().await)
}

// ─── Suggestions ─────────────────────────────────────────────

async fn refresh_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Json<ViewSnapshot> {
    let pending = state.controller.refresh_suggestions().await;
    respond(&state, Some(pending), params.wait).await
}

#[derive(Deserialize, Validate)]
struct SearchRequest {
    #[validate(length(max = 200))]
    query: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ViewSnapshot>> {
    request.validate()?;
    let pending = state.controller.search(&request.query).await?;
    Ok(respond(&state, pending, params.wait).await)
}

async fn search_input(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ViewSnapshot>> {
    request.validate()?;
    let pending = state.controller.search_input(request.query).await;
    Ok(respond(&state, pending, params.wait).await)
}

#[derive(Deserialize)]
struct SearchFocusRequest {
    focused: bool,
}

async fn search_focus(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(request): Json<SearchFocusRequest>,
) -> Json<ViewSnapshot> {
    let pending = state.controller.set_search_focus(request.focused).await;
    respond(&state, pending, params.wait).await
}
