// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in dialog and logout routes.
//!
//! These drive a UI-only flow. Nothing here authenticates anyone; the
//! "Google" path is simulated and signs in with a fixed demo profile.

use crate::controller::ViewSnapshot;
use crate::error::Result;
use crate::models::ProfileForm;
use crate::routes::{respond, WaitParams};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sign-in/open", post(open))
        .route("/api/sign-in/cancel", post(cancel))
        .route("/api/sign-in/create-profile", post(open_create_profile))
        .route("/api/sign-in/profile", post(create_profile))
        .route("/api/sign-in/google", post(google))
        .route("/api/logout", post(logout))
}

async fn open(State(state): State<Arc<AppState>>) -> Result<Json<ViewSnapshot>> {
    state.controller.open_sign_in().await?;
    Ok(Json(state.controller.snapshot().await))
}

async fn cancel(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    state.controller.cancel_sign_in().await;
    Json(state.controller.snapshot().await)
}

async fn open_create_profile(State(state): State<Arc<AppState>>) -> Result<Json<ViewSnapshot>> {
    state.controller.open_create_profile().await?;
    Ok(Json(state.controller.snapshot().await))
}

/// Submit the profile form and sign in with it.
async fn create_profile(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.create_profile(form).await?;
    Ok(respond(&state, pending, params.wait).await)
}

/// Start the simulated Google screens.
async fn google(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Result<Json<ViewSnapshot>> {
    let pending = state.controller.start_google_sign_in().await?;
    Ok(respond(&state, Some(pending), params.wait).await)
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WaitParams>,
) -> Json<ViewSnapshot> {
    tracing::info!("Logout requested");
    let pending = state.controller.logout().await;
    respond(&state, pending, params.wait).await
}
