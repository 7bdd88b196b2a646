// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Getaway Planner: AI-generated getaway recommendations
//!
//! This crate provides the backend for a travel-recommendation app. A
//! gateway turns planning requests into Gemini prompts and decodes the
//! replies; a controller holds the single-session view state and exposes
//! it to the frontend over a small JSON API.

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use controller::Controller;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub controller: Controller,
}
