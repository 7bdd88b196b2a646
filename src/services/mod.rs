// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - completion gateway and its collaborators.

pub mod gateway;
pub mod gemini;
pub mod prompts;
pub mod schema;

pub use gateway::{CompletionRequest, CompletionService, Gateway};
pub use gemini::GeminiClient;
pub use schema::{Schema, SchemaType};
