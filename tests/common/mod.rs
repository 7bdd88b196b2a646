// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use getaway_planner::config::Config;
use getaway_planner::controller::Controller;
use getaway_planner::error::{AppError, Result};
use getaway_planner::routes::create_router;
use getaway_planner::services::{CompletionRequest, CompletionService, Gateway};
use getaway_planner::AppState;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Which gateway operation produced a prompt.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Personalized,
    General,
    Predictions,
    Plan,
    PackingList,
    Duration,
    Accommodations,
}

pub fn classify(prompt: &str) -> Op {
    if prompt.contains("burnout-prevention getaways") {
        Op::Personalized
    } else if prompt.starts_with("You are a travel agent.") {
        Op::General
    } else if prompt.contains("is typing a search query") {
        Op::Predictions
    } else if prompt.contains("wellness and travel expert") {
        Op::Plan
    } else if prompt.contains("pragmatic travel assistant") {
        Op::PackingList
    } else if prompt.contains("burnout prevention expert") {
        Op::Duration
    } else {
        Op::Accommodations
    }
}

/// One scripted reply.
pub struct Reply {
    pub delay: Duration,
    pub result: std::result::Result<String, AppError>,
}

#[allow(dead_code)]
impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(body.into()),
        }
    }

    pub fn err(error: AppError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Script = dyn Fn(Op, &CompletionRequest) -> Reply + Send + Sync;

/// Fake completion service driven by a closure; records every prompt.
pub struct Scripted {
    script: Box<Script>,
    pub prompts: Mutex<Vec<(Op, String)>>,
}

#[allow(dead_code)]
impl Scripted {
    pub fn new(script: impl Fn(Op, &CompletionRequest) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Well-formed answers for every operation.
    pub fn happy() -> Arc<Self> {
        Self::new(|op, _| happy_reply(op))
    }

    pub fn calls(&self, op: Op) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(seen, _)| *seen == op)
            .count()
    }

    pub fn last_prompt(&self, op: Op) -> Option<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(seen, _)| *seen == op)
            .map(|(_, prompt)| prompt.clone())
    }
}

#[async_trait]
impl CompletionService for Scripted {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let op = classify(&request.prompt);
        self.prompts
            .lock()
            .unwrap()
            .push((op, request.prompt.clone()));
        let reply = (self.script)(op, request);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

pub fn happy_reply(op: Op) -> Reply {
    match op {
        Op::Personalized | Op::General => Reply::ok(suggestions_json("s", 6, 150.0)),
        Op::Predictions => Reply::ok(
            json!([
                "Mountain cabins in Aspen",
                "Mount Fuji hiking trails",
                "Rocky Mountain National Park",
                "Blue Mountains Australia"
            ])
            .to_string(),
        ),
        Op::Plan => Reply::ok("Day 1: Arrival and Unwinding\n- Check in\n- Sunset walk"),
        Op::PackingList => Reply::ok("Clothing\n- Layers\n\nToiletries\n- Sunscreen"),
        Op::Duration => Reply::ok(r#"{"days": 4}"#),
        Op::Accommodations => Reply::ok(accommodations_json()),
    }
}

/// `count` suggestions with ids `{prefix}0..`.
pub fn suggestions_json(prefix: &str, count: usize, price: f64) -> String {
    let items: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("{}{}", prefix, i),
                "title": format!("Getaway {}{}", prefix, i),
                "location": "Near San Francisco, CA",
                "description": "Quiet trails and ocean air.",
                "pricePerNight": price,
                "tags": ["Nature", "Quiet"],
                "latitude": 37.0 + i as f64 / 10.0,
                "longitude": -122.0 - i as f64 / 10.0,
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}

pub fn accommodations_json() -> String {
    json!([
        {"name": "The Sunstone Loft", "hostedBy": "Maria & John", "rating": 4.8,
         "pricePerNight": 180, "description": "Sunny loft."},
        {"name": "Cedar Hollow", "hostedBy": "Ada", "rating": 4.6,
         "pricePerNight": 140, "description": "Cabin in the woods."},
        {"name": "Tide House", "hostedBy": "Sam", "rating": 4.9,
         "pricePerNight": 220, "description": "On the beach."}
    ])
    .to_string()
}

/// Controller over a scripted fake, with the given prediction debounce.
#[allow(dead_code)]
pub fn controller(fake: Arc<Scripted>, debounce: Duration) -> Controller {
    Controller::new(Gateway::new(fake), debounce)
}

/// Create a test app backed by a scripted fake.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(fake: Arc<Scripted>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let controller = Controller::new(Gateway::new(fake), config.prediction_debounce());
    let state = Arc::new(AppState { config, controller });
    (create_router(state.clone()), state)
}
