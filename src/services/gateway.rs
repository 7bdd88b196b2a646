// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt/response gateway.
//!
//! Turns typed operations into prompts plus declared response schemas, and
//! decodes what comes back into the data model. A response either matches
//! the declared schema completely or the operation fails with a decode
//! error; there is no partial recovery.

use crate::error::{AppError, Result};
use crate::models::suggestion::RawSuggestion;
use crate::models::{Accommodation, GetawaySuggestion, TripStyle, UserProfile};
use crate::services::prompts;
use crate::services::schema::Schema;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

pub const SUGGESTION_COUNT: usize = 6;
pub const PREDICTION_COUNT: usize = 4;
pub const ACCOMMODATION_COUNT: usize = 3;

/// Trip length used when the model's answer is unusable.
pub const FALLBACK_DURATION_DAYS: u32 = 3;

/// One call to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Declared JSON shape; `None` asks for free text
    pub schema: Option<Schema>,
}

impl CompletionRequest {
    pub fn text(prompt: String) -> Self {
        Self {
            prompt,
            schema: None,
        }
    }

    pub fn structured(prompt: String, schema: Schema) -> Self {
        Self {
            prompt,
            schema: Some(schema),
        }
    }
}

/// A text/JSON completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Return the raw text of the completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Typed front door to the completion service.
#[derive(Clone)]
pub struct Gateway {
    completion: Arc<dyn CompletionService>,
}

impl Gateway {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Six getaways tailored to the profile and trip style.
    ///
    /// Touristy results are attractions, so their nightly price is forced
    /// to 0 regardless of what the model returned.
    pub async fn fetch_personalized_suggestions(
        &self,
        profile: &UserProfile,
        style: TripStyle,
    ) -> Result<Vec<GetawaySuggestion>> {
        let prompt = prompts::personalized_suggestions(profile, style);
        let mut suggestions = self
            .fetch_suggestions("personalized_suggestions", prompt, style)
            .await?;

        if style == TripStyle::Touristy {
            for suggestion in &mut suggestions {
                suggestion.price_per_night = 0.0;
            }
        }
        Ok(suggestions)
    }

    /// Six popular getaways near a free-text location.
    pub async fn fetch_general_suggestions(
        &self,
        location_query: &str,
    ) -> Result<Vec<GetawaySuggestion>> {
        let prompt = prompts::general_suggestions(location_query);
        self.fetch_suggestions("general_suggestions", prompt, TripStyle::Relaxed)
            .await
    }

    /// Four autocompletions for a partial query.
    ///
    /// Never fails: any error yields an empty list.
    pub async fn fetch_search_predictions(&self, partial_query: &str) -> Vec<String> {
        let schema = Schema::array(
            Schema::string().describe("A concise and appealing travel search query."),
        )
        .describe("An array of 4 unique travel search suggestions.")
        .exactly(PREDICTION_COUNT);

        let prompt = prompts::search_predictions(partial_query);
        match self
            .structured::<Vec<String>>("search_predictions", prompt, &schema)
            .await
        {
            Ok(predictions) => predictions,
            Err(e) => {
                tracing::debug!(error = %e, "Search predictions unavailable");
                Vec::new()
            }
        }
    }

    /// Day-by-day itinerary as free text.
    pub async fn fetch_relaxation_plan(
        &self,
        suggestion: &GetawaySuggestion,
        days: u32,
    ) -> Result<String> {
        let prompt = prompts::relaxation_plan(suggestion, days);
        self.text("relaxation_plan", prompt).await
    }

    /// Categorized packing list as free text.
    pub async fn fetch_packing_list(
        &self,
        suggestion: &GetawaySuggestion,
        days: u32,
    ) -> Result<String> {
        let prompt = prompts::packing_list(suggestion, days);
        self.text("packing_list", prompt).await
    }

    /// Suggested trip length in days.
    ///
    /// A malformed, non-numeric or non-positive answer yields
    /// `FALLBACK_DURATION_DAYS`; only a failed call is an error.
    pub async fn fetch_suggested_duration(
        &self,
        profile: &UserProfile,
        suggestion: &GetawaySuggestion,
    ) -> Result<u32> {
        let schema = Schema::object().property(
            "days",
            Schema::integer().describe("The optimal number of days for the trip."),
        );
        let request =
            CompletionRequest::structured(prompts::trip_duration(profile, suggestion), schema);

        let text = self.completion.complete(&request).await?;
        let days = parse_duration(&text).unwrap_or_else(|| {
            tracing::warn!(
                response = %truncate(&text, 200),
                "Unusable trip duration, using fallback"
            );
            FALLBACK_DURATION_DAYS
        });
        tracing::debug!(days, "Suggested trip duration");
        Ok(days)
    }

    /// Three host-run stays near the suggestion.
    pub async fn fetch_unique_accommodations(
        &self,
        suggestion: &GetawaySuggestion,
    ) -> Result<Vec<Accommodation>> {
        let schema = Schema::array(
            Schema::object()
                .property("name", Schema::string())
                .property("hostedBy", Schema::string())
                .property("rating", Schema::number())
                .property("pricePerNight", Schema::integer())
                .property("description", Schema::string()),
        )
        .exactly(ACCOMMODATION_COUNT);

        let prompt = prompts::unique_accommodations(suggestion);
        self.structured("unique_accommodations", prompt, &schema)
            .await
    }

    async fn fetch_suggestions(
        &self,
        operation: &'static str,
        prompt: String,
        style: TripStyle,
    ) -> Result<Vec<GetawaySuggestion>> {
        let schema = suggestion_schema(style);
        let raw: Vec<RawSuggestion> = self.structured(operation, prompt, &schema).await?;

        let duplicate = {
            let mut seen = HashSet::new();
            raw.iter()
                .find(|s| !seen.insert(s.id.as_str()))
                .map(|s| s.id.clone())
        };
        if let Some(id) = duplicate {
            return Err(AppError::Decode(format!("duplicate suggestion id \"{}\"", id)));
        }

        Ok(raw.into_iter().map(GetawaySuggestion::from).collect())
    }

    async fn text(&self, operation: &'static str, prompt: String) -> Result<String> {
        tracing::debug!(operation, "Requesting free-text completion");
        let text = self
            .completion
            .complete(&CompletionRequest::text(prompt))
            .await
            .inspect_err(|e| tracing::error!(operation, error = %e, "Completion failed"))?;
        Ok(text)
    }

    async fn structured<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        prompt: String,
        schema: &Schema,
    ) -> Result<T> {
        tracing::debug!(operation, "Requesting structured completion");
        let request = CompletionRequest::structured(prompt, schema.clone());
        let text = self
            .completion
            .complete(&request)
            .await
            .inspect_err(|e| tracing::error!(operation, error = %e, "Completion failed"))?;

        decode_structured(&text, schema)
            .inspect_err(|e| tracing::error!(operation, error = %e, "Completion did not match schema"))
    }
}

/// Parse `text` as JSON, check it against `schema`, then decode it.
pub fn decode_structured<T: DeserializeOwned>(text: &str, schema: &Schema) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| AppError::Decode(format!("response is not JSON: {}", e)))?;
    schema.validate(&value).map_err(AppError::Decode)?;
    serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
}

fn suggestion_schema(style: TripStyle) -> Schema {
    let price_description = match style {
        TripStyle::Relaxed => "Estimated price per night.",
        TripStyle::Touristy => "Estimated price per night (0 for tourist attractions).",
    };

    Schema::array(
        Schema::object()
            .property(
                "id",
                Schema::string().describe("A unique identifier for the suggestion."),
            )
            .property(
                "title",
                Schema::string().describe("The catchy title of the getaway."),
            )
            .property(
                "location",
                Schema::string().describe("The specific location of the getaway."),
            )
            .property(
                "description",
                Schema::string().describe("A compelling 2-3 sentence description."),
            )
            .property("pricePerNight", Schema::number().describe(price_description))
            .property(
                "tags",
                Schema::array(Schema::string())
                    .describe("Relevant tags like \"Relaxing\", \"Adventure\", etc."),
            )
            .property(
                "latitude",
                Schema::number().describe("The latitude of the location."),
            )
            .property(
                "longitude",
                Schema::number().describe("The longitude of the location."),
            ),
    )
    .exactly(SUGGESTION_COUNT)
}

#[derive(Deserialize)]
struct DurationReply {
    days: serde_json::Value,
}

/// Positive whole number of days from a duration reply, if there is one.
fn parse_duration(text: &str) -> Option<u32> {
    let reply: DurationReply = serde_json::from_str(text.trim()).ok()?;
    let days = reply.days.as_f64()?;
    if days < 1.0 || days.fract() != 0.0 || days > f64::from(u32::MAX) {
        return None;
    }
    Some(days as u32)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
