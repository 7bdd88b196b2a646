// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Getaway suggestion model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of synthesized images per suggestion.
pub const IMAGE_COUNT: usize = 5;

/// User-selected trip style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStyle {
    /// Secluded, low-key getaways with lodging.
    #[default]
    #[serde(alias = "chill")]
    Relaxed,
    /// Attractions within the closest major city, no lodging cost.
    Touristy,
}

impl fmt::Display for TripStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripStyle::Relaxed => write!(f, "Relaxed"),
            TripStyle::Touristy => write!(f, "Touristy"),
        }
    }
}

/// A single getaway produced by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetawaySuggestion {
    /// Unique within one result set
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Always `IMAGE_COUNT` long, derived from the title
    pub image_urls: Vec<String>,
    /// 0 means an attraction with no lodging cost
    pub price_per_night: f64,
    pub tags: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Suggestion as returned by the model, before images are attached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSuggestion {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub price_per_night: f64,
    pub tags: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<RawSuggestion> for GetawaySuggestion {
    fn from(raw: RawSuggestion) -> Self {
        Self {
            image_urls: image_urls(&raw.title),
            id: raw.id,
            title: raw.title,
            location: raw.location,
            description: raw.description,
            price_per_night: raw.price_per_night,
            tags: raw.tags,
            latitude: raw.latitude,
            longitude: raw.longitude,
        }
    }
}

impl GetawaySuggestion {
    /// Card price badge; only relaxed getaways with a nightly cost show one.
    pub fn price_label(&self, style: TripStyle) -> Option<String> {
        if style == TripStyle::Relaxed && self.price_per_night > 0.0 {
            Some(format!("Avg. ${}/night", self.price_per_night.round()))
        } else {
            None
        }
    }
}

/// Deterministic image URLs seeded by the title, so the same suggestion
/// always shows the same pictures.
pub fn image_urls(title: &str) -> Vec<String> {
    let seed = urlencoding::encode(title);
    (0..IMAGE_COUNT)
        .map(|i| format!("https://picsum.photos/seed/{}-{}/800/600", seed, i))
        .collect()
}
