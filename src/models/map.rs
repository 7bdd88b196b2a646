// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view model: one pin per suggestion plus the bounds to fit.

use crate::models::GetawaySuggestion;
use geo::{BoundingRect, MultiPoint, Point};
use serde::Serialize;

/// Default centre when there is nothing to show (San Francisco).
pub const DEFAULT_CENTER: (f64, f64) = (37.7749, -122.4194);
pub const DEFAULT_ZOOM: u8 = 9;

/// A labelled pin; the label is shown on hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    pub title: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// South-west / north-east corners of the area to fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub pins: Vec<MapPin>,
    /// `None` means: use `center` and `zoom`
    pub bounds: Option<MapBounds>,
    pub center: (f64, f64),
    pub zoom: u8,
}

impl MapView {
    pub fn from_suggestions(suggestions: &[GetawaySuggestion]) -> Self {
        let pins: Vec<MapPin> = suggestions
            .iter()
            .map(|s| MapPin {
                id: s.id.clone(),
                title: s.title.clone(),
                location: s.location.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
            })
            .collect();

        // geo points are (x = longitude, y = latitude)
        let points: MultiPoint<f64> = pins
            .iter()
            .map(|p| Point::new(p.longitude, p.latitude))
            .collect();

        let bounds = points.bounding_rect().map(|rect| MapBounds {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        });

        let center = bounds
            .map(|b| ((b.south + b.north) / 2.0, (b.west + b.east) / 2.0))
            .unwrap_or(DEFAULT_CENTER);

        Self {
            pins,
            bounds,
            center,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::image_urls;

    fn at(id: &str, latitude: f64, longitude: f64) -> GetawaySuggestion {
        GetawaySuggestion {
            id: id.to_string(),
            title: format!("Spot {}", id),
            location: "Somewhere".to_string(),
            description: String::new(),
            image_urls: image_urls(id),
            price_per_night: 120.0,
            tags: Vec::new(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_empty_uses_default_center() {
        let view = MapView::from_suggestions(&[]);
        assert!(view.pins.is_empty());
        assert_eq!(view.bounds, None);
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_bounds_cover_all_pins() {
        let view = MapView::from_suggestions(&[
            at("1", 36.27, -121.81),
            at("2", 39.09, -120.03),
            at("3", 37.87, -122.27),
        ]);
        assert_eq!(view.pins.len(), 3);
        let bounds = view.bounds.unwrap();
        assert_eq!(bounds.south, 36.27);
        assert_eq!(bounds.north, 39.09);
        assert_eq!(bounds.west, -122.27);
        assert_eq!(bounds.east, -120.03);
    }
}
