// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Host-run accommodation listings and their display match score.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Range every match score falls into.
pub const MATCH_SCORE_RANGE: RangeInclusive<u8> = 75..=98;

/// A non-commercial stay near a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub name: String,
    /// Display name of the host, e.g. "Maria & John"
    pub hosted_by: String,
    /// 4.0 to 5.0 with one decimal
    pub rating: f64,
    pub price_per_night: u32,
    pub description: String,
}

/// Accommodation as shown in the detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationCard {
    #[serde(flatten)]
    pub accommodation: Accommodation,
    /// Hidden for guests
    pub match_score: Option<u8>,
    pub selected: bool,
}

/// Stable identifier of accommodation `index` within suggestion `suggestion_id`.
pub fn match_seed(suggestion_id: &str, index: usize) -> String {
    format!("{}-{}", suggestion_id, index)
}

/// Deterministic match score for a seed, always within `MATCH_SCORE_RANGE`.
///
/// Folds UTF-16 code units with `h = h * 31 + c` in wrapping 32-bit
/// arithmetic, then maps `|h| mod 24` onto 75..=98.
pub fn match_score(seed: &str) -> u8 {
    let hash = seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    let span = u32::from(MATCH_SCORE_RANGE.end() - MATCH_SCORE_RANGE.start()) + 1;
    // unsigned_abs keeps i32::MIN representable
    MATCH_SCORE_RANGE.start() + (hash.unsigned_abs() % span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_score_known_values() {
        // "a" -> 97 -> 97 % 24 = 1
        assert_eq!(match_score("a"), 76);
        // "ab" -> 97 * 31 + 98 = 3105 -> 3105 % 24 = 9
        assert_eq!(match_score("ab"), 84);
        assert_eq!(match_score(""), 75);
    }

    #[test]
    fn test_match_score_is_pure_and_bounded() {
        for index in 0..50 {
            let seed = match_seed("suggestion-7", index);
            let score = match_score(&seed);
            assert_eq!(score, match_score(&seed));
            assert!(MATCH_SCORE_RANGE.contains(&score), "{} out of range", score);
        }
    }

    #[test]
    fn test_match_score_handles_overflowing_seeds() {
        let long_seed = "ü".repeat(10_000);
        assert!(MATCH_SCORE_RANGE.contains(&match_score(&long_seed)));
    }

    #[test]
    fn test_indices_usually_differ() {
        let scores: std::collections::HashSet<u8> =
            (0..3).map(|i| match_score(&match_seed("1", i))).collect();
        // "1-0", "1-1", "1-2" differ by one in the last code unit
        assert_eq!(scores.len(), 3);
    }
}
