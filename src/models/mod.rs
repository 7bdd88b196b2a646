// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod accommodation;
pub mod booking;
pub mod map;
pub mod profile;
pub mod suggestion;

pub use accommodation::{match_score, match_seed, Accommodation, AccommodationCard};
pub use booking::BookingStatus;
pub use map::MapView;
pub use profile::{ProfileForm, UserProfile};
pub use suggestion::{GetawaySuggestion, TripStyle};
