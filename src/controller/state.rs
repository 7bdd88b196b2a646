// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View state held by the controller.
//!
//! Everything the presentation layer renders lives here. Async results land
//! through `AsyncSlot`, which only accepts the outcome of the most recently
//! issued request.

use crate::controller::sign_in::SignInFlow;
use crate::error::AppError;
use crate::models::booking::{check_out_date, nights_label};
use crate::models::{
    match_score, match_seed, Accommodation, AccommodationCard, BookingStatus, GetawaySuggestion,
    TripStyle, UserProfile,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days shown when a detail view opens.
pub const DEFAULT_DAYS: u32 = 3;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Personalized,
    Explore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Map,
}

/// Identifies one issued request. Tickets are unique for the lifetime of
/// the controller, so a ticket from a discarded view never matches a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Loading flag, error and data of one async operation.
#[derive(Debug, Clone, Serialize)]
pub struct AsyncSlot<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
    #[serde(skip)]
    current: Option<Ticket>,
}

impl<T> Default for AsyncSlot<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
            current: None,
        }
    }
}

impl<T> AsyncSlot<T> {
    /// Start a request: clear previous data and error, set loading.
    pub fn begin(&mut self, ticket: Ticket) {
        self.current = Some(ticket);
        self.loading = true;
        self.error = None;
        self.data = None;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current == Some(ticket)
    }

    /// Apply a result if `ticket` is still current.
    ///
    /// Returns `false` (and changes nothing) for a superseded request.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, AppError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => self.data = Some(data),
            Err(e) => self.error = Some(e.user_message()),
        }
        true
    }

    /// Record a local validation failure and drop any in-flight request.
    pub fn reject(&mut self, message: &str) {
        self.current = None;
        self.loading = false;
        self.data = None;
        self.error = Some(message.to_string());
    }
}

/// Drill-down view of one suggestion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    /// Ticket issued when the view opened; identifies this view instance
    #[serde(skip)]
    pub(crate) opened: Ticket,
    pub suggestion: GetawaySuggestion,
    /// Trip style in effect for this view (relaxed on the explore tab)
    pub trip_style: TripStyle,
    pub days: u32,
    /// Suggested day count
    pub duration: AsyncSlot<u32>,
    pub plan: AsyncSlot<String>,
    pub packing_list: AsyncSlot<String>,
    pub accommodations: AsyncSlot<Vec<Accommodation>>,
    pub selected_accommodation: Option<usize>,
    pub check_in: Option<NaiveDate>,
    pub booking: BookingStatus,
}

impl DetailView {
    pub fn new(
        opened: Ticket,
        suggestion: GetawaySuggestion,
        trip_style: TripStyle,
        check_in: NaiveDate,
    ) -> Self {
        Self {
            opened,
            suggestion,
            trip_style,
            days: DEFAULT_DAYS,
            duration: AsyncSlot::default(),
            plan: AsyncSlot::default(),
            packing_list: AsyncSlot::default(),
            accommodations: AsyncSlot::default(),
            selected_accommodation: None,
            check_in: Some(check_in),
            booking: BookingStatus::Unbooked,
        }
    }

    pub fn days_valid(&self) -> bool {
        (MIN_DAYS..=MAX_DAYS).contains(&self.days)
    }

    pub fn selected_accommodation(&self) -> Option<&Accommodation> {
        let index = self.selected_accommodation?;
        self.accommodations.data.as_ref()?.get(index)
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        if self.days == 0 {
            return None;
        }
        self.check_in.map(|date| check_out_date(date, self.days))
    }

    /// Accommodation cards with match scores; scores are hidden for guests.
    pub fn accommodation_cards(&self, show_scores: bool) -> Vec<AccommodationCard> {
        self.accommodations
            .data
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, accommodation)| AccommodationCard {
                accommodation: accommodation.clone(),
                match_score: show_scores
                    .then(|| match_score(&match_seed(&self.suggestion.id, index))),
                selected: self.selected_accommodation == Some(index),
            })
            .collect()
    }
}

/// Search input with debounced predictions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBox {
    pub query: String,
    pub focused: bool,
    pub predictions: Vec<String>,
    pub predicting: bool,
    #[serde(skip)]
    pub(crate) current: Option<Ticket>,
}

/// Complete UI-visible state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub profile: UserProfile,
    pub signed_in: bool,
    pub tab: Tab,
    pub view_mode: ViewMode,
    pub trip_style: TripStyle,
    /// Location the explore tab searches around
    pub explore_location: String,
    pub suggestions: AsyncSlot<Vec<GetawaySuggestion>>,
    /// Set when the result set no longer matches tab/style/profile
    pub suggestions_stale: bool,
    pub detail: Option<DetailView>,
    pub search: SearchBox,
    pub sign_in: SignInFlow,
    /// Simulated Google flow that owns the dialog's timed screens
    #[serde(skip)]
    pub(crate) sign_in_attempt: Option<Ticket>,
    #[serde(skip)]
    next_ticket: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        let profile = UserProfile::guest();
        Self {
            explore_location: profile.location.clone(),
            profile,
            signed_in: false,
            tab: Tab::Explore,
            view_mode: ViewMode::Grid,
            trip_style: TripStyle::Relaxed,
            suggestions: AsyncSlot::default(),
            suggestions_stale: false,
            detail: None,
            search: SearchBox::default(),
            sign_in: SignInFlow::Closed,
            sign_in_attempt: None,
            next_ticket: 0,
        }
    }
}

impl ViewState {
    pub fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Trip style used for cards and detail views on the active tab.
    pub fn effective_style(&self) -> TripStyle {
        match self.tab {
            Tab::Personalized => self.trip_style,
            Tab::Explore => TripStyle::Relaxed,
        }
    }

    /// Detail view opened with `ticket`, if it is still showing.
    pub fn detail_for(&mut self, ticket: Ticket) -> Option<&mut DetailView> {
        self.detail.as_mut().filter(|d| d.opened == ticket)
    }

    pub fn headline(&self) -> String {
        if self.signed_in {
            format!("Welcome, {}", self.profile.first_name())
        } else {
            "Find Your Getaway".to_string()
        }
    }

    pub fn subtitle(&self) -> String {
        match self.tab {
            Tab::Personalized => {
                "AI-matched getaways to recalibrate work-life balance.".to_string()
            }
            Tab::Explore => format!(
                "Scanning for destinations near: {}.",
                self.explore_location
            ),
        }
    }
}

/// Suggestion card with its derived badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionCard {
    #[serde(flatten)]
    pub suggestion: GetawaySuggestion,
    pub price_label: Option<String>,
}

/// State plus derived display values, as sent to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    #[serde(flatten)]
    pub state: ViewState,
    pub headline: String,
    pub subtitle: String,
    pub cards: Vec<SuggestionCard>,
    pub accommodation_cards: Vec<AccommodationCard>,
    pub nights_label: Option<String>,
    pub check_out: Option<NaiveDate>,
}

impl From<ViewState> for ViewSnapshot {
    fn from(state: ViewState) -> Self {
        let style = state.effective_style();
        let cards = state
            .suggestions
            .data
            .iter()
            .flatten()
            .map(|s| SuggestionCard {
                price_label: s.price_label(style),
                suggestion: s.clone(),
            })
            .collect();
        let (accommodation_cards, nights, check_out) = match &state.detail {
            Some(detail) => (
                detail.accommodation_cards(state.signed_in),
                nights_label(detail.days),
                detail.check_out(),
            ),
            None => (Vec::new(), None, None),
        };

        Self {
            headline: state.headline(),
            subtitle: state.subtitle(),
            cards,
            accommodation_cards,
            nights_label: nights,
            check_out,
            state,
        }
    }
}
