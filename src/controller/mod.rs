// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View-state controller.
//!
//! Applies user actions to `ViewState` and schedules gateway calls. Methods
//! that start a request update state synchronously (loading flag, cleared
//! results) and hand back a `Pending` future that performs the call and
//! applies its outcome. The caller decides whether to await it or spawn it.
//!
//! The state lock is never held across a gateway call. Every async slot is
//! guarded by a ticket, so a slow response for a superseded request is
//! dropped instead of overwriting newer state.

pub mod sign_in;
pub mod state;

pub use sign_in::SignInFlow;
pub use state::{
    AsyncSlot, DetailView, SearchBox, SuggestionCard, Tab, Ticket, ViewMode, ViewSnapshot,
    ViewState,
};

use crate::error::{AppError, Result};
use crate::export::{Document, ExportKind};
use crate::models::booking::ReservationDetails;
use crate::models::{BookingStatus, MapView, ProfileForm, TripStyle, UserProfile};
use crate::services::Gateway;
use crate::time_utils::today_utc;
use chrono::NaiveDate;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use state::{MAX_DAYS, MIN_DAYS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Follow-up work of an action: a gateway call plus applying its result.
pub type Pending = BoxFuture<'static, ()>;

/// Shortest query that triggers search predictions.
pub const MIN_PREDICTION_QUERY_CHARS: usize = 3;

/// Time the simulated booking confirmation takes.
pub const BOOKING_DELAY: Duration = Duration::from_millis(2000);

const INVALID_PLAN_DAYS: &str = "Please enter a valid number of days.";
const INVALID_PACKING_DAYS: &str = "Please set a valid trip duration first.";

enum SuggestionQuery {
    Personalized(UserProfile, TripStyle),
    Explore(String),
}

/// Owner of the single state store.
#[derive(Clone)]
pub struct Controller {
    gateway: Gateway,
    state: Arc<Mutex<ViewState>>,
    debounce: Duration,
}

impl Controller {
    /// Controller in the guest state, with `debounce` before predictions.
    pub fn new(gateway: Gateway, debounce: Duration) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(ViewState::default())),
            debounce,
        }
    }

    /// Copy of the raw state.
    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// State plus derived display values.
    pub async fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::from(self.state().await)
    }

    /// Pins and bounds for the current result set.
    pub async fn map_view(&self) -> MapView {
        let state = self.state.lock().await;
        MapView::from_suggestions(state.suggestions.data.as_deref().unwrap_or_default())
    }

    // ─── Session ─────────────────────────────────────────────

    /// Replace the profile and show the personalized tab.
    ///
    /// An open detail view and its booking are left alone.
    pub async fn login(&self, profile: UserProfile) -> Option<Pending> {
        let mut state = self.state.lock().await;
        self.apply_login(&mut state, profile)
    }

    /// Back to the guest profile on the explore tab.
    pub async fn logout(&self) -> Option<Pending> {
        let mut state = self.state.lock().await;
        tracing::info!("Signed out");
        state.profile = UserProfile::guest();
        state.explore_location = state.profile.location.clone();
        state.signed_in = false;
        state.sign_in = SignInFlow::Closed;
        state.sign_in_attempt = None;
        self.show_tab(&mut state, Tab::Explore)
    }

    fn apply_login(&self, state: &mut ViewState, profile: UserProfile) -> Option<Pending> {
        tracing::info!(name = %profile.name, "Signed in");
        state.profile = profile;
        state.signed_in = true;
        state.sign_in = SignInFlow::Closed;
        state.sign_in_attempt = None;
        self.show_tab(state, Tab::Personalized)
    }

    // ─── Navigation ──────────────────────────────────────────

    pub async fn switch_tab(&self, tab: Tab) -> Result<Option<Pending>> {
        let mut state = self.state.lock().await;
        if tab == Tab::Personalized && !state.signed_in {
            return Err(AppError::BadRequest(
                "Sign in to see personalized getaways".to_string(),
            ));
        }
        if state.tab == tab {
            state.view_mode = ViewMode::Grid;
            return Ok(None);
        }
        Ok(self.show_tab(&mut state, tab))
    }

    pub async fn set_trip_style(&self, style: TripStyle) -> Option<Pending> {
        let mut state = self.state.lock().await;
        if state.trip_style == style {
            return None;
        }
        tracing::info!(%style, "Trip style changed");
        state.trip_style = style;
        if state.tab == Tab::Personalized {
            self.refresh_or_mark_stale(&mut state)
        } else {
            None
        }
    }

    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.state.lock().await.view_mode = mode;
    }

    fn show_tab(&self, state: &mut ViewState, tab: Tab) -> Option<Pending> {
        state.tab = tab;
        state.view_mode = ViewMode::Grid;
        self.refresh_or_mark_stale(state)
    }

    /// Refetch for the current tab, or remember to once the detail view closes.
    fn refresh_or_mark_stale(&self, state: &mut ViewState) -> Option<Pending> {
        if state.detail.is_some() {
            state.suggestions_stale = true;
            None
        } else {
            Some(self.begin_suggestions(state))
        }
    }

    // ─── Suggestions ─────────────────────────────────────────

    /// Refetch the result set for the current tab (the "re-scan" action).
    pub async fn refresh_suggestions(&self) -> Pending {
        let mut state = self.state.lock().await;
        self.begin_suggestions(&mut state)
    }

    /// Search the explore tab around `query`. Blank queries are ignored.
    pub async fn search(&self, query: &str) -> Result<Option<Pending>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let mut state = self.state.lock().await;
        if state.tab != Tab::Explore {
            return Err(AppError::BadRequest(
                "Search is only available on the explore tab".to_string(),
            ));
        }

        state.search.query = query.to_string();
        state.search.focused = false;
        state.search.predictions.clear();
        state.search.predicting = false;
        state.search.current = None;
        state.explore_location = query.to_string();
        Ok(self.refresh_or_mark_stale(&mut state))
    }

    fn begin_suggestions(&self, state: &mut ViewState) -> Pending {
        let ticket = state.issue();
        state.suggestions.begin(ticket);
        state.suggestions_stale = false;

        let query = match state.tab {
            Tab::Personalized => {
                state.explore_location = state.profile.location.clone();
                SuggestionQuery::Personalized(state.profile.clone(), state.trip_style)
            }
            Tab::Explore => SuggestionQuery::Explore(state.explore_location.clone()),
        };
        tracing::info!(tab = ?state.tab, ?ticket, "Fetching suggestions");

        let controller = self.clone();
        async move {
            let result = match &query {
                SuggestionQuery::Personalized(profile, style) => {
                    controller
                        .gateway
                        .fetch_personalized_suggestions(profile, *style)
                        .await
                }
                SuggestionQuery::Explore(location) => {
                    controller.gateway.fetch_general_suggestions(location).await
                }
            };

            let mut state = controller.state.lock().await;
            if !state.suggestions.complete(ticket, result) {
                tracing::debug!(?ticket, "Dropped stale suggestions");
            }
        }
        .boxed()
    }

    // ─── Search predictions ──────────────────────────────────

    /// Record a keystroke; schedules a debounced prediction request.
    pub async fn search_input(&self, query: String) -> Option<Pending> {
        let mut state = self.state.lock().await;
        state.search.query = query;
        self.begin_predictions(&mut state)
    }

    pub async fn set_search_focus(&self, focused: bool) -> Option<Pending> {
        let mut state = self.state.lock().await;
        state.search.focused = focused;
        self.begin_predictions(&mut state)
    }

    fn begin_predictions(&self, state: &mut ViewState) -> Option<Pending> {
        let long_enough = state.search.query.chars().count() >= MIN_PREDICTION_QUERY_CHARS;
        if !long_enough || !state.search.focused {
            state.search.current = None;
            state.search.predictions.clear();
            state.search.predicting = false;
            return None;
        }

        let ticket = state.issue();
        state.search.current = Some(ticket);
        let query = state.search.query.clone();

        let controller = self.clone();
        Some(
            async move {
                tokio::time::sleep(controller.debounce).await;
                {
                    let mut state = controller.state.lock().await;
                    if state.search.current != Some(ticket) {
                        return;
                    }
                    state.search.predicting = true;
                }

                let predictions = controller.gateway.fetch_search_predictions(&query).await;

                let mut state = controller.state.lock().await;
                if state.search.current == Some(ticket) {
                    state.search.predictions = predictions;
                    state.search.predicting = false;
                } else {
                    tracing::debug!(%query, "Dropped stale predictions");
                }
            }
            .boxed(),
        )
    }

    // ─── Detail view ─────────────────────────────────────────

    /// Open the detail view for suggestion `id`.
    ///
    /// The returned work fetches the suggested duration and the
    /// accommodations concurrently.
    pub async fn select_suggestion(&self, id: &str) -> Result<Pending> {
        let mut state = self.state.lock().await;
        let suggestion = state
            .suggestions
            .data
            .iter()
            .flatten()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {} not found", id)))?;

        let opened = state.issue();
        let style = state.effective_style();
        tracing::info!(id, title = %suggestion.title, "Opened getaway");
        state.detail = Some(DetailView::new(opened, suggestion, style, today_utc()));

        let duration = self.begin_duration(&mut state)?;
        let accommodations = self.begin_accommodations(&mut state)?;
        Ok(future::join(duration, accommodations).map(|_| ()).boxed())
    }

    /// Close the detail view; refetches if the result set went stale.
    pub async fn back(&self) -> Option<Pending> {
        let mut state = self.state.lock().await;
        state.detail = None;
        if state.suggestions_stale {
            Some(self.begin_suggestions(&mut state))
        } else {
            None
        }
    }

    pub async fn set_days(&self, days: u32) -> Result<()> {
        let mut state = self.state.lock().await;
        detail_mut(&mut state)?.days = days;
        Ok(())
    }

    /// Ask the model for a trip length (the "let AI decide" action).
    pub async fn suggest_duration(&self) -> Result<Pending> {
        let mut state = self.state.lock().await;
        self.begin_duration(&mut state)
    }

    fn begin_duration(&self, state: &mut ViewState) -> Result<Pending> {
        let ticket = state.issue();
        let profile = state.profile.clone();
        let detail = detail_mut(state)?;
        detail.duration.begin(ticket);
        let opened = detail.opened;
        let suggestion = detail.suggestion.clone();

        let controller = self.clone();
        Ok(async move {
            let result = controller
                .gateway
                .fetch_suggested_duration(&profile, &suggestion)
                .await;
            let suggested = result.as_ref().ok().copied();

            let mut state = controller.state.lock().await;
            if let Some(detail) = state.detail_for(opened) {
                if detail.duration.complete(ticket, result) {
                    if let Some(days) = suggested {
                        detail.days = days.clamp(MIN_DAYS, MAX_DAYS);
                    }
                }
            }
        }
        .boxed())
    }

    /// Generate the itinerary; `None` if the day count was rejected.
    pub async fn generate_plan(&self) -> Result<Option<Pending>> {
        let mut state = self.state.lock().await;
        let ticket = state.issue();
        let detail = detail_mut(&mut state)?;
        if !detail.days_valid() {
            detail.plan.reject(INVALID_PLAN_DAYS);
            return Ok(None);
        }
        detail.plan.begin(ticket);
        let (opened, suggestion, days) = (detail.opened, detail.suggestion.clone(), detail.days);

        let controller = self.clone();
        Ok(Some(
            async move {
                let result = controller
                    .gateway
                    .fetch_relaxation_plan(&suggestion, days)
                    .await;
                let mut state = controller.state.lock().await;
                if let Some(detail) = state.detail_for(opened) {
                    detail.plan.complete(ticket, result);
                }
            }
            .boxed(),
        ))
    }

    /// Generate the packing list; `None` if the day count was rejected.
    pub async fn generate_packing_list(&self) -> Result<Option<Pending>> {
        let mut state = self.state.lock().await;
        let ticket = state.issue();
        let detail = detail_mut(&mut state)?;
        if !detail.days_valid() {
            detail.packing_list.reject(INVALID_PACKING_DAYS);
            return Ok(None);
        }
        detail.packing_list.begin(ticket);
        let (opened, suggestion, days) = (detail.opened, detail.suggestion.clone(), detail.days);

        let controller = self.clone();
        Ok(Some(
            async move {
                let result = controller.gateway.fetch_packing_list(&suggestion, days).await;
                let mut state = controller.state.lock().await;
                if let Some(detail) = state.detail_for(opened) {
                    detail.packing_list.complete(ticket, result);
                }
            }
            .boxed(),
        ))
    }

    /// Refetch accommodations (retry after an error).
    pub async fn fetch_accommodations(&self) -> Result<Pending> {
        let mut state = self.state.lock().await;
        self.begin_accommodations(&mut state)
    }

    fn begin_accommodations(&self, state: &mut ViewState) -> Result<Pending> {
        let ticket = state.issue();
        let detail = detail_mut(state)?;
        if detail.booking != BookingStatus::Unbooked {
            return Err(AppError::BadRequest(
                "This getaway has already been booked".to_string(),
            ));
        }
        detail.accommodations.begin(ticket);
        detail.selected_accommodation = None;
        let (opened, suggestion) = (detail.opened, detail.suggestion.clone());

        let controller = self.clone();
        Ok(async move {
            let result = controller
                .gateway
                .fetch_unique_accommodations(&suggestion)
                .await;
            let mut state = controller.state.lock().await;
            if let Some(detail) = state.detail_for(opened) {
                detail.accommodations.complete(ticket, result);
            }
        }
        .boxed())
    }

    pub async fn select_accommodation(&self, index: usize) -> Result<()> {
        let mut state = self.state.lock().await;
        let detail = detail_mut(&mut state)?;
        if detail.booking != BookingStatus::Unbooked {
            return Err(AppError::BadRequest(
                "This getaway has already been booked".to_string(),
            ));
        }
        let count = detail.accommodations.data.as_ref().map_or(0, Vec::len);
        if index >= count {
            return Err(AppError::NotFound(format!("Accommodation {} not found", index)));
        }
        detail.selected_accommodation = Some(index);
        Ok(())
    }

    pub async fn set_check_in(&self, date: Option<NaiveDate>) -> Result<()> {
        let mut state = self.state.lock().await;
        detail_mut(&mut state)?.check_in = date;
        Ok(())
    }

    /// Reserve the selected stay.
    ///
    /// Moves to `Reserving` now and to `Reserved` after a simulated
    /// confirmation. There is no payment step and the status never reverts.
    pub async fn book(&self) -> Result<Pending> {
        let mut state = self.state.lock().await;
        let detail = detail_mut(&mut state)?;
        if detail.booking != BookingStatus::Unbooked {
            return Err(AppError::BadRequest(
                "This getaway has already been booked".to_string(),
            ));
        }
        let stay = detail
            .selected_accommodation()
            .map(|a| a.name.clone())
            .ok_or_else(|| AppError::BadRequest("Select a place to stay first".to_string()))?;
        detail.booking = BookingStatus::Reserving;
        let opened = detail.opened;
        tracing::info!(%stay, "Booking requested");

        let controller = self.clone();
        Ok(async move {
            tokio::time::sleep(BOOKING_DELAY).await;
            let mut state = controller.state.lock().await;
            if let Some(detail) = state.detail_for(opened) {
                detail.booking = BookingStatus::Reserved;
                tracing::info!(%stay, "Reservation held");
            }
        }
        .boxed())
    }

    // ─── Export ──────────────────────────────────────────────

    /// Build a downloadable document from the open detail view.
    pub async fn export(&self, kind: ExportKind) -> Result<Document> {
        let state = self.state.lock().await;
        let detail = state
            .detail
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No getaway is selected".to_string()))?;

        let missing = || AppError::NotFound(format!("No {} has been generated yet", kind));
        let content = match kind {
            ExportKind::Itinerary => detail.plan.data.clone().ok_or_else(missing)?,
            ExportKind::PackingList => detail.packing_list.data.clone().ok_or_else(missing)?,
            ExportKind::Reservation => {
                if detail.booking != BookingStatus::Reserved {
                    return Err(AppError::BadRequest(
                        "This getaway has not been booked yet".to_string(),
                    ));
                }
                ReservationDetails {
                    suggestion: &detail.suggestion,
                    trip_style: detail.trip_style,
                    accommodation: detail.selected_accommodation(),
                    check_in: detail.check_in,
                    days: detail.days,
                    plan: detail.plan.data.as_deref(),
                    packing_list: detail.packing_list.data.as_deref(),
                }
                .render()
            }
        };

        tracing::info!(%kind, "Exporting document");
        Ok(Document::new(kind, &content))
    }

    // ─── Sign-in dialog ──────────────────────────────────────

    pub async fn open_sign_in(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.signed_in {
            return Err(AppError::BadRequest("Already signed in".to_string()));
        }
        state.sign_in = SignInFlow::Chooser;
        Ok(())
    }

    pub async fn cancel_sign_in(&self) {
        let mut state = self.state.lock().await;
        state.sign_in = SignInFlow::Closed;
        state.sign_in_attempt = None;
    }

    pub async fn open_create_profile(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        require_sign_in_step(&state, SignInFlow::Chooser)?;
        state.sign_in = SignInFlow::CreateProfile;
        Ok(())
    }

    /// Sign in with a profile built from the form.
    pub async fn create_profile(&self, form: ProfileForm) -> Result<Option<Pending>> {
        let mut state = self.state.lock().await;
        require_sign_in_step(&state, SignInFlow::CreateProfile)?;
        let profile = form.into_profile()?;
        Ok(self.apply_login(&mut state, profile))
    }

    /// Walk the simulated Google screens, then sign in with the demo profile.
    ///
    /// Cancelling the dialog while a screen is showing stops the flow, even
    /// if a new flow has been started since.
    pub async fn start_google_sign_in(&self) -> Result<Pending> {
        let attempt = {
            let mut state = self.state.lock().await;
            require_sign_in_step(&state, SignInFlow::Chooser)?;
            let attempt = state.issue();
            state.sign_in = SignInFlow::GoogleSignIn;
            state.sign_in_attempt = Some(attempt);
            attempt
        };

        let controller = self.clone();
        Ok(async move {
            let mut step = SignInFlow::GoogleSignIn;
            while let Some((delay, next)) = step.after_delay() {
                tokio::time::sleep(delay).await;
                let mut state = controller.state.lock().await;
                if state.sign_in_attempt != Some(attempt) || state.sign_in != step {
                    tracing::debug!(?attempt, "Simulated sign-in abandoned");
                    return;
                }
                if next == SignInFlow::Closed {
                    let refresh = controller.apply_login(&mut state, UserProfile::demo());
                    drop(state);
                    if let Some(refresh) = refresh {
                        refresh.await;
                    }
                    return;
                }
                state.sign_in = next;
                step = next;
            }
        }
        .boxed())
    }
}

fn detail_mut(state: &mut ViewState) -> Result<&mut DetailView> {
    state
        .detail
        .as_mut()
        .ok_or_else(|| AppError::BadRequest("No getaway is selected".to_string()))
}

fn require_sign_in_step(state: &ViewState, step: SignInFlow) -> Result<()> {
    if state.signed_in {
        return Err(AppError::BadRequest("Already signed in".to_string()));
    }
    if state.sign_in != step {
        return Err(AppError::BadRequest(format!(
            "Sign-in dialog is not at the {:?} step",
            step
        )));
    }
    Ok(())
}
