// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking status and the reservation summary text.
//!
//! Booking is a display-only flow: there is no payment integration and the
//! 15-minute hold is narrative, not an enforced timer.

use crate::models::{Accommodation, GetawaySuggestion, TripStyle};
use crate::time_utils::{add_days, format_date};
use chrono::NaiveDate;
use serde::Serialize;

/// Fixed reservation reference shown on confirmations.
pub const RESERVATION_ID: &str = "#AI-2099-RELAX";

/// Minutes the reservation is said to be held for.
pub const HOLD_MINUTES: u32 = 15;

/// One-way booking lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Unbooked,
    /// Simulated confirmation in progress
    Reserving,
    Reserved,
}

/// Check-out date for a stay of `days` days starting at `check_in`.
pub fn check_out_date(check_in: NaiveDate, days: u32) -> NaiveDate {
    add_days(check_in, days)
}

/// "(N night)" / "(N nights)" label, shown for stays longer than a day.
pub fn nights_label(days: u32) -> Option<String> {
    if days <= 1 {
        return None;
    }
    let nights = days - 1;
    Some(format!(
        "({} {})",
        nights,
        if nights == 1 { "night" } else { "nights" }
    ))
}

/// Everything the reservation document is built from.
pub struct ReservationDetails<'a> {
    pub suggestion: &'a GetawaySuggestion,
    pub trip_style: TripStyle,
    pub accommodation: Option<&'a Accommodation>,
    pub check_in: Option<NaiveDate>,
    pub days: u32,
    pub plan: Option<&'a str>,
    pub packing_list: Option<&'a str>,
}

impl ReservationDetails<'_> {
    /// Plain-text body of the booking confirmation.
    pub fn render(&self) -> String {
        let check_in = self
            .check_in
            .map(format_date)
            .unwrap_or_else(|| "Not specified".to_string());
        let check_out = self
            .check_in
            .map(|date| format_date(check_out_date(date, self.days)))
            .unwrap_or_else(|| "Not specified".to_string());

        let mut out = String::new();
        out.push_str("BOOKING RESERVATION\n======================\n\n");
        out.push_str(&format!(
            "Your getaway has been reserved for the next {} minutes.\n",
            HOLD_MINUTES
        ));
        out.push_str(
            "To confirm your booking, please complete the payment using the link sent to your email.\n\n",
        );
        out.push_str(&format!("Reservation ID: {}\n\n", RESERVATION_ID));

        out.push_str("TRIP DETAILS\n----------------------\n");
        out.push_str(&format!("Destination: {}\n", self.suggestion.title));
        out.push_str(&format!("Location: {}\n\n", self.suggestion.location));

        if let (TripStyle::Touristy, Some(stay)) = (self.trip_style, self.accommodation) {
            out.push_str("ACCOMMODATION\n----------------------\n");
            out.push_str(&format!("Stay: {}\n", stay.name));
            out.push_str(&format!("Hosted by: {}\n", stay.hosted_by));
        }
        out.push_str(&format!("Check-in Date: {}\n", check_in));
        out.push_str(&format!("Check-out Date: {}\n\n", check_out));

        out.push_str("PAYMENT\n----------------------\n");
        out.push_str("A payment link has been sent to your registered email address.\n");
        out.push_str(&format!(
            "This reservation will be automatically cancelled if payment is not received within {} minutes.\n\n",
            HOLD_MINUTES
        ));

        out.push_str("PERSONALIZED ITINERARY\n----------------------\n");
        out.push_str(
            self.plan
                .unwrap_or("No itinerary was generated for this trip."),
        );
        out.push_str("\n\n\nAI-GENERATED PACKING LIST\n----------------------\n");
        out.push_str(
            self.packing_list
                .unwrap_or("No packing list was generated for this trip."),
        );
        out.push('\n');
        out
    }
}
