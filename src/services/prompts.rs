// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Natural-language prompts sent to the completion service.
//!
//! Each builder is a pure function of its inputs so prompts can be asserted
//! on directly.

use super::gateway::{ACCOMMODATION_COUNT, PREDICTION_COUNT, SUGGESTION_COUNT};
use crate::models::{GetawaySuggestion, TripStyle, UserProfile};

/// Prompt for getaways tailored to `profile` in the given trip style.
pub fn personalized_suggestions(profile: &UserProfile, style: TripStyle) -> String {
    let (style_description, main_instruction, price_instruction) = match style {
        TripStyle::Relaxed => (
            "The client wants a relaxed getaway. Focus on relaxing, recharging and \
             disconnecting. Suggest secluded, nature-oriented or low-key experiences and \
             avoid crowded tourist traps."
                .to_string(),
            format!(
                "Based on this profile, especially their hobbies, demanding work schedule and \
                 desired trip style, suggest {} distinct and appealing weekend getaway plans near {}.",
                SUGGESTION_COUNT, profile.location
            ),
            "Provide an estimated price per night for accommodation.".to_string(),
        ),
        TripStyle::Touristy => (
            format!(
                "The client wants a touristy plan. First, identify the closest major \
                 metropolitan city to their location ({}). Then suggest {} popular attractions, \
                 landmarks or well-known activities within that major city. These should be \
                 energetic and engaging experiences perfect for a tourist.",
                profile.location, SUGGESTION_COUNT
            ),
            format!(
                "Based on this profile and desired trip style, identify the closest major city \
                 to {}. Then suggest {} distinct and appealing tourist attractions or activities \
                 within that major city. For the location, use the attraction's address.",
                profile.location, SUGGESTION_COUNT
            ),
            "Set \"pricePerNight\" to 0. Include any relevant entrance fees or activity costs \
             directly within the description text."
                .to_string(),
        ),
    };

    format!(
        "You are an expert travel agent specializing in burnout-prevention getaways for \
         professionals. Your client's profile is:\n\n\
         - Name: {name}\n\
         - Job: {job}\n\
         - Work Schedule: Works approximately {hours}.\n\
         - Hobbies & Preferences: {preferences}.\n\n\
         Client's Desired Trip Style: {style}\n\
         - {style_description}\n\n\
         {main_instruction}\n\n\
         For each suggestion, provide a unique ID, a catchy title, a specific location (e.g., \
         the name/address of the attraction), a compelling description (2-3 sentences), \
         {price_instruction} Also include a few relevant tags and the precise latitude and longitude.\n\n\
         Return the response as a JSON array that strictly adheres to the provided schema.",
        name = profile.name,
        job = profile.job_title,
        hours = profile.work_hours,
        preferences = profile.preferences.join(", "),
        style = style,
    )
}

/// Prompt for popular getaways near an arbitrary location.
pub fn general_suggestions(location: &str) -> String {
    format!(
        "You are a travel agent. Suggest {count} popular and diverse weekend getaway plans near \
         {location}. They can range from adventurous to relaxing to cultural. For each \
         suggestion, provide a unique ID, a catchy title, a specific location, a compelling \
         description (2-3 sentences), an estimated price per night, a few relevant tags, and \
         the precise latitude and longitude.\n\n\
         Return the response as a JSON array that strictly adheres to the provided schema.",
        count = SUGGESTION_COUNT,
        location = location,
    )
}

/// Prompt for search-box autocompletions.
pub fn search_predictions(query: &str) -> String {
    format!(
        "You are a creative travel assistant. A user is typing a search query for a travel \
         destination. Their current input is: \"{query}\"\n\n\
         Based on this input, suggest {count} creative and appealing travel search queries \
         they might be interested in. Keep them concise and exciting, focusing on famous \
         landmarks, natural wonders, unique experiences or interesting cities.\n\n\
         Examples:\n\
         - Input: \"moun\" -> [\"Mountain cabins in Aspen\", \"Mount Fuji hiking trails\", \
         \"Rocky Mountain National Park\", \"Blue Mountains Australia\"]\n\
         - Input: \"bea\" -> [\"Beach houses in Malibu\", \"Best beaches in Thailand\", \
         \"Bear Lake Utah\", \"Miami Beach nightlife\"]\n\n\
         Return the response as a JSON array of {count} unique strings.",
        query = query,
        count = PREDICTION_COUNT,
    )
}

/// Prompt for a day-by-day relaxation itinerary.
pub fn relaxation_plan(suggestion: &GetawaySuggestion, days: u32) -> String {
    format!(
        "You are a wellness and travel expert. Create a personalized relaxation and \
         rejuvenation plan for a stressed professional.\n\
         The getaway is for {days} day(s) at \"{title}\" in {location}.\n\
         The goal is to disconnect, relax and prevent burnout. The vibe should match the \
         getaway's description: \"{description}\" and its tags: {tags}.\n\n\
         Create a day-by-day itinerary. For each day, suggest 2-3 simple, relaxing activities. \
         Focus on mindfulness, nature, good food and low-stress experiences. Avoid overly \
         packed schedules.\n\n\
         Format the output as simple, readable text. Use a heading for each day (e.g., \
         \"Day 1: Arrival and Unwinding\") and bullet points for activities.",
        days = days,
        title = suggestion.title,
        location = suggestion.location,
        description = suggestion.description,
        tags = suggestion.tags.join(", "),
    )
}

/// Prompt for a categorized packing list.
pub fn packing_list(suggestion: &GetawaySuggestion, days: u32) -> String {
    format!(
        "You are a pragmatic travel assistant. Create a practical packing list for a stressed \
         professional going on a {days}-day trip.\n\
         The destination is \"{title}\" in {location}.\n\
         The trip's themes are: {tags}.\n\
         The goal is relaxation and disconnecting.\n\n\
         Keep the list comprehensive but minimal and focused. Categorize it into logical \
         sections like \"Clothing\", \"Toiletries\", \"Electronics (for minimal use)\" and \
         \"Wellness & Relaxation\".\n\n\
         Format the output as simple, readable text with a clear heading for each category \
         and bullet points for items.",
        days = days,
        title = suggestion.title,
        location = suggestion.location,
        tags = suggestion.tags.join(", "),
    )
}

/// Prompt asking for the optimal trip length in days.
pub fn trip_duration(profile: &UserProfile, suggestion: &GetawaySuggestion) -> String {
    format!(
        "You are a wellness and burnout prevention expert advising a client, {name}.\n\
         Client Profile:\n\
         - Job: {job}\n\
         - Work Schedule: {hours}, indicating a demanding schedule.\n\
         - Preferences: {preferences}.\n\n\
         Proposed Getaway:\n\
         - Destination: \"{title}\" in {location}.\n\
         - Vibe: \"{description}\" (Tags: {tags}).\n\n\
         Based on the client's work schedule and the nature of this getaway, what is the \
         optimal number of days for this trip to facilitate genuine recovery and prevent \
         burnout? A trip that is too short might not be effective, and one that is too long \
         might be difficult to schedule.\n\n\
         Return the response as a JSON object with a single integer property \"days\".",
        name = profile.name,
        job = profile.job_title,
        hours = profile.work_hours,
        preferences = profile.preferences.join(", "),
        title = suggestion.title,
        location = suggestion.location,
        description = suggestion.description,
        tags = suggestion.tags.join(", "),
    )
}

/// Prompt for host-run stays near an attraction.
///
/// The non-commercial constraint is expressed here only; nothing checks it
/// on the way back.
pub fn unique_accommodations(suggestion: &GetawaySuggestion) -> String {
    format!(
        "You are a creative travel assistant specializing in unique stays. A user is looking \
         for a place to stay near a tourist attraction.\n\
         Attraction: \"{title}\" located at \"{location}\".\n\n\
         Suggest {count} fictional but realistic-sounding unique accommodation options from \
         local homeowners. These must NOT be hotels, motels or commercial properties. Think \
         private homes, ranches, glamping sites, cozy cabins, artist lofts, garden cottages.\n\n\
         For each option, provide:\n\
         - A unique, appealing name (e.g., \"The Sunstone Loft\").\n\
         - A \"hostedBy\" field with a fictional but friendly host's name (e.g., \"Maria & John\").\n\
         - A star rating between 4.0 and 5.0 with one decimal place.\n\
         - An estimated price per night as an integer.\n\
         - A short, compelling description (1-2 sentences) highlighting its unique character.\n\n\
         Return the response as a JSON array that strictly adheres to the provided schema.",
        title = suggestion.title,
        location = suggestion.location,
        count = ACCOMMODATION_COUNT,
    )
}
