// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model and the create-profile form.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Display name of the unauthenticated sentinel profile.
pub const GUEST_NAME: &str = "Explorer";

const NOT_AVAILABLE: &str = "N/A";

/// Traveller profile used to personalize prompts.
///
/// Immutable once created; login and logout replace it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub job_title: String,
    pub company: String,
    /// Home location, used as the default search area
    pub location: String,
    /// Work-hours descriptor, e.g. ">80 hours/week"
    pub work_hours: String,
    pub commute: String,
    pub eating_habits: String,
    pub calendar_summary: String,
    pub search_history: Vec<String>,
    /// Preference tags such as "Hiking" or "Yoga"
    pub preferences: Vec<String>,
    pub avatar_url: String,
}

impl UserProfile {
    /// The guest sentinel: no preferences, no history.
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            job_title: NOT_AVAILABLE.to_string(),
            company: NOT_AVAILABLE.to_string(),
            location: "San Francisco, CA".to_string(),
            work_hours: NOT_AVAILABLE.to_string(),
            commute: NOT_AVAILABLE.to_string(),
            eating_habits: NOT_AVAILABLE.to_string(),
            calendar_summary: NOT_AVAILABLE.to_string(),
            search_history: Vec::new(),
            preferences: Vec::new(),
            avatar_url: avatar_url("explorer"),
        }
    }

    /// Profile handed out by the simulated Google sign-in.
    pub fn demo() -> Self {
        Self {
            name: "Francesca Rossi".to_string(),
            job_title: "Senior Software Engineer".to_string(),
            company: "CalCodes".to_string(),
            location: "San Francisco, CA".to_string(),
            work_hours: ">80 hours/week".to_string(),
            commute: "1.5 hours daily, heavy traffic".to_string(),
            eating_habits:
                "Quick meals at office cafeteria, frequent coffee shop visits for focus."
                    .to_string(),
            calendar_summary: "Back-to-back meetings, project deadlines every two weeks. \
                               Next free weekend is in 10 days."
                .to_string(),
            search_history: vec![
                "quiet cabin rentals near Lake Tahoe".to_string(),
                "best weekend hiking Big Sur".to_string(),
                "mindfulness and yoga retreats California".to_string(),
                "gourmet cooking classes SF".to_string(),
                "how to prevent burnout software engineer".to_string(),
            ],
            preferences: vec![
                "Hiking".to_string(),
                "Nature".to_string(),
                "Quiet places".to_string(),
                "Good food".to_string(),
                "Yoga".to_string(),
                "Digital detox".to_string(),
            ],
            avatar_url: avatar_url("francesca"),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.name == GUEST_NAME && self.preferences.is_empty() && self.search_history.is_empty()
    }

    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

fn avatar_url(seed: &str) -> String {
    format!(
        "https://picsum.photos/seed/{}/200/200",
        urlencoding::encode(seed)
    )
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn default_work_hours() -> String {
    "40-50".to_string()
}

/// Create-profile form submitted from the sign-in dialog.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub job_title: String,
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub location: String,
    /// Weekly hours bucket, e.g. "40-50" or "80+"
    #[serde(default = "default_work_hours")]
    #[validate(length(min = 1, max = 20))]
    pub work_hours: String,
    /// Comma-separated preference tags
    #[serde(default)]
    #[validate(length(max = 500))]
    pub preferences: String,
}

impl ProfileForm {
    /// Validate the form and build the profile it describes.
    pub fn into_profile(self) -> Result<UserProfile, validator::ValidationErrors> {
        self.validate()?;

        let name = capitalize_words(self.name.trim());
        let preferences = self
            .preferences
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(UserProfile {
            avatar_url: avatar_url(self.name.trim()),
            name,
            job_title: self.job_title.trim().to_string(),
            company: NOT_AVAILABLE.to_string(),
            location: self.location.trim().to_string(),
            work_hours: format!("{} hours/week", self.work_hours.trim()),
            commute: NOT_AVAILABLE.to_string(),
            eating_habits: NOT_AVAILABLE.to_string(),
            calendar_summary: "Busy schedule.".to_string(),
            search_history: Vec::new(),
            preferences,
        })
    }
}

fn capitalize_words(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, preferences: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            job_title: "Nurse".to_string(),
            location: "Portland, OR".to_string(),
            work_hours: "60-70".to_string(),
            preferences: preferences.to_string(),
        }
    }

    #[test]
    fn test_guest_is_guest() {
        let guest = UserProfile::guest();
        assert!(guest.is_guest());
        assert!(guest.preferences.is_empty());
        assert!(guest.search_history.is_empty());
        assert_eq!(
            guest.avatar_url,
            "https://picsum.photos/seed/explorer/200/200"
        );
        assert!(!UserProfile::demo().is_guest());
    }

    #[test]
    fn test_form_builds_profile() {
        let profile = form("ada LOVELACE", " Hiking, , Tea ,").into_profile().unwrap();
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.first_name(), "Ada");
        assert_eq!(profile.work_hours, "60-70 hours/week");
        assert_eq!(profile.preferences, vec!["Hiking", "Tea"]);
        assert_eq!(profile.company, "N/A");
        assert_eq!(profile.calendar_summary, "Busy schedule.");
        assert_eq!(
            profile.avatar_url,
            "https://picsum.photos/seed/ada%20LOVELACE/200/200"
        );
    }

    #[test]
    fn test_form_rejects_blank_required_fields() {
        assert!(form("   ", "").into_profile().is_err());

        let mut missing_location = form("Ada", "");
        missing_location.location = String::new();
        assert!(missing_location.into_profile().is_err());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(UserProfile::demo()).unwrap();
        assert_eq!(json["jobTitle"], "Senior Software Engineer");
        assert!(json["searchHistory"].is_array());
    }
}
