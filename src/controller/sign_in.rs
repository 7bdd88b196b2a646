// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Simulated sign-in dialog.
//!
//! This is a UI-only state machine. The "Google" path makes no network
//! calls, checks no credentials and grants nothing; it walks through two
//! timed screens and then signs in with the demo profile. Nothing here is
//! an authentication guarantee.

use serde::Serialize;
use std::time::Duration;

/// Time spent on the simulated account screen.
pub const GOOGLE_SIGN_IN_DELAY: Duration = Duration::from_millis(1500);
/// Time spent on the simulated consent screen.
pub const GOOGLE_PERMISSION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInFlow {
    #[default]
    Closed,
    /// Choose between Google and creating a profile
    Chooser,
    CreateProfile,
    GoogleSignIn,
    GooglePermission,
}

impl SignInFlow {
    /// Delay and follow-up state of a timed screen.
    ///
    /// Leaving `GooglePermission` closes the dialog and signs in.
    pub fn after_delay(self) -> Option<(Duration, SignInFlow)> {
        match self {
            SignInFlow::GoogleSignIn => {
                Some((GOOGLE_SIGN_IN_DELAY, SignInFlow::GooglePermission))
            }
            SignInFlow::GooglePermission => Some((GOOGLE_PERMISSION_DELAY, SignInFlow::Closed)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_path_sequence() {
        let (first, next) = SignInFlow::GoogleSignIn.after_delay().unwrap();
        assert_eq!(first, GOOGLE_SIGN_IN_DELAY);
        assert_eq!(next, SignInFlow::GooglePermission);

        let (second, done) = next.after_delay().unwrap();
        assert_eq!(second, GOOGLE_PERMISSION_DELAY);
        assert_eq!(done, SignInFlow::Closed);
    }

    #[test]
    fn test_untimed_states() {
        assert_eq!(SignInFlow::Chooser.after_delay(), None);
        assert_eq!(SignInFlow::CreateProfile.after_delay(), None);
        assert_eq!(SignInFlow::Closed.after_delay(), None);
    }
}
