//! Application state definitions

use super::countdown::Countdown;
use super::counters::StatCounters;
use super::forms::RegistrationScreen;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with banner animation
    Splash,
    /// Event details, countdown, and statistics
    #[default]
    Overview,
    /// The multi-step registration form
    Register,
}

impl View {
    /// Views reachable from the sidebar, in display order
    pub const SIDEBAR: [View; 2] = [View::Overview, View::Register];

    pub fn label(&self) -> &'static str {
        match self {
            View::Splash => "Welcome",
            View::Overview => "Overview",
            View::Register => "Register",
        }
    }
}

/// Everything the UI renders from
pub struct AppState {
    pub current_view: View,
    pub event_name: String,
    pub countdown: Countdown,
    pub counters: StatCounters,
    pub registration: RegistrationScreen,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Errors waiting to be shown in the error dialog, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(
        event_name: String,
        countdown: Countdown,
        counters: StatCounters,
        registration: RegistrationScreen,
    ) -> Self {
        Self {
            current_view: View::default(),
            event_name,
            countdown,
            counters,
            registration,
            status_message: None,
            errors: VecDeque::new(),
        }
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
