//! Application state and core logic

use crate::backend::{SimulatedBackend, SubmissionBackend};
use crate::config::PortalConfig;
use crate::state::forms::registration::{registration_layout, registration_rules};
use crate::state::{AppState, Countdown, FormButton, FormController, RegistrationScreen, SplashState, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Drives the registration form
    pub controller: FormController,
    /// Whether the app should quit
    quit: bool,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
}

impl App {
    /// Create a new App using the simulated submission backend
    pub fn new(config: &PortalConfig) -> Self {
        let backend = Arc::new(SimulatedBackend::new(config.submit_latency()));
        Self::with_backend(config, backend)
    }

    /// Create a new App submitting through `backend`
    pub fn with_backend(config: &PortalConfig, backend: Arc<dyn SubmissionBackend>) -> Self {
        let layout = registration_layout();
        let registration = RegistrationScreen::new(&layout);
        let controller = FormController::new(layout, registration_rules(), backend)
            .with_reset_delay(config.reset_delay());

        let mut state = AppState::new(
            config.event_name().to_string(),
            Countdown::new(config.event_start()),
            config.stat_counters(),
            registration,
        );
        controller.sync_view(&mut state.registration);

        // Start with splash screen
        state.current_view = View::Splash;

        Self {
            state,
            controller,
            quit: false,
            splash_state: Some(SplashState::new()),
        }
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.navigate(View::Overview);
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Whether something on screen is moving and needs fast redraws
    pub fn is_animating(&self) -> bool {
        self.in_splash()
            || self.controller.state().is_submitting()
            || self.state.counters.is_animating(Instant::now())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Stop the app, abandoning any in-flight submission
    pub fn request_quit(&mut self) {
        self.controller.cancel_submission(&mut self.state.registration);
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Switch views. Showing the overview starts its counters.
    pub fn navigate(&mut self, view: View) {
        if view == View::Overview {
            self.state.counters.reveal(Instant::now());
        }
        self.state.current_view = view;
    }

    /// Advance timers and collect background results; called once per loop
    pub async fn tick(&mut self) {
        let now = Instant::now();
        let registration = &mut self.state.registration;

        if let Some(outcome) = self.controller.poll_submission(registration, now).await {
            self.state.status_message = Some(match outcome {
                Ok(receipt) => format!("Registration confirmed: #{}", receipt.short_id()),
                Err(err) => err.to_string(),
            });
        }

        if self.controller.tick(&mut self.state.registration, now) {
            tracing::debug!("Registration form reset");
            self.state.status_message = None;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // The success dialog captures every key until closed
        if self.state.registration.success_visible {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.registration.success_visible = false;
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Splash => self.handle_splash_key(key),
            View::Overview => self.handle_overview_key(key),
            View::Register => self.handle_register_key(key),
        }
        Ok(())
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
        self.splash_state = None;
        self.navigate(View::Overview);
    }

    fn handle_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char('r') | KeyCode::Down => {
                self.navigate(View::Register)
            }
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        let on_buttons = self.state.registration.is_buttons_row_active();

        match key.code {
            KeyCode::Tab => {
                self.blur_active_field();
                self.state.registration.next_field();
            }
            KeyCode::BackTab => {
                self.blur_active_field();
                self.state.registration.prev_field();
            }
            KeyCode::Left | KeyCode::Right if on_buttons => self.state.registration.toggle_button(),
            KeyCode::Left => self.state.registration.cycle_option(false),
            KeyCode::Right => self.state.registration.cycle_option(true),
            KeyCode::Enter if on_buttons => match self.state.registration.selected_button {
                FormButton::Back => self.prev_step(),
                FormButton::Forward if self.controller.is_review_step() => self.submit(),
                FormButton::Forward => self.next_step(),
            },
            // Enter on a field moves on like Tab
            KeyCode::Enter => {
                self.blur_active_field();
                self.state.registration.next_field();
            }
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.controller.is_review_step() {
                    self.submit();
                } else {
                    self.next_step();
                }
            }
            KeyCode::Char('n') if key.modifiers.contains(crate::platform::ACTION_MODIFIER) => {
                self.next_step()
            }
            KeyCode::Char('b') if key.modifiers.contains(crate::platform::ACTION_MODIFIER) => {
                self.prev_step()
            }
            KeyCode::Esc => self.navigate(View::Overview),
            // Form field input (only when not on the buttons row)
            KeyCode::Char(c) if !on_buttons && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.registration.input_char(c)
            }
            KeyCode::Backspace if !on_buttons => self.state.registration.backspace(),
            _ => {}
        }
    }

    /// Validate the focused field as focus leaves it
    fn blur_active_field(&mut self) {
        let name = self
            .state
            .registration
            .active_field()
            .map(|f| f.name.clone());
        if let Some(name) = name {
            let _ = self
                .controller
                .validate_field(&mut self.state.registration, &name);
        }
    }

    fn next_step(&mut self) {
        let result = self.controller.next_step(&mut self.state.registration);
        self.state.status_message = result.err().map(|e| e.to_string());
    }

    fn prev_step(&mut self) {
        let result = self.controller.prev_step(&mut self.state.registration);
        self.state.status_message = result.err().map(|e| e.to_string());
    }

    fn submit(&mut self) {
        self.state.status_message = match self.controller.submit(&mut self.state.registration) {
            Ok(()) => Some("Processing...".to_string()),
            Err(err) => Some(err.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockSubmissionBackend, SubmissionError, SubmissionReceipt};
    use crate::state::forms::registration::{EMAIL, FULL_NAME, TERMS};
    use crate::state::FormView;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(backend: MockSubmissionBackend) -> App {
        let mut app = App::with_backend(&PortalConfig::default(), Arc::new(backend));
        app.splash_state = None;
        app.state.current_view = View::Register;
        app
    }

    fn app() -> App {
        let mut backend = MockSubmissionBackend::new();
        backend
            .expect_submit()
            .returning(|_| Ok(SubmissionReceipt::new()));
        app_with(backend)
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill both data steps through the keyboard and land on review
    async fn fill_to_review(app: &mut App) {
        type_str(app, "Ada Lovelace").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "ada@example.com").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_str(app, "+44 20 7946 0958").await;
        app.handle_key(ctrl('s')).await.unwrap();
        assert_eq!(app.controller.current_step(), 2);

        type_str(app, "CS-042").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(ctrl('s')).await.unwrap();
        assert_eq!(app.controller.current_step(), 3);
    }

    mod app_basic_tests {
        use super::*;

        #[test]
        fn test_starts_in_splash() {
            let app = App::new(&PortalConfig::default());
            assert!(app.in_splash());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_any_key_skips_splash_and_starts_counters() {
            let mut app = App::new(&PortalConfig::default());
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.current_view, View::Overview);
            assert!(app.splash_state.is_none());
            assert!(app.state.counters.counters.iter().all(|c| c.is_started()));
        }

        #[tokio::test]
        async fn test_q_on_overview_quits() {
            let mut app = app();
            app.navigate(View::Overview);
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_error_dialog_is_modal() {
            let mut app = app();
            app.push_error("Failed to load config");
            app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
            assert!(app.state.registration.read_value(FULL_NAME).unwrap().is_empty());
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod register_keys {
        use super::*;

        #[tokio::test]
        async fn test_typing_fills_active_field() {
            let mut app = app();
            type_str(&mut app, "Ada").await;
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(
                app.state.registration.field(FULL_NAME).unwrap().value.as_text(),
                "Ad"
            );
        }

        #[tokio::test]
        async fn test_tab_validates_field_being_left() {
            let mut app = app();
            type_str(&mut app, "ab").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert!(app.state.registration.field(FULL_NAME).unwrap().feedback.is_error());
            assert!(!app.state.registration.field(EMAIL).unwrap().feedback.is_error());
        }

        #[tokio::test]
        async fn test_next_with_invalid_step_stays_put() {
            let mut app = app();
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.controller.current_step(), 1);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Please fix 3 field(s) on step 1")
            );
        }

        #[tokio::test]
        async fn test_buttons_row_back() {
            let mut app = app();
            fill_to_review(&mut app).await;
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert!(app.state.registration.is_buttons_row_active());
            app.handle_key(key(KeyCode::Left)).await.unwrap();
            assert_eq!(app.state.registration.selected_button, FormButton::Back);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.controller.current_step(), 2);
        }

        #[tokio::test]
        async fn test_esc_returns_to_overview_keeping_values() {
            let mut app = app();
            type_str(&mut app, "Ada").await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_view, View::Overview);
            assert_eq!(
                app.state.registration.field(FULL_NAME).unwrap().value.as_text(),
                "Ada"
            );
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_submit_without_terms_is_blocked() {
            let mut backend = MockSubmissionBackend::new();
            backend.expect_submit().never();
            let mut app = app_with(backend);
            fill_to_review(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.controller.state().is_editing());
            assert!(app.state.registration.field(TERMS).unwrap().feedback.is_error());
        }

        #[tokio::test]
        async fn test_full_submission_shows_success_dialog() {
            let mut app = app();
            fill_to_review(&mut app).await;
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.state.registration.submit_busy);
            assert!(app.is_animating());

            app.controller
                .finish_submission(&mut app.state.registration, Instant::now())
                .await;
            assert!(app.state.registration.success_visible);

            // Dialog swallows keys until closed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(app.state.registration.success_visible);
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.registration.success_visible);
            assert!(app.controller.state().is_success());
        }

        #[tokio::test]
        async fn test_failed_submission_reports_in_status() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .returning(|_| Err(SubmissionError::Rejected("duplicate email".into())));
            let mut app = app_with(backend);
            fill_to_review(&mut app).await;
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();

            // Let the spawned task run to completion
            while app.controller.state().is_submitting() {
                tokio::task::yield_now().await;
                app.tick().await;
            }

            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Registration rejected: duplicate email")
            );
            assert_eq!(app.controller.current_step(), 3);
        }

        #[tokio::test]
        async fn test_quit_cancels_submission() {
            let mut app = App::with_backend(
                &PortalConfig::default(),
                Arc::new(SimulatedBackend::new(std::time::Duration::from_secs(60))),
            );
            app.splash_state = None;
            app.state.current_view = View::Register;
            fill_to_review(&mut app).await;
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.controller.state().is_submitting());

            app.request_quit();

            assert!(app.should_quit());
            assert!(app.controller.state().is_editing());
        }
    }
}
