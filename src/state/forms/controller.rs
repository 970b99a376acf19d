//! Multi-step form flow: validation gating, step navigation, submission
//!
//! The controller owns the [`FormState`] and talks to widgets only through a
//! [`FormView`]. Submission runs on a spawned task so the event loop keeps
//! drawing while the backend works; the loop collects the outcome with
//! [`FormController::poll_submission`] and drives the post-success reset
//! with [`FormController::tick`].

use super::field::{FieldFeedback, FieldValue};
use super::form_state::{FlowPhase, FormState};
use super::layout::StepLayout;
use super::rules::{FieldValidationError, RuleSet};
use super::view::{FormView, StepMarker};
use crate::backend::{Registration, SubmissionBackend, SubmissionError, SubmissionReceipt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;

/// Default time the success dialog stays up before the form resets
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Text shown on the review step for values that were never entered
pub const MISSING_REVIEW_TEXT: &str = "-";

type SubmissionTask = JoinHandle<Result<SubmissionReceipt, SubmissionError>>;

/// Why a step change was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Cannot move from step {from} to step {to}")]
    NotAdjacent { from: usize, to: usize },
    #[error("Registration is being submitted")]
    Busy,
    #[error("Please fix {} field(s) on step {}", .failed.len(), .step)]
    InvalidStep { step: usize, failed: Vec<String> },
}

/// Why a submission was not started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Registration can only be submitted from the review step")]
    NotOnReviewStep,
    #[error("Registration is already being submitted")]
    AlreadySubmitting,
    #[error(transparent)]
    Unconfirmed(FieldValidationError),
}

pub struct FormController {
    state: FormState,
    layout: StepLayout,
    rules: RuleSet,
    backend: Arc<dyn SubmissionBackend>,
    reset_delay: Duration,
    pending: Option<SubmissionTask>,
    last_receipt: Option<SubmissionReceipt>,
}

impl FormController {
    pub fn new(layout: StepLayout, rules: RuleSet, backend: Arc<dyn SubmissionBackend>) -> Self {
        Self {
            state: FormState::default(),
            layout,
            rules,
            backend,
            reset_delay: DEFAULT_RESET_DELAY,
            pending: None,
            last_receipt: None,
        }
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn layout(&self) -> &StepLayout {
        &self.layout
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn is_review_step(&self) -> bool {
        self.state.current_step == self.layout.review_step()
    }

    /// Receipt of the most recent successful submission
    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    /// Push the current step and markers to a freshly built view
    pub fn sync_view(&self, view: &mut dyn FormView) {
        self.show_current_step(view);
    }

    /// Validate one field and reflect the outcome on it.
    ///
    /// Fields without a rule are left untouched. An empty optional field has
    /// its feedback cleared rather than marked valid.
    pub fn validate_field(
        &self,
        view: &mut dyn FormView,
        name: &str,
    ) -> Result<(), FieldValidationError> {
        if self.rules.get(name).is_none() {
            return Ok(());
        }
        let value = view.read_value(name).unwrap_or_default();
        let result = self.rules.check(name, &value);
        let feedback = match &result {
            Err(err) => {
                tracing::debug!(field = name, error = %err, "Field failed validation");
                FieldFeedback::Error(err.message().to_string())
            }
            Ok(()) if value.is_empty() => FieldFeedback::None,
            Ok(()) => FieldFeedback::Valid,
        };
        view.set_feedback(name, feedback);
        result
    }

    /// Validate every required field of a step. All fields are checked so
    /// each one shows its own feedback.
    pub fn validate_step(&self, view: &mut dyn FormView, step: usize) -> bool {
        self.failed_fields(view, step).is_empty()
    }

    fn failed_fields(&self, view: &mut dyn FormView, step: usize) -> Vec<String> {
        let required: Vec<String> = self
            .layout
            .field_names(step)
            .filter(|name| self.rules.is_required(name))
            .map(str::to_string)
            .collect();

        let mut failed = Vec::new();
        for name in required {
            if self.validate_field(view, &name).is_err() {
                failed.push(name);
            }
        }
        failed
    }

    /// Move forward one step if the current step validates.
    ///
    /// The current step's values are saved before moving. `current_step`
    /// is unchanged on any error.
    pub fn advance_step(
        &mut self,
        view: &mut dyn FormView,
        target: usize,
    ) -> Result<(), NavigationError> {
        if !self.state.is_editing() {
            return Err(NavigationError::Busy);
        }
        let current = self.state.current_step;
        if target != current + 1 || !self.layout.contains(target) {
            return Err(NavigationError::NotAdjacent {
                from: current,
                to: target,
            });
        }

        let failed = self.failed_fields(view, current);
        if !failed.is_empty() {
            tracing::debug!(step = current, ?failed, "Step failed validation");
            return Err(NavigationError::InvalidStep {
                step: current,
                failed,
            });
        }

        self.save_step_data(view, current);
        self.go_to_step(view, target);
        Ok(())
    }

    /// Move back one step without validating.
    ///
    /// In-progress values of the step being left are kept so they survive a
    /// later forward move.
    pub fn retreat_step(
        &mut self,
        view: &mut dyn FormView,
        target: usize,
    ) -> Result<(), NavigationError> {
        if !self.state.is_editing() {
            return Err(NavigationError::Busy);
        }
        let current = self.state.current_step;
        if target + 1 != current || !self.layout.contains(target) {
            return Err(NavigationError::NotAdjacent {
                from: current,
                to: target,
            });
        }

        self.save_step_data(view, current);
        self.go_to_step(view, target);
        Ok(())
    }

    pub fn next_step(&mut self, view: &mut dyn FormView) -> Result<(), NavigationError> {
        self.advance_step(view, self.state.current_step + 1)
    }

    pub fn prev_step(&mut self, view: &mut dyn FormView) -> Result<(), NavigationError> {
        let target = self.state.current_step.saturating_sub(1);
        self.retreat_step(view, target)
    }

    fn save_step_data(&mut self, view: &dyn FormView, step: usize) {
        for name in self.layout.field_names(step) {
            if let Some(value) = view.read_value(name) {
                self.state.fields.insert(name.to_string(), value);
            }
        }
    }

    fn go_to_step(&mut self, view: &mut dyn FormView, step: usize) {
        tracing::debug!(from = self.state.current_step, to = step, "Changing step");
        self.state.current_step = step;
        view.set_notice(None);
        self.show_current_step(view);
        if step == self.layout.review_step() {
            self.populate_review(view);
        }
    }

    fn show_current_step(&self, view: &mut dyn FormView) {
        let current = self.state.current_step;
        view.show_step(current);
        for step in 1..=self.layout.step_count() {
            view.set_step_marker(step, StepMarker::for_step(step, current));
        }
    }

    /// Fill the review step from saved values, showing option labels for
    /// select fields
    fn populate_review(&self, view: &mut dyn FormView) {
        for spec in self.layout.reviewed_fields() {
            let text = match self.state.fields.get(&spec.name) {
                Some(FieldValue::Text(value)) if !value.trim().is_empty() => spec
                    .option_label(value)
                    .unwrap_or(value.as_str())
                    .to_string(),
                Some(FieldValue::Flag(true)) => "Yes".to_string(),
                Some(FieldValue::Flag(false)) => "No".to_string(),
                _ => MISSING_REVIEW_TEXT.to_string(),
            };
            view.set_review_text(&spec.name, &text);
        }
    }

    /// Start submitting the registration.
    ///
    /// Gated on the review step's fields (the terms checkbox). On success the
    /// backend call runs in the background and the submit control is
    /// disabled until it completes.
    pub fn submit(&mut self, view: &mut dyn FormView) -> Result<(), SubmitError> {
        if !self.state.is_editing() {
            return Err(SubmitError::AlreadySubmitting);
        }
        let review = self.layout.review_step();
        if self.state.current_step != review {
            return Err(SubmitError::NotOnReviewStep);
        }

        let names: Vec<String> = self.layout.field_names(review).map(str::to_string).collect();
        let mut first_error = None;
        for name in &names {
            if let Err(err) = self.validate_field(view, name) {
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(SubmitError::Unconfirmed(err));
        }

        self.save_step_data(view, review);
        self.state.phase = FlowPhase::Submitting;
        view.set_notice(None);
        view.set_submit_busy(true);

        let registration = Registration::new(self.state.fields.clone());
        let backend = Arc::clone(&self.backend);
        tracing::info!(fields = registration.fields.len(), "Submitting registration");
        self.pending = Some(tokio::spawn(async move {
            backend.submit(&registration).await
        }));
        Ok(())
    }

    /// Collect the submission outcome if the background task has finished
    pub async fn poll_submission(
        &mut self,
        view: &mut dyn FormView,
        now: Instant,
    ) -> Option<Result<SubmissionReceipt, SubmissionError>> {
        if self.pending.as_ref().is_some_and(|task| task.is_finished()) {
            self.finish_submission(view, now).await
        } else {
            None
        }
    }

    /// Wait for the in-flight submission and apply its outcome
    pub async fn finish_submission(
        &mut self,
        view: &mut dyn FormView,
        now: Instant,
    ) -> Option<Result<SubmissionReceipt, SubmissionError>> {
        let task = self.pending.take()?;
        let outcome = match task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(SubmissionError::Cancelled),
            Err(err) => Err(SubmissionError::Network(err.to_string())),
        };

        view.set_submit_busy(false);
        match &outcome {
            Ok(receipt) => {
                tracing::info!(confirmation = %receipt.confirmation_id, "Registration accepted");
                self.state.phase = FlowPhase::Success {
                    reset_at: now + self.reset_delay,
                };
                self.last_receipt = Some(receipt.clone());
                view.set_success_visible(true);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Registration submission failed");
                self.state.phase = FlowPhase::Editing;
                view.set_notice(Some(format!("{err}. Please try again.")));
            }
        }
        Some(outcome)
    }

    /// Abort an in-flight submission and return to the review step
    pub fn cancel_submission(&mut self, view: &mut dyn FormView) {
        if let Some(task) = self.pending.take() {
            task.abort();
            tracing::info!("Submission cancelled");
            self.state.phase = FlowPhase::Editing;
            view.set_submit_busy(false);
        }
    }

    /// Drive time-based transitions. Returns true when the form was reset.
    pub fn tick(&mut self, view: &mut dyn FormView, now: Instant) -> bool {
        match self.state.phase {
            FlowPhase::Success { reset_at } if now >= reset_at => {
                self.reset(view);
                true
            }
            _ => false,
        }
    }

    /// Discard all entered data and return to the first step
    pub fn reset(&mut self, view: &mut dyn FormView) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        view.reset_inputs();
        view.set_submit_busy(false);
        view.set_success_visible(false);
        view.set_notice(None);
        self.state = FormState::default();
        self.show_current_step(view);
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockSubmissionBackend;
    use crate::state::forms::registration::{
        registration_layout, registration_rules, DEPARTMENT, EMAIL, FULL_NAME, PHONE,
        ROLL_NUMBER, TERMS, YEAR,
    };
    use crate::state::forms::screen::RegistrationScreen;
    use crate::state::forms::view::MockFormView;
    use mockall::predicate::eq;

    fn ok_backend() -> Arc<dyn SubmissionBackend> {
        let mut backend = MockSubmissionBackend::new();
        backend
            .expect_submit()
            .returning(|_| Ok(SubmissionReceipt::new()));
        Arc::new(backend)
    }

    fn controller_with(backend: Arc<dyn SubmissionBackend>) -> FormController {
        FormController::new(registration_layout(), registration_rules(), backend)
    }

    fn controller() -> FormController {
        controller_with(ok_backend())
    }

    fn screen() -> RegistrationScreen {
        RegistrationScreen::new(&registration_layout())
    }

    fn fill_step_one(screen: &mut RegistrationScreen) {
        screen.set_text(FULL_NAME, "Ada Lovelace");
        screen.set_text(EMAIL, "ada@example.com");
        screen.set_text(PHONE, "+44 20 7946 0958");
    }

    fn fill_step_two(screen: &mut RegistrationScreen) {
        screen.set_text(ROLL_NUMBER, "CS-042");
        screen.select_value(DEPARTMENT, "cse");
        screen.select_value(YEAR, "3");
    }

    /// Walk a fresh controller to the review step
    fn at_review(controller: &mut FormController, screen: &mut RegistrationScreen) {
        fill_step_one(screen);
        controller.advance_step(screen, 2).unwrap();
        fill_step_two(screen);
        controller.advance_step(screen, 3).unwrap();
    }

    mod validate_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_short_name_fails_and_marks_error() {
            let controller = controller();
            let mut screen = screen();
            screen.set_text(FULL_NAME, "ab");
            let err = controller.validate_field(&mut screen, FULL_NAME).unwrap_err();
            assert!(err.message().contains("minimum 3 characters"));
            assert!(screen.field(FULL_NAME).unwrap().feedback.is_error());
        }

        #[test]
        fn test_valid_email_marks_success() {
            let controller = controller();
            let mut screen = screen();
            screen.set_text(EMAIL, "a@b.com");
            assert!(controller.validate_field(&mut screen, EMAIL).is_ok());
            assert_eq!(screen.field(EMAIL).unwrap().feedback, FieldFeedback::Valid);
        }

        #[test]
        fn test_field_without_rule_is_untouched() {
            let controller = controller();
            let mut view = MockFormView::new();
            view.expect_read_value().never();
            view.expect_set_feedback().never();
            assert!(controller.validate_field(&mut view, "nickname").is_ok());
        }

        #[test]
        fn test_reads_value_through_view() {
            let controller = controller();
            let mut view = MockFormView::new();
            view.expect_read_value()
                .withf(|name| name == PHONE)
                .returning(|_| Some(FieldValue::Text("12345".into())));
            view.expect_set_feedback()
                .withf(|name, feedback| name == PHONE && feedback.is_error())
                .times(1)
                .return_const(());
            assert!(controller.validate_field(&mut view, PHONE).is_err());
        }
    }

    mod validate_step {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reports_every_invalid_field() {
            let controller = controller();
            let mut screen = screen();
            screen.set_text(EMAIL, "ok@example.com");
            assert!(!controller.validate_step(&mut screen, 1));
            assert!(screen.field(FULL_NAME).unwrap().feedback.is_error());
            assert_eq!(screen.field(EMAIL).unwrap().feedback, FieldFeedback::Valid);
            assert!(screen.field(PHONE).unwrap().feedback.is_error());
        }

        #[test]
        fn test_true_when_all_valid() {
            let controller = controller();
            let mut screen = screen();
            fill_step_one(&mut screen);
            assert!(controller.validate_step(&mut screen, 1));
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_step_one_advances_and_saves() {
            let mut controller = controller();
            let mut screen = screen();
            fill_step_one(&mut screen);

            controller.advance_step(&mut screen, 2).unwrap();

            assert_eq!(controller.current_step(), 2);
            assert_eq!(screen.visible_step, 2);
            let state = controller.state();
            assert_eq!(state.text(FULL_NAME), Some("Ada Lovelace"));
            assert_eq!(state.text(EMAIL), Some("ada@example.com"));
            assert_eq!(state.text(PHONE), Some("+44 20 7946 0958"));
            assert_eq!(state.fields.len(), 3);
        }

        #[test]
        fn test_invalid_field_blocks_and_flags_only_that_field() {
            let mut controller = controller();
            let mut screen = screen();
            fill_step_one(&mut screen);
            screen.set_text(EMAIL, "not-an-email");

            let err = controller.advance_step(&mut screen, 2).unwrap_err();

            assert_eq!(
                err,
                NavigationError::InvalidStep {
                    step: 1,
                    failed: vec![EMAIL.to_string()]
                }
            );
            assert_eq!(controller.current_step(), 1);
            assert!(controller.state().fields.is_empty());
            assert!(screen.field(EMAIL).unwrap().feedback.is_error());
            assert!(!screen.field(FULL_NAME).unwrap().feedback.is_error());
            assert!(!screen.field(PHONE).unwrap().feedback.is_error());
        }

        #[test]
        fn test_cannot_skip_steps() {
            let mut controller = controller();
            let mut screen = screen();
            fill_step_one(&mut screen);
            let err = controller.advance_step(&mut screen, 3).unwrap_err();
            assert_eq!(err, NavigationError::NotAdjacent { from: 1, to: 3 });
            assert_eq!(controller.current_step(), 1);
        }

        #[test]
        fn test_cannot_advance_past_last_step() {
            let mut controller = controller();
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            assert!(controller.next_step(&mut screen).is_err());
            assert_eq!(controller.current_step(), 3);
        }

        #[test]
        fn test_retreat_ignores_validity() {
            let mut controller = controller();
            let mut screen = screen();
            fill_step_one(&mut screen);
            controller.advance_step(&mut screen, 2).unwrap();
            screen.set_text(ROLL_NUMBER, "x");

            controller.retreat_step(&mut screen, 1).unwrap();

            assert_eq!(controller.current_step(), 1);
            assert_eq!(controller.state().text(ROLL_NUMBER), Some("x"));
        }

        #[test]
        fn test_retreat_from_first_step_is_refused() {
            let mut controller = controller();
            let mut screen = screen();
            assert!(controller.prev_step(&mut screen).is_err());
            assert_eq!(controller.current_step(), 1);
        }

        #[test]
        fn test_markers_follow_current_step() {
            let mut controller = controller();
            let mut screen = screen();
            controller.sync_view(&mut screen);
            assert_eq!(
                screen.markers,
                vec![StepMarker::Active, StepMarker::Pending, StepMarker::Pending]
            );
            fill_step_one(&mut screen);
            controller.next_step(&mut screen).unwrap();
            assert_eq!(
                screen.markers,
                vec![StepMarker::Completed, StepMarker::Active, StepMarker::Pending]
            );
        }

        #[test]
        fn test_mock_view_sees_step_commands() {
            let mut controller = controller();
            let mut view = MockFormView::new();
            view.expect_read_value()
                .returning(|name| match name {
                    FULL_NAME => Some(FieldValue::Text("Grace Hopper".into())),
                    EMAIL => Some(FieldValue::Text("grace@navy.mil".into())),
                    PHONE => Some(FieldValue::Text("555 010 2030".into())),
                    _ => None,
                });
            view.expect_set_feedback().times(3).return_const(());
            view.expect_show_step().with(eq(2)).times(1).return_const(());
            view.expect_set_step_marker().times(3).return_const(());
            view.expect_set_notice()
                .with(eq(None::<String>))
                .times(1)
                .return_const(());
            controller.advance_step(&mut view, 2).unwrap();
        }
    }

    mod review {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_review_shows_entered_values() {
            let mut controller = controller();
            let mut screen = screen();
            at_review(&mut controller, &mut screen);

            assert_eq!(screen.review_text(FULL_NAME), Some("Ada Lovelace"));
            assert_eq!(screen.review_text(EMAIL), Some("ada@example.com"));
            assert_eq!(screen.review_text(PHONE), Some("+44 20 7946 0958"));
            assert_eq!(screen.review_text(ROLL_NUMBER), Some("CS-042"));
            assert_eq!(screen.review_text(YEAR), Some("3rd Year"));
        }

        #[test]
        fn test_department_shows_label_not_value() {
            let mut controller = controller();
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            assert_eq!(screen.review_text(DEPARTMENT), Some("Computer Science"));
            assert_eq!(controller.state().text(DEPARTMENT), Some("cse"));
        }

        #[test]
        fn test_values_survive_back_and_forth() {
            let mut controller = controller();
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            controller.prev_step(&mut screen).unwrap();
            screen.set_text(ROLL_NUMBER, "CS-100");
            controller.next_step(&mut screen).unwrap();
            assert_eq!(screen.review_text(ROLL_NUMBER), Some("CS-100"));
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_unchecked_terms_blocks_submission() {
            let mut backend = MockSubmissionBackend::new();
            backend.expect_submit().never();
            let mut controller = controller_with(Arc::new(backend));
            let mut screen = screen();
            at_review(&mut controller, &mut screen);

            let err = controller.submit(&mut screen).unwrap_err();

            assert!(matches!(
                err,
                SubmitError::Unconfirmed(FieldValidationError::Required { .. })
            ));
            assert_eq!(err.to_string(), "You must agree to the terms and conditions");
            assert!(screen.field(TERMS).unwrap().feedback.is_error());
            assert!(controller.state().is_editing());
            assert!(!screen.submit_busy);
        }

        #[tokio::test]
        async fn test_submit_requires_review_step() {
            let mut controller = controller();
            let mut screen = screen();
            assert_eq!(
                controller.submit(&mut screen),
                Err(SubmitError::NotOnReviewStep)
            );
        }

        #[tokio::test]
        async fn test_successful_submission_flow() {
            let mut controller = controller();
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            screen.toggle_field(TERMS);

            controller.submit(&mut screen).unwrap();
            assert!(controller.state().is_submitting());
            assert!(screen.submit_busy);
            assert_eq!(
                controller.submit(&mut screen),
                Err(SubmitError::AlreadySubmitting)
            );
            assert_eq!(
                controller.prev_step(&mut screen),
                Err(NavigationError::Busy)
            );

            let now = Instant::now();
            let outcome = controller.finish_submission(&mut screen, now).await;
            assert!(matches!(outcome, Some(Ok(_))));
            assert!(controller.state().is_success());
            assert!(screen.success_visible);
            assert!(!screen.submit_busy);
            assert!(controller.last_receipt().is_some());
            assert_eq!(
                controller.state().fields.get(TERMS),
                Some(&FieldValue::Flag(true))
            );

            // Reset waits for the delay
            assert!(!controller.tick(&mut screen, now));
            assert!(controller.tick(&mut screen, now + DEFAULT_RESET_DELAY));
            assert_eq!(controller.state(), &FormState::default());
            assert_eq!(screen.visible_step, 1);
            assert!(!screen.success_visible);
            assert!(screen.read_value(FULL_NAME).unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_backend_receives_all_saved_fields() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .withf(|r| {
                    r.fields.len() == 7
                        && r.fields.get(DEPARTMENT) == Some(&FieldValue::Text("cse".into()))
                        && r.fields.get(TERMS) == Some(&FieldValue::Flag(true))
                })
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new()));
            let mut controller = controller_with(Arc::new(backend));
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            screen.toggle_field(TERMS);
            controller.submit(&mut screen).unwrap();
            let outcome = controller
                .finish_submission(&mut screen, Instant::now())
                .await;
            assert!(matches!(outcome, Some(Ok(_))));
        }

        #[tokio::test]
        async fn test_backend_failure_returns_to_review() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .returning(|_| Err(SubmissionError::Timeout));
            let mut controller = controller_with(Arc::new(backend));
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            screen.toggle_field(TERMS);
            controller.submit(&mut screen).unwrap();

            let outcome = controller
                .finish_submission(&mut screen, Instant::now())
                .await;

            assert_eq!(outcome, Some(Err(SubmissionError::Timeout)));
            assert!(controller.state().is_editing());
            assert_eq!(controller.current_step(), 3);
            assert!(!screen.submit_busy);
            assert!(!screen.success_visible);
            assert_eq!(
                screen.notice.as_deref(),
                Some("Submission timed out. Please try again.")
            );
            // Retry is allowed
            assert!(controller.submit(&mut screen).is_ok());
        }

        #[tokio::test]
        async fn test_failure_notice_cleared_when_leaving_review() {
            let mut backend = MockSubmissionBackend::new();
            backend
                .expect_submit()
                .returning(|_| Err(SubmissionError::Network("offline".into())));
            let mut controller = controller_with(Arc::new(backend));
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            screen.toggle_field(TERMS);
            controller.submit(&mut screen).unwrap();
            controller
                .finish_submission(&mut screen, Instant::now())
                .await;
            assert!(screen.notice.is_some());

            controller.prev_step(&mut screen).unwrap();

            assert_eq!(controller.current_step(), 2);
            assert_eq!(screen.notice, None);
        }

        #[tokio::test]
        async fn test_cancel_returns_to_editing() {
            let backend = Arc::new(crate::backend::SimulatedBackend::new(
                Duration::from_secs(60),
            ));
            let mut controller = controller_with(backend);
            let mut screen = screen();
            at_review(&mut controller, &mut screen);
            screen.toggle_field(TERMS);
            controller.submit(&mut screen).unwrap();

            controller.cancel_submission(&mut screen);

            assert!(controller.state().is_editing());
            assert!(!screen.submit_busy);
            let outcome = controller.poll_submission(&mut screen, Instant::now()).await;
            assert!(outcome.is_none());
        }

        #[tokio::test]
        async fn test_poll_without_submission_is_none() {
            let mut controller = controller();
            let mut screen = screen();
            assert!(controller
                .poll_submission(&mut screen, Instant::now())
                .await
                .is_none());
        }

        #[test]
        fn test_tick_while_editing_does_nothing() {
            let mut controller = controller();
            let mut screen = screen();
            assert!(!controller.tick(&mut screen, Instant::now()));
        }
    }

    #[test]
    fn test_navigation_error_messages() {
        let err = NavigationError::InvalidStep {
            step: 1,
            failed: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Please fix 2 field(s) on step 1");
    }
}
