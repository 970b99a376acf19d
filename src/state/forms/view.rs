//! Presentation port used by the form controller
//!
//! The controller never touches widgets directly. It reads values and issues
//! state-reflecting commands through this trait, so it can be driven by the
//! terminal screen or by a mock in tests.

use super::field::{FieldFeedback, FieldValue};

/// Progress marker of one step in the step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMarker {
    #[default]
    Pending,
    Active,
    Completed,
}

impl StepMarker {
    /// Marker for `step` when the form is on `current`
    pub fn for_step(step: usize, current: usize) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait FormView {
    /// Current widget value of a field, `None` for unknown fields
    fn read_value(&self, field: &str) -> Option<FieldValue>;

    /// Show validation feedback on a field
    fn set_feedback(&mut self, field: &str, feedback: FieldFeedback);

    /// Show which step is visible
    fn show_step(&mut self, step: usize);

    /// Mark a step in the progress indicator
    fn set_step_marker(&mut self, step: usize, marker: StepMarker);

    /// Set a read-only text slot on the review step
    fn set_review_text(&mut self, field: &str, text: &str);

    /// Disable the submit control while a submission is in flight
    fn set_submit_busy(&mut self, busy: bool);

    /// Show or hide the success dialog
    fn set_success_visible(&mut self, visible: bool);

    /// Report a form-level message (e.g. a failed submission)
    fn set_notice(&mut self, notice: Option<String>);

    /// Clear every input and its feedback
    fn reset_inputs(&mut self);
}
