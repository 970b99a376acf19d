//! Form session state owned by the controller

use super::field::FieldValue;
use std::collections::BTreeMap;
use std::time::Instant;

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPhase {
    /// User is filling in `current_step`
    #[default]
    Editing,
    /// Waiting on the submission backend
    Submitting,
    /// Submission succeeded; the form resets at `reset_at`
    Success { reset_at: Instant },
}

/// Current step plus the values saved from steps the user has left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// 1-based step pointer
    pub current_step: usize,
    /// Saved field values, keyed by field name
    pub fields: BTreeMap<String, FieldValue>,
    pub phase: FlowPhase,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            current_step: 1,
            fields: BTreeMap::new(),
            phase: FlowPhase::Editing,
        }
    }
}

impl FormState {
    pub fn is_editing(&self) -> bool {
        matches!(self.phase, FlowPhase::Editing)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FlowPhase::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.phase, FlowPhase::Success { .. })
    }

    /// Saved text of a field, if any
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(FieldValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_step_one_editing() {
        let state = FormState::default();
        assert_eq!(state.current_step, 1);
        assert!(state.fields.is_empty());
        assert!(state.is_editing());
        assert!(!state.is_submitting());
        assert!(!state.is_success());
    }

    #[test]
    fn test_text_lookup() {
        let mut state = FormState::default();
        state
            .fields
            .insert("email".into(), FieldValue::Text("a@b.com".into()));
        assert_eq!(state.text("email"), Some("a@b.com"));
        assert_eq!(state.text("phone"), None);
    }

    #[test]
    fn test_success_phase() {
        let state = FormState {
            phase: FlowPhase::Success {
                reset_at: Instant::now(),
            },
            ..Default::default()
        };
        assert!(state.is_success());
    }
}
