//! Terminal-side registration form: widgets, focus, and review text
//!
//! [`RegistrationScreen`] is the concrete [`FormView`] the controller drives.
//! It owns every field widget for every step, so values typed on an earlier
//! step are still there when the user comes back to it.

use super::field::{FieldFeedback, FieldKind, FieldValue, FormField};
use super::layout::StepLayout;
use super::view::{FormView, StepMarker};

/// Buttons shown under the fields of each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Back,
    /// Next on ordinary steps, Submit on the review step
    Forward,
}

/// One step's widgets
#[derive(Debug, Clone)]
pub struct ScreenStep {
    pub title: String,
    pub fields: Vec<FormField>,
}

/// A read-only line on the review step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub name: String,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RegistrationScreen {
    pub steps: Vec<ScreenStep>,
    /// 1-based step currently shown
    pub visible_step: usize,
    pub markers: Vec<StepMarker>,
    pub review: Vec<ReviewRow>,
    /// Focus index; `fields.len()` of the visible step is the buttons row
    pub active_field_index: usize,
    pub selected_button: FormButton,
    pub submit_busy: bool,
    pub success_visible: bool,
    pub notice: Option<String>,
}

impl RegistrationScreen {
    pub fn new(layout: &StepLayout) -> Self {
        let steps: Vec<ScreenStep> = layout
            .steps()
            .iter()
            .map(|step| ScreenStep {
                title: step.title.clone(),
                fields: step
                    .fields
                    .iter()
                    .map(|spec| FormField::with_kind(&spec.name, &spec.label, spec.kind.clone()))
                    .collect(),
            })
            .collect();
        let review = layout
            .reviewed_fields()
            .map(|spec| ReviewRow {
                name: spec.name.clone(),
                label: spec.label.clone(),
                text: "-".to_string(),
            })
            .collect();
        let mut markers = vec![StepMarker::Pending; steps.len()];
        if let Some(first) = markers.first_mut() {
            *first = StepMarker::Active;
        }

        Self {
            steps,
            visible_step: 1,
            markers,
            review,
            active_field_index: 0,
            selected_button: FormButton::Forward,
            submit_busy: false,
            success_visible: false,
            notice: None,
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_review_visible(&self) -> bool {
        self.visible_step == self.steps.len()
    }

    pub fn current(&self) -> Option<&ScreenStep> {
        self.visible_step
            .checked_sub(1)
            .and_then(|idx| self.steps.get(idx))
    }

    fn current_mut(&mut self) -> Option<&mut ScreenStep> {
        let idx = self.visible_step.checked_sub(1)?;
        self.steps.get_mut(idx)
    }

    fn visible_field_count(&self) -> usize {
        self.current().map(|s| s.fields.len()).unwrap_or(0)
    }

    /// Look up a field on any step
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.steps
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.name == name)
    }

    pub fn review_text(&self, name: &str) -> Option<&str> {
        self.review
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.text.as_str())
    }

    // Focus handling

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index >= self.visible_field_count()
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.current()
            .and_then(|s| s.fields.get(self.active_field_index))
    }

    fn active_field_mut(&mut self) -> Option<&mut FormField> {
        let idx = self.active_field_index;
        self.current_mut().and_then(|s| s.fields.get_mut(idx))
    }

    /// Move focus to the next field, wrapping through the buttons row
    pub fn next_field(&mut self) {
        let count = self.visible_field_count() + 1;
        self.active_field_index = (self.active_field_index + 1) % count;
    }

    /// Move focus to the previous field, wrapping through the buttons row
    pub fn prev_field(&mut self) {
        let count = self.visible_field_count() + 1;
        if self.active_field_index == 0 {
            self.active_field_index = count - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    /// Move to the other button. The first step has no Back button.
    pub fn toggle_button(&mut self) {
        if self.visible_step <= 1 {
            self.selected_button = FormButton::Forward;
            return;
        }
        self.selected_button = match self.selected_button {
            FormButton::Back => FormButton::Forward,
            FormButton::Forward => FormButton::Back,
        };
    }

    // Editing

    /// Type a character into the focused field. Editing a field that shows
    /// an error clears the error.
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_field_mut() {
            match field.kind {
                FieldKind::Text => field.push_char(c),
                FieldKind::Select(_) | FieldKind::Checkbox if c == ' ' => field.toggle(),
                _ => return,
            }
            clear_error(field);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_field_mut() {
            field.pop_char();
            clear_error(field);
        }
    }

    /// Step through the options of a focused select. Other kinds ignore it.
    pub fn cycle_option(&mut self, forward: bool) {
        let field = self
            .active_field_mut()
            .filter(|f| matches!(f.kind, FieldKind::Select(_)));
        if let Some(field) = field {
            if forward {
                field.next_option();
            } else {
                field.prev_option();
            }
            clear_error(field);
        }
    }

    /// Replace a text field's value
    pub fn set_text(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            if field.is_text() {
                field.value = FieldValue::Text(value.to_string());
            }
        }
    }

    /// Choose a select option by its underlying value
    pub fn select_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            let position = match &field.kind {
                FieldKind::Select(options) => options.iter().position(|o| o.value == value),
                _ => None,
            };
            if let Some(idx) = position {
                field.selected = idx;
                field.value = FieldValue::Text(value.to_string());
            }
        }
    }

    pub fn toggle_field(&mut self, name: &str) {
        if let Some(field) = self.field_mut(name) {
            field.toggle();
        }
    }
}

fn clear_error(field: &mut FormField) {
    if field.feedback.is_error() {
        field.feedback = FieldFeedback::None;
    }
}

impl FormView for RegistrationScreen {
    fn read_value(&self, field: &str) -> Option<FieldValue> {
        self.field(field).map(|f| f.value.clone())
    }

    fn set_feedback(&mut self, field: &str, feedback: FieldFeedback) {
        if let Some(f) = self.field_mut(field) {
            f.feedback = feedback;
        }
    }

    fn show_step(&mut self, step: usize) {
        self.visible_step = step.clamp(1, self.steps.len().max(1));
        self.active_field_index = 0;
        self.selected_button = FormButton::Forward;
    }

    fn set_step_marker(&mut self, step: usize, marker: StepMarker) {
        if let Some(slot) = step.checked_sub(1).and_then(|idx| self.markers.get_mut(idx)) {
            *slot = marker;
        }
    }

    fn set_review_text(&mut self, field: &str, text: &str) {
        if let Some(row) = self.review.iter_mut().find(|r| r.name == field) {
            row.text = text.to_string();
        }
    }

    fn set_submit_busy(&mut self, busy: bool) {
        self.submit_busy = busy;
    }

    fn set_success_visible(&mut self, visible: bool) {
        self.success_visible = visible;
    }

    fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    fn reset_inputs(&mut self) {
        for field in self.steps.iter_mut().flat_map(|s| s.fields.iter_mut()) {
            field.clear();
        }
        for row in &mut self.review {
            row.text = "-".to_string();
        }
        self.active_field_index = 0;
    }
}
