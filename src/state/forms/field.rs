//! Form field value objects

use serde::{Deserialize, Serialize};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input or the underlying value of a select option
    Text(String),
    /// Checkbox state
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Whether the value counts as missing for a required field.
    /// Text is trimmed first, so whitespace-only input is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(checked) => !checked,
        }
    }

    /// Get the text value (returns empty string for flags)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }
}

/// Validation feedback shown next to a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldFeedback {
    #[default]
    None,
    Valid,
    Error(String),
}

impl FieldFeedback {
    pub fn is_error(&self) -> bool {
        matches!(self, FieldFeedback::Error(_))
    }

    /// Message line rendered under the field
    pub fn message(&self) -> &str {
        match self {
            FieldFeedback::None => "",
            FieldFeedback::Valid => "✓ Looks good!",
            FieldFeedback::Error(msg) => msg,
        }
    }
}

/// One option of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Input widget kind of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Options in display order; the first entry is the unselected placeholder
    Select(Vec<SelectOption>),
    Checkbox,
}

/// Represents a single live form field with its value and feedback
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub feedback: FieldFeedback,
    /// Index into the select options (always 0 for other kinds)
    pub selected: usize,
}

impl FormField {
    /// Create a new text field
    #[cfg(test)]
    pub fn text(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Text)
    }

    /// Create a field of any kind with its empty value
    pub fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        };
        let mut field = Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value,
            feedback: FieldFeedback::None,
            selected: 0,
        };
        field.sync_select_value();
        field
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text)
    }

    /// Push a character to a text field. Other kinds ignore typed characters.
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            if self.kind == FieldKind::Text {
                s.push(c);
            }
        }
    }

    /// Remove the last character from a text field
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            if self.kind == FieldKind::Text {
                s.pop();
            }
        }
    }

    /// Toggle a checkbox, or advance a select
    pub fn toggle(&mut self) {
        match self.kind {
            FieldKind::Checkbox => self.value = FieldValue::Flag(!self.value.as_flag()),
            FieldKind::Select(_) => self.next_option(),
            FieldKind::Text => {}
        }
    }

    /// Select the next option (wraps around)
    pub fn next_option(&mut self) {
        if let FieldKind::Select(options) = &self.kind {
            if !options.is_empty() {
                self.selected = (self.selected + 1) % options.len();
            }
        }
        self.sync_select_value();
    }

    /// Select the previous option (wraps around)
    pub fn prev_option(&mut self) {
        if let FieldKind::Select(options) = &self.kind {
            if !options.is_empty() {
                self.selected = if self.selected == 0 {
                    options.len() - 1
                } else {
                    self.selected - 1
                };
            }
        }
        self.sync_select_value();
    }

    fn sync_select_value(&mut self) {
        if let FieldKind::Select(options) = &self.kind {
            let value = options
                .get(self.selected)
                .map(|o| o.value.clone())
                .unwrap_or_default();
            self.value = FieldValue::Text(value);
        }
    }

    /// Clear the value and feedback
    pub fn clear(&mut self) {
        self.selected = 0;
        self.value = match self.kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        };
        self.sync_select_value();
        self.feedback = FieldFeedback::None;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text => self.value.as_text().to_string(),
            FieldKind::Select(options) => options
                .get(self.selected)
                .map(|o| format!("◀ {} ▶", o.label))
                .unwrap_or_default(),
            FieldKind::Checkbox => {
                let mark = if self.value.as_flag() { "x" } else { " " };
                format!("[{mark}] I agree to the terms and conditions")
            }
        }
    }
}
