//! Step definitions: which fields live on which step

use super::field::{FieldKind, SelectOption};

/// Static description of one field on a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Resolve a stored select value to the label the user saw.
    /// Non-select fields return `None`.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        match &self.kind {
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.label.as_str()),
            _ => None,
        }
    }
}

/// One page of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    /// 1-based step number
    pub number: usize,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

/// Ordered steps of a form. The last step is the review step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLayout {
    steps: Vec<StepDefinition>,
}

impl StepLayout {
    /// Build a layout from step titles and their fields, numbering from 1.
    pub fn new(steps: Vec<(&str, Vec<FieldSpec>)>) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(idx, (title, fields))| StepDefinition {
                number: idx + 1,
                title: title.to_string(),
                fields,
            })
            .collect();
        Self { steps }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn review_step(&self) -> usize {
        self.steps.len()
    }

    pub fn contains(&self, step: usize) -> bool {
        (1..=self.steps.len()).contains(&step)
    }

    pub fn step(&self, step: usize) -> Option<&StepDefinition> {
        step.checked_sub(1).and_then(|idx| self.steps.get(idx))
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Field names of a step, in display order
    pub fn field_names(&self, step: usize) -> impl Iterator<Item = &str> {
        self.step(step)
            .into_iter()
            .flat_map(|s| s.fields.iter().map(|f| f.name.as_str()))
    }

    /// Look up a field anywhere in the form
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    /// Fields shown on the review step: everything entered before it
    pub fn reviewed_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        let review = self.review_step();
        self.steps
            .iter()
            .filter(move |s| s.number < review)
            .flat_map(|s| s.fields.iter())
    }
}

/// Shorthand for a select field spec
pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> FieldSpec {
    FieldSpec::new(
        name,
        label,
        FieldKind::Select(
            options
                .iter()
                .map(|(value, label)| SelectOption::new(value, label))
                .collect(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> StepLayout {
        StepLayout::new(vec![
            ("One", vec![FieldSpec::new("a", "A", FieldKind::Text)]),
            (
                "Two",
                vec![
                    FieldSpec::new("b", "B", FieldKind::Text),
                    select("c", "C", &[("", "Pick"), ("x", "Ex")]),
                ],
            ),
            ("Review", vec![FieldSpec::new("ok", "Ok", FieldKind::Checkbox)]),
        ])
    }

    #[test]
    fn test_numbers_from_one() {
        let layout = layout();
        assert_eq!(layout.step_count(), 3);
        assert_eq!(layout.step(1).unwrap().title, "One");
        assert_eq!(layout.step(3).unwrap().number, 3);
        assert!(layout.step(0).is_none());
        assert!(layout.step(4).is_none());
    }

    #[test]
    fn test_contains() {
        let layout = layout();
        assert!(!layout.contains(0));
        assert!(layout.contains(1));
        assert!(layout.contains(3));
        assert!(!layout.contains(4));
    }

    #[test]
    fn test_field_names_in_order() {
        let layout = layout();
        let names: Vec<&str> = layout.field_names(2).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(layout.field_names(9).count(), 0);
    }

    #[test]
    fn test_option_label_resolution() {
        let layout = layout();
        let c = layout.field("c").unwrap();
        assert_eq!(c.option_label("x"), Some("Ex"));
        assert_eq!(c.option_label("missing"), None);
        assert_eq!(layout.field("a").unwrap().option_label("x"), None);
    }

    #[test]
    fn test_reviewed_fields_exclude_review_step() {
        let layout = layout();
        let names: Vec<&str> = layout.reviewed_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(layout.review_step(), 3);
    }
}
