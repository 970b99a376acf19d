//! Form domain layer
//!
//! Declarative field rules and step layout, the controller that gates step
//! navigation on them, and the screen the controller drives.

mod controller;
mod field;
mod form_state;
mod layout;
pub mod registration;
mod rules;
mod screen;
mod view;

pub use controller::{FormController, NavigationError, SubmitError};
pub use field::{FieldFeedback, FieldKind, FieldValue, FormField, SelectOption};
pub use form_state::{FlowPhase, FormState};
pub use layout::{FieldSpec, StepDefinition, StepLayout};
pub use rules::{FieldRule, FieldValidationError, RuleSet};
pub use screen::{FormButton, RegistrationScreen, ReviewRow, ScreenStep};
pub use view::{FormView, StepMarker};
