//! Form rendering module
//!
//! - `field_renderer`: one input with its validation message
//! - `registration_form`: the multi-step registration form

mod field_renderer;
mod registration_form;

pub use registration_form::draw as draw_registration;
