//! The event registration form: its steps and its rules

use super::field::FieldKind;
use super::layout::{select, FieldSpec, StepLayout};
use super::rules::{FieldRule, RuleSet};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").unwrap());

pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ROLL_NUMBER: &str = "roll_number";
pub const DEPARTMENT: &str = "department";
pub const YEAR: &str = "year";
pub const TERMS: &str = "terms";

/// Three steps: personal details, academic details, review
pub fn registration_layout() -> StepLayout {
    StepLayout::new(vec![
        (
            "Personal Information",
            vec![
                FieldSpec::new(FULL_NAME, "Full Name", FieldKind::Text),
                FieldSpec::new(EMAIL, "Email Address", FieldKind::Text),
                FieldSpec::new(PHONE, "Phone Number", FieldKind::Text),
            ],
        ),
        (
            "Academic Details",
            vec![
                FieldSpec::new(ROLL_NUMBER, "Roll Number", FieldKind::Text),
                select(
                    DEPARTMENT,
                    "Department",
                    &[
                        ("", "Select Department"),
                        ("cse", "Computer Science"),
                        ("it", "Information Technology"),
                        ("ece", "Electronics & Communication"),
                        ("eee", "Electrical & Electronics"),
                        ("mech", "Mechanical Engineering"),
                        ("civil", "Civil Engineering"),
                        ("other", "Other"),
                    ],
                ),
                select(
                    YEAR,
                    "Year of Study",
                    &[
                        ("", "Select Year"),
                        ("1", "1st Year"),
                        ("2", "2nd Year"),
                        ("3", "3rd Year"),
                        ("4", "4th Year"),
                    ],
                ),
            ],
        ),
        (
            "Review & Submit",
            vec![FieldSpec::new(TERMS, "Terms", FieldKind::Checkbox)],
        ),
    ])
}

pub fn registration_rules() -> RuleSet {
    RuleSet::new()
        .with_rule(
            FULL_NAME,
            FieldRule::required("Please enter a valid name (letters only, minimum 3 characters)")
                .with_min_length(3)
                .with_pattern(&NAME_PATTERN),
        )
        .with_rule(
            EMAIL,
            FieldRule::required("Please enter a valid email address").with_pattern(&EMAIL_PATTERN),
        )
        .with_rule(
            PHONE,
            FieldRule::required("Please enter a valid phone number (minimum 10 digits)")
                .with_pattern(&PHONE_PATTERN),
        )
        .with_rule(
            ROLL_NUMBER,
            FieldRule::required("Please enter a valid roll number").with_min_length(3),
        )
        .with_rule(DEPARTMENT, FieldRule::required("Please select your department"))
        .with_rule(YEAR, FieldRule::required("Please select your year"))
        .with_rule(
            TERMS,
            FieldRule::required("You must agree to the terms and conditions"),
        )
}
