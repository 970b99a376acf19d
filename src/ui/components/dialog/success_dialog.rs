//! Registration confirmation dialog

use super::base::{key_hint, render_dialog, DialogConfig};
use crate::backend::SubmissionReceipt;
use ratatui::{style::Color, Frame};

/// Body text of the confirmation dialog
pub fn success_message(event_name: &str, receipt: Option<&SubmissionReceipt>) -> String {
    let mut message = format!(
        "Thank you for registering for {event_name}. We'll send a confirmation email shortly."
    );
    if let Some(receipt) = receipt {
        message.push_str(&format!("\n\nConfirmation #{}", receipt.short_id()));
    }
    message.push_str("\n\nThe form will reset in a moment.");
    message
}

/// Render the success dialog over the registration form
pub fn render_success_dialog(
    frame: &mut Frame,
    event_name: &str,
    receipt: Option<&SubmissionReceipt>,
) {
    let message = success_message(event_name, receipt);
    render_dialog(
        frame,
        DialogConfig {
            title: "✓ Registration Successful!",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(key_hint("close")),
            max_width: 64,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_includes_confirmation_id() {
        let receipt = SubmissionReceipt::new();
        let message = success_message("Open Web Day", Some(&receipt));
        assert!(message.contains("Open Web Day"));
        assert!(message.contains(&format!("#{}", receipt.short_id())));
    }

    #[test]
    fn test_message_without_receipt() {
        let message = success_message("Open Web Day", None);
        assert!(!message.contains('#'));
        assert!(message.ends_with("reset in a moment."));
    }
}
