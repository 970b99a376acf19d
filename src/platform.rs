//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display. Ctrl+S works on all platforms.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Next step shortcut display
#[cfg(target_os = "macos")]
pub const NEXT_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const NEXT_SHORTCUT: &str = "Ctrl+N";

/// Previous step shortcut display
#[cfg(target_os = "macos")]
pub const BACK_SHORTCUT: &str = "Cmd+B";

#[cfg(not(target_os = "macos"))]
pub const BACK_SHORTCUT: &str = "Ctrl+B";
