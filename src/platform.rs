//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for submit/copy shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms (Cmd+Enter also works on macOS)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Whether a key press is the form submit shortcut
pub fn is_submit_shortcut(code: crossterm::event::KeyCode, modifiers: KeyModifiers) -> bool {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char('s') => modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Enter => modifiers.contains(COPY_MODIFIER),
        _ => false,
    }
}
