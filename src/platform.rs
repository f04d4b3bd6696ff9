//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Save shortcut display for help text
/// Ctrl+S works on all platforms
pub const SAVE_SHORTCUT: &str = "^S";

/// Extra save modifier where the terminal forwards it
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
const SAVE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
const SAVE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Whether a key event is the save shortcut
pub fn is_save_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | SAVE_MODIFIER)
}
