use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Normalize Shift+letter so bindings can match on the uppercase char alone.
/// Terminals disagree on whether Shift+g arrives as `g` or `G`.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        }
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
