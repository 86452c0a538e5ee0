mod common;
mod filter;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};
use super::intent::Intent;

use common::normalize_key;
use filter::filter_intent;
use navigate::navigate_intent;

/// Translate a key press into an intent for the given mode. `filter_input`
/// is the term being edited, used to build the next term in filter mode.
pub fn intent_for_key(mode: Mode, filter_input: &str, key: KeyEvent) -> Option<Intent> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }
    let key = normalize_key(key);
    match mode {
        Mode::Navigate => navigate_intent(key),
        Mode::Filter => filter_intent(filter_input, key),
    }
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(intent) = intent_for_key(app.mode, &app.filter_input, key) {
        app.apply(intent);
    }
}
