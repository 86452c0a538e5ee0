use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::intent::Intent;

/// Filter mode: every edit yields the full new term so the list can be
/// refiltered live.
pub(super) fn filter_intent(input: &str, key: KeyEvent) -> Option<Intent> {
    let ctrl_or_alt = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Esc => Some(Intent::CancelFilter),
        KeyCode::Enter => Some(Intent::CommitFilter),
        KeyCode::Backspace => {
            let mut term = input.to_string();
            term.pop()?;
            Some(Intent::UpdateFilterTerm(term))
        }
        KeyCode::Char(c) if !ctrl_or_alt => {
            let mut term = input.to_string();
            term.push(c);
            Some(Intent::UpdateFilterTerm(term))
        }
        _ => None,
    }
}
