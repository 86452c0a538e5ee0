use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::intent::Intent;

pub(super) fn navigate_intent(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            KeyCode::Char('k') => Some(Intent::ScrollDetailUp),
            KeyCode::Char('j') => Some(Intent::ScrollDetailDown),
            KeyCode::Char('u') => Some(Intent::PageDetailUp),
            KeyCode::Char('d') => Some(Intent::PageDetailDown),
            _ => None,
        };
    }

    let intent = match key.code {
        KeyCode::Char('q') => Intent::Quit,

        // Selection
        KeyCode::Char('k') | KeyCode::Up => Intent::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Intent::MoveDown,
        KeyCode::Char('g') | KeyCode::Home => Intent::GoTop,
        KeyCode::Char('G') | KeyCode::End => Intent::GoBottom,
        KeyCode::Enter | KeyCode::Char(' ') => Intent::ToggleExpand,

        // Filter
        KeyCode::Char('/') => Intent::EnterFilterMode,
        KeyCode::Esc => Intent::CancelFilter,

        // Detail panel
        KeyCode::Char('K') => Intent::ScrollDetailUp,
        KeyCode::Char('J') => Intent::ScrollDetailDown,
        KeyCode::PageUp => Intent::PageDetailUp,
        KeyCode::PageDown => Intent::PageDetailDown,

        _ => return None,
    };
    Some(intent)
}
