use ratatui::style::{Color, Style};

use crate::model::UiConfig;
use crate::model::task::TaskStatus;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub ok: Color,
    pub changed: Color,
    pub skipping: Color,
    pub failed: Color,
    pub unknown: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Detail lines under expanded nodes
    pub detail: Color,
    /// Status row help text
    pub help: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: Color::Rgb(0x25, 0xA0, 0x65),
            header_fg: Color::Rgb(0xFF, 0xFD, 0xF5),
            ok: Color::Rgb(0x25, 0xA0, 0x65),
            changed: Color::Rgb(0xFF, 0xA5, 0x00),
            skipping: Color::Rgb(0x88, 0x88, 0x88),
            failed: Color::Rgb(0xFF, 0x00, 0x00),
            unknown: Color::Rgb(0x88, 0x88, 0x88),
            selection_bg: Color::Rgb(0x25, 0xA0, 0x65),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            detail: Color::Rgb(0xAA, 0xAA, 0xAA),
            help: Color::Rgb(0x62, 0x62, 0x62),
            border: Color::Rgb(0x25, 0xA0, 0x65),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults. Unknown keys
    /// and malformed colors are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "ok" => theme.ok = color,
                    "changed" => theme.changed = color,
                    "skipping" => theme.skipping = color,
                    "failed" => theme.failed = color,
                    "unknown" => theme.unknown = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_fg" => theme.selection_fg = color,
                    "detail" => theme.detail = color,
                    "help" => theme.help = color,
                    "border" => theme.border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Badge background for a task status. Fatal shares the failed color.
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            s if s.is_failure() => self.failed,
            TaskStatus::Ok => self.ok,
            TaskStatus::Changed => self.changed,
            TaskStatus::Skipping => self.skipping,
            _ => self.unknown,
        }
    }

    pub fn status_badge(&self, status: TaskStatus) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.status_color(status))
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.header_fg).bg(self.header_bg)
    }

    pub fn selection(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }
}
