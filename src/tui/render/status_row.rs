use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const NAVIGATE_HELP: &str =
    " j/k move  enter expand  / filter  J/K scroll details  esc clear filter  q quit";
const FILTER_HINT: &str = "Enter apply  Esc clear";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let help_style = Style::default().fg(app.theme.help);

    let line = match app.mode {
        Mode::Navigate => Line::from(Span::styled(NAVIGATE_HELP, help_style)),
        Mode::Filter => {
            // Filter prompt: /term▌
            let mut spans = vec![
                Span::raw(format!("/{}", app.filter_input)),
                Span::styled("\u{258C}", Style::default().fg(app.theme.changed)), // ▌ cursor
            ];
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let hint_width = FILTER_HINT.chars().count();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::raw(" ".repeat(padding)));
                spans.push(Span::styled(FILTER_HINT, help_style));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
