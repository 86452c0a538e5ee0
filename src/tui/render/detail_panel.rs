use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

use crate::tui::app::App;

/// Bordered panel with the selected task's full text, scrolled by
/// `app.detail_scroll`
pub fn render_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let lines = app.detail_lines();
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut title = String::from(" Details ");
    if lines.len() > inner_height && inner_height > 0 {
        let last = (app.detail_scroll + inner_height).min(lines.len());
        title = format!(" Details {}-{}/{} ", app.detail_scroll + 1, last, lines.len());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border))
        .padding(Padding::horizontal(1))
        .title(title);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.detail_scroll)
        .take(inner_height)
        .map(Line::from)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
