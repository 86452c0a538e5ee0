use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::App;
use crate::tui::tree::{NodeRow, header_parts};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the visible window of the node list
pub fn render_node_list(frame: &mut Frame, app: &App, area: Rect) {
    let nav = &app.nav;
    let width = area.width as usize;

    if nav.tree().is_empty() {
        let msg = if nav.filter().is_active() {
            "No tasks match the filter"
        } else {
            "No tasks"
        };
        let line = Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.help),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    for row in nav.visible_rows() {
        let Some(node_row) = nav.tree().row_at(row) else {
            break;
        };
        let line = match node_row {
            NodeRow::Header(index) => {
                let Some(node) = nav.tree().flat().get(index) else {
                    continue;
                };
                let Some(task) = nav.store().at(node.task) else {
                    continue;
                };
                header_row(app, task, node.is_expanded, index == nav.selected(), width)
            }
            NodeRow::Detail { .. } => {
                let Some(text) = nav.tree().row_text(nav.store(), row) else {
                    continue;
                };
                Line::from(Span::styled(
                    truncate_to_width(&text, width),
                    Style::default().fg(app.theme.detail),
                ))
            }
        };
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// `▶ [id] description - [STATUS]` with a colored status badge. The
/// description is truncated so the badge always fits.
fn header_row<'a>(
    app: &App,
    task: &'a Task,
    is_expanded: bool,
    is_selected: bool,
    width: usize,
) -> Line<'a> {
    let (prefix, badge) = header_parts(task, is_expanded);
    let fixed = display_width(&prefix) + 3 + display_width(&badge);
    let description = truncate_to_width(&task.description, width.saturating_sub(fixed));

    let base = if is_selected {
        app.theme.selection()
    } else {
        Style::default()
    };
    let badge_style = app
        .theme
        .status_badge(task.status)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(prefix, base),
        Span::styled(description, base),
        Span::styled(" - ", base),
        Span::styled(badge, badge_style),
    ];

    if is_selected {
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), base));
        }
    }
    Line::from(spans)
}
