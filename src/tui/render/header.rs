use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

const TITLE: &str = " Ansible Logs Viewer ";

/// Title with visible/total counts and the active filter, then a separator
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let nav = &app.nav;
    let mut spans = vec![
        Span::styled(TITLE, app.theme.header().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "  {}/{} tasks",
            nav.tree().len(),
            nav.store().len()
        )),
    ];

    let expanded = nav.tree().expanded_count();
    if expanded > 0 {
        spans.push(Span::styled(
            format!("  {} expanded", expanded),
            Style::default().fg(app.theme.detail),
        ));
    }

    if nav.filter().is_active() {
        spans.push(Span::styled(
            format!("  filter: {}", nav.filter().term()),
            Style::default().fg(app.theme.changed),
        ));
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.border),
    ));

    frame.render_widget(Paragraph::new(vec![Line::from(spans), separator]), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::intent::Intent;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_shows_counts() {
        let app = app_with_log(SAMPLE_LOG);
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        let first = output.lines().next().unwrap();
        assert_eq!(first, " Ansible Logs Viewer   3/3 tasks");
    }

    #[test]
    fn header_shows_filter_and_expansion() {
        let mut app = app_with_log(SAMPLE_LOG);
        app.apply(Intent::ToggleExpand);
        app.apply(Intent::UpdateFilterTerm("pkg".into()));
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        let first = output.lines().next().unwrap();
        assert_eq!(
            first,
            " Ansible Logs Viewer   1/3 tasks  1 expanded  filter: pkg"
        );
    }
}
