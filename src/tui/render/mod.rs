pub mod detail_panel;
pub mod header;
pub mod node_list;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use super::app::App;
use super::layout::{HEADER_ROWS, STATUS_ROWS};

/// Main render function: header | node list | detail panel | status row
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let panels = app.nav.layout();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(0),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(panels.list_height),
            Constraint::Min(0),
        ])
        .split(chunks[1]);

    header::render_header(frame, app, chunks[0]);
    node_list::render_node_list(frame, app, body[0]);
    detail_panel::render_detail_panel(frame, app, body[1]);
    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn full_screen_layout() {
        let app = app_with_log(SAMPLE_LOG);
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, &app));
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with(" Ansible Logs Viewer "));
        assert!(lines[0].contains("3/3 tasks"));
        assert!(lines[2].starts_with("\u{25B6} [1] Install pkg - [OK]"));
        assert!(lines[3].starts_with("\u{25B6} [2] Copy file - [CHANGED]"));
        assert_eq!(lines[5], "");
        // List height 6, detail panel border on the next row
        assert!(lines[8].starts_with("\u{256D}"));
        assert!(lines[8].contains("Details"));
        assert!(lines[9].contains("Item: Install pkg"));
        assert!(output.ends_with("q quit"));
    }
}
