use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::diagnostics::NullSink;
use crate::model::task::TaskStore;
use crate::ops::filter::FilterOptions;
use crate::parse::parse_log;
use crate::tui::app::App;
use crate::tui::intent::Intent;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over a parsed log, sized to the default test terminal.
pub fn app_with_log(log: &str) -> App {
    let mut app = App::new(
        TaskStore::new(parse_log(log)),
        FilterOptions::default(),
        true,
        Theme::default(),
        Box::new(NullSink),
    );
    app.apply(Intent::Resize(TERM_W, TERM_H));
    app
}

/// Three tasks: ok, changed with path and diff, failed.
pub const SAMPLE_LOG: &str = "\
PLAY [webservers] ****
TASK [Install pkg] ****
Monday 03 June 2024  10:15:02 +0000 (0:00:00.045)       0:00:01.112 ****
ok: [hostA]
TASK [Copy file] ****
task path: /srv/site.yml:12
--- before
+++ after
@@ -1 +1 @@
-old
+new
changed: [hostB]
TASK [Restart app] ****
failed: [hostC] => {\"msg\": \"service not found\"}
";
