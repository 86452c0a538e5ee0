use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::diagnostics::DiagnosticSink;
use crate::model::task::TaskStore;
use crate::ops::filter::FilterOptions;

use super::input;
use super::intent::Intent;
use super::layout::PanelLayout;
use super::nav::Navigator;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a filter term; the list refilters on every edit
    Filter,
}

/// Main application state
pub struct App {
    pub nav: Navigator,
    pub mode: Mode,
    /// Term being edited in filter mode
    pub filter_input: String,
    /// First visible line of the detail panel
    pub detail_scroll: usize,
    pub wrap_details: bool,
    pub theme: Theme,
    pub should_quit: bool,
    sink: Box<dyn DiagnosticSink>,
}

impl App {
    pub fn new(
        store: TaskStore,
        options: FilterOptions,
        wrap_details: bool,
        theme: Theme,
        sink: Box<dyn DiagnosticSink>,
    ) -> Self {
        App {
            nav: Navigator::new(store, options, PanelLayout::default()),
            mode: Mode::Navigate,
            filter_input: String::new(),
            detail_scroll: 0,
            wrap_details,
            theme,
            should_quit: false,
            sink,
        }
    }

    /// Apply one intent. Intents are processed strictly one at a time.
    pub fn apply(&mut self, intent: Intent) {
        self.sink.record(&format!("intent {:?}", intent));
        let before = self.nav.selected_id();

        match intent {
            Intent::MoveUp => self.nav.move_up(),
            Intent::MoveDown => self.nav.move_down(),
            Intent::GoTop => self.nav.go_to_top(),
            Intent::GoBottom => self.nav.go_to_bottom(),
            Intent::ToggleExpand => {
                if let (Some(id), Some(expanded)) = (self.nav.selected_id(), self.nav.toggle_expand())
                {
                    self.sink
                        .record(&format!("task id={} expanded={}", id, expanded));
                }
            }
            Intent::EnterFilterMode => {
                self.mode = Mode::Filter;
                self.filter_input = self.nav.filter().term().to_string();
            }
            Intent::UpdateFilterTerm(term) => {
                self.nav.apply_filter(&term);
                self.filter_input = term;
                self.record_filter();
            }
            Intent::CommitFilter => {
                self.mode = Mode::Navigate;
            }
            Intent::CancelFilter => {
                let was_filtering = self.mode == Mode::Filter;
                self.mode = Mode::Navigate;
                self.filter_input.clear();
                if was_filtering || self.nav.filter().is_active() {
                    self.nav.apply_filter("");
                    self.record_filter();
                }
            }
            Intent::ScrollDetailUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            Intent::ScrollDetailDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            Intent::PageDetailUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(self.detail_page());
            }
            Intent::PageDetailDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(self.detail_page());
            }
            Intent::Resize(width, height) => self.nav.resize(width, height),
            Intent::Quit => self.should_quit = true,
        }

        if self.nav.selected_id() != before {
            self.detail_scroll = 0;
        }
        self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
    }

    fn record_filter(&self) {
        self.sink.record(&format!(
            "filter {:?}: {} of {} tasks",
            self.nav.filter().term(),
            self.nav.tree().len(),
            self.nav.store().len()
        ));
    }

    /// Detail panel rows for the selected task
    pub fn detail_lines(&self) -> Vec<String> {
        self.nav.detail_lines(self.wrap_details)
    }

    fn detail_page(&self) -> usize {
        self.nav.layout().detail_inner_height().max(1)
    }

    fn max_detail_scroll(&self) -> usize {
        self.detail_lines()
            .len()
            .saturating_sub(self.nav.layout().detail_inner_height())
    }
}

/// Run the TUI over a loaded task store
pub fn run(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    app.apply(Intent::Resize(size.width, size.height));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Resize(width, height) => app.apply(Intent::Resize(width, height)),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
