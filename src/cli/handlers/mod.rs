use std::path::PathBuf;

use crate::cli::commands::Cli;
use crate::cli::output::{format_task_list, task_list_json};
use crate::io::config_io;
use crate::io::diagnostics::{DEFAULT_LOG_FILE, sink_for};
use crate::io::log_io::load_log;
use crate::model::config::ViewerConfig;
use crate::model::task::{Task, TaskStore};
use crate::ops::filter::{FilterMode, FilterOptions, filter_tasks};
use crate::tui::{self, App};
use crate::tui::theme::Theme;

/// Effective settings after layering CLI flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub filter: FilterOptions,
    pub wrap_details: bool,
    pub debug_log: PathBuf,
}

impl Settings {
    /// Flags can only switch features on (or wrapping off); they never
    /// undo a config choice in the other direction.
    pub fn resolve(cli: &Cli, config: &ViewerConfig) -> Self {
        let fuzzy = cli.fuzzy || config.filter.fuzzy;
        let debug_log = cli
            .debug_log
            .clone()
            .or_else(|| config.debug.log_file.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Settings {
            filter: FilterOptions {
                mode: if fuzzy {
                    FilterMode::Fuzzy
                } else {
                    FilterMode::Substring
                },
                full_content: cli.full_content || config.filter.full_content,
            },
            wrap_details: config.ui.wrap_details && !cli.no_wrap,
            debug_log,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config);

    let sink = sink_for(cli.debug, &settings.debug_log);
    sink.record(&format!("opening {}", cli.log_file.display()));
    let store = load_log(&cli.log_file, sink.as_ref())?;

    if cli.list {
        return cmd_list(&store, cli.filter.as_deref(), settings.filter, cli.json);
    }

    let app = App::new(
        store,
        settings.filter,
        settings.wrap_details,
        Theme::from_config(&config.ui),
        sink,
    );
    tui::run(app)
}

fn cmd_list(
    store: &TaskStore,
    term: Option<&str>,
    options: FilterOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<&Task> = filter_tasks(store, term.unwrap_or(""), options);
    if json {
        println!("{}", task_list_json(&tasks)?);
    } else {
        print!("{}", format_task_list(&tasks));
    }
    Ok(())
}
