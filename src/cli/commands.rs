use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ansible-logs-view",
    about = concat!("ansible-logs-view v", env!("CARGO_PKG_VERSION"), " - browse Ansible execution logs"),
    version
)]
pub struct Cli {
    /// Ansible execution log to open
    pub log_file: PathBuf,

    /// Append diagnostics to a log file
    #[arg(long)]
    pub debug: bool,

    /// Diagnostic log path, used with --debug
    #[arg(long, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Match filter terms as in-order subsequences
    #[arg(long)]
    pub fuzzy: bool,

    /// Also search diffs and raw task output when filtering
    #[arg(long)]
    pub full_content: bool,

    /// Do not wrap the detail panel
    #[arg(long)]
    pub no_wrap: bool,

    /// Print the parsed tasks instead of opening the viewer
    #[arg(long)]
    pub list: bool,

    /// Only list tasks matching this term
    #[arg(long, value_name = "TERM", requires = "list")]
    pub filter: Option<String>,

    /// Output the listed tasks as JSON
    #[arg(long, requires = "list")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "ansible-logs-view",
            "run.log",
            "--list",
            "--filter",
            "fail",
            "--json",
            "--fuzzy",
        ])
        .unwrap();
        assert_eq!(cli.log_file, PathBuf::from("run.log"));
        assert!(cli.list && cli.json && cli.fuzzy);
        assert_eq!(cli.filter.as_deref(), Some("fail"));
        assert!(!cli.debug);
    }

    #[test]
    fn filter_requires_list() {
        assert!(Cli::try_parse_from(["ansible-logs-view", "run.log", "--filter", "x"]).is_err());
        assert!(Cli::try_parse_from(["ansible-logs-view", "run.log", "--json"]).is_err());
    }

    #[test]
    fn log_file_is_required() {
        assert!(Cli::try_parse_from(["ansible-logs-view"]).is_err());
    }
}
