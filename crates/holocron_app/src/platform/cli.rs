use std::path::PathBuf;

use clap::Parser;
use holocron_logging::LogDestination;

/// Search and browse the people directory from the terminal.
///
/// Every line typed is the new value of the search box. `:next`, `:prev`,
/// `:help` and `:quit` act as the page buttons and controls. Results are
/// written as HTML to `<output-dir>/results.html`.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "holocron", version, about)]
pub struct Cli {
    /// RON configuration file. Defaults to ./holocron.ron when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root of the REST API, e.g. https://swapi.py4e.com/api
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Directory receiving results.html.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Quiet window before a search is sent.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Where log output goes: file, terminal or both.
    #[arg(long, value_name = "DEST")]
    pub log: Option<LogDestination>,
}
