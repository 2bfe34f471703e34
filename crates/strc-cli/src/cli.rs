//! CLI argument definitions for strcleaner.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::config::Overrides;

#[derive(Parser)]
#[command(
    name = "strcleaner",
    version,
    about = "Normalize text columns of a CSV file and drop duplicate rows",
    long_about = "Normalize text columns of a CSV file and drop duplicate rows.\n\n\
                  Settings are layered: built-in defaults, then the TOML file given with\n\
                  --config, then STRCLEANER_* environment variables (nested keys joined\n\
                  with __), then the flags below."
)]
pub struct Cli {
    /// Input CSV file.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV file (stdout when omitted).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML configuration file. YAML files are not read; convert them to TOML.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Warn about unknown configuration keys instead of rejecting them.
    #[arg(long = "no-strict")]
    pub no_strict: bool,

    /// Target columns, 1-origin and comma separated.
    #[arg(long = "columns", value_name = "N,N", value_delimiter = ',')]
    pub columns: Option<Vec<i64>>,

    /// Character encoding of input and output (utf8 or cp932).
    #[arg(long = "code-page", value_name = "NAME")]
    pub code_page: Option<String>,

    /// Treat the first record as a header row.
    #[arg(long = "has-header")]
    pub has_header: bool,

    /// Output record terminator (crlf or lf).
    #[arg(long = "line-ending", value_name = "ENDING")]
    pub line_ending: Option<String>,

    /// Prefix UTF-8 output with a byte-order mark.
    #[arg(long = "utf8-bom", value_name = "BOOL")]
    pub utf8_bom: Option<bool>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Errors only, and no run summary.
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(long = "log-format", value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Append logs to a file instead of a standard stream.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The flag layer of the configuration: only flags that were given.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            columns: self.columns.clone(),
            code_page: self.code_page.clone(),
            has_header: self.has_header.then_some(true),
            line_ending: self.line_ending.clone(),
            utf8_bom: self.utf8_bom,
            log_level: self.log_level.map(|level| level.as_str().to_string()),
            log_format: self.log_format.map(|format| format.as_str().to_string()),
            log_file: self.log_file.clone(),
        }
    }

    /// Whether -q or --silent was given. Quiet runs print no summary.
    pub fn is_quiet(&self) -> bool {
        self.silent || self.verbosity.tracing_level_filter() < LevelFilter::INFO
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl LogFormatArg {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Compact => "compact",
            LogFormatArg::Json => "json",
        }
    }
}
