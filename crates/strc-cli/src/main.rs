//! strcleaner CLI.

use std::env;
use std::io::{self, IsTerminal};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use strc_cli::cli::Cli;
use strc_cli::config::{ConfigLoader, LoadedConfig};
use strc_cli::logging::{LogConfig, init_logging, level_filter};
use strc_cli::summary::{RunReport, print_summary};
use strc_core::{RunSummary, process_file};
use strc_model::{Config, LogOutput};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};

const EXIT_CONFIG: i32 = 1;
const EXIT_EXECUTION: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();

    let loaded = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(error) => {
            eprintln!("error: {error:#}");
            process::exit(EXIT_CONFIG);
        }
    };
    let log_config = log_config_from_cli(&cli, &loaded.config);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        process::exit(EXIT_CONFIG);
    }
    for key in &loaded.ignored_keys {
        warn!(key = %key, "ignoring unknown config key");
    }

    let config = loaded.config;
    let started = Instant::now();
    let exit_code = match run(&cli, &config) {
        Ok(summary) => {
            let elapsed = started.elapsed();
            if elapsed > config.timeout.as_duration() {
                warn!(
                    elapsed_ms = elapsed.as_millis(),
                    timeout = %config.timeout,
                    "run exceeded the configured timeout"
                );
            }
            if !cli.is_quiet() {
                print_summary(
                    &summary,
                    &RunReport {
                        input: &cli.input,
                        output: cli.output.as_deref(),
                        code_page: config.code_page,
                        elapsed,
                    },
                );
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            EXIT_EXECUTION
        }
    };
    process::exit(exit_code);
}

fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    ConfigLoader::new()
        .with_file(cli.config.clone())
        .with_env(env::vars())
        .with_overrides(cli.overrides())
        .strict(!cli.no_strict)
        .load()
        .context("failed to load configuration")
}

fn run(cli: &Cli, config: &Config) -> Result<RunSummary> {
    debug!(
        columns = ?config.columns,
        code_page = %config.code_page,
        has_header = config.has_header,
        dedupe = config.dedupe.enabled,
        timeout = %config.timeout,
        "configuration loaded"
    );
    info!(input = %cli.input.display(), "processing");
    process_file(&cli.input, cli.output.as_deref(), config)
        .with_context(|| format!("failed to process {}", cli.input.display()))
}

/// Build logging configuration with consistent precedence: `--log-level`,
/// then `--silent`, then `-v/-q`, then the configured `log.level`.
fn log_config_from_cli(cli: &Cli, config: &Config) -> LogConfig {
    let settings = &config.log;
    let flag_level = cli.log_level.is_some() || cli.silent || cli.verbosity.is_present();
    let level = if cli.log_level.is_some() {
        level_filter(settings.level)
    } else if cli.silent {
        LevelFilter::ERROR
    } else if cli.verbosity.is_present() {
        cli.verbosity.tracing_level_filter()
    } else {
        level_filter(settings.level)
    };
    let to_terminal = settings.file.is_none()
        && match settings.output {
            LogOutput::Stderr => io::stderr().is_terminal(),
            LogOutput::Stdout => io::stdout().is_terminal(),
        };
    let mut log_config = LogConfig::default()
        .with_level(level)
        .with_format(settings.format)
        .with_output(settings.output)
        .with_log_file(settings.file.clone())
        .with_ansi(match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => to_terminal,
        });
    log_config.use_env_filter = !flag_level;
    log_config
}
