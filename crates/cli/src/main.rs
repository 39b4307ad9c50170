//! trialsearch CLI: ranked search over clinical-trial records.
//!
//! Modes:
//! - **Shell mode**: `trialsearch [flags] COMMAND`: single command, exit
//! - **REPL mode**: `trialsearch [flags]`: interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "asthma phase 2" | trialsearch`: one query per line

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;
use trialsearch_core::SearchConfig;
use trialsearch_eval::{evaluate, judgment_template, load_judgments, write_template_if_missing};
use trialsearch_eval::{CUTOFF, QUERIES};
use trialsearch_source::{fetch_records, write_records};

use commands::{build_cli, DEFAULT_JUDGMENTS_PATH};
use format::{format_error, format_message, format_report, format_results, OutputMode};
use parse::{matches_to_action, CliAction};
use state::{config_path, SessionState};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let config_file = config_path(matches.get_one::<String>("config"));

    let action = if matches.subcommand().is_some() {
        match matches_to_action(&matches) {
            Ok(action) => Some(action),
            Err(e) => {
                eprintln!("{}", format_error(&e, output_mode));
                process::exit(1);
            }
        }
    } else {
        None
    };

    // `init-config` runs before any config is read
    if action == Some(CliAction::InitConfig) {
        process::exit(finish(init_config(&config_file, output_mode), output_mode));
    }

    let config = match load_config(&config_file, matches.get_one::<String>("data")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let exit_code = match action {
        Some(action) => finish(
            run_action(action, &config_file, config, output_mode),
            output_mode,
        ),
        None => match SessionState::open(config) {
            Ok(mut state) if std::io::stdin().is_terminal() => {
                repl::run_repl(&mut state, output_mode)
            }
            Ok(mut state) => repl::run_pipe(&mut state, output_mode),
            Err(e) => {
                eprintln!("{}", format_error(&e, output_mode));
                1
            }
        },
    };

    process::exit(exit_code);
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn load_config(path: &Path, data_flag: Option<&String>) -> trialsearch_core::Result<SearchConfig> {
    let mut config = SearchConfig::load_or_default(path)?;
    if let Some(data) = data_flag {
        config.data_path = PathBuf::from(data);
    }
    Ok(config)
}

/// Print a command's output or error; returns the exit code.
fn finish(result: Result<String, String>, mode: OutputMode) -> i32 {
    match result {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}

fn init_config(path: &Path, mode: OutputMode) -> Result<String, String> {
    let msg = match SearchConfig::write_default_if_missing(path) {
        Ok(true) => format!("wrote {}", path.display()),
        Ok(false) => format!("{} already exists, left unchanged", path.display()),
        Err(e) => return Err(e.to_string()),
    };
    Ok(format_message(&msg, mode))
}

fn run_action(
    action: CliAction,
    config_file: &Path,
    config: SearchConfig,
    mode: OutputMode,
) -> Result<String, String> {
    match action {
        CliAction::Search {
            query,
            k,
            use_filters,
        } => {
            let state = SessionState::open(config).map_err(|e| e.to_string())?;
            let k = k.unwrap_or(state.top_k());
            Ok(format_results(&state.search_with(&query, k, use_filters), mode))
        }
        CliAction::Fetch { limit, output } => {
            let mut fetch = config.fetch.clone();
            if let Some(limit) = limit {
                fetch.page_size = limit;
            }
            let output = output.unwrap_or_else(|| config.data_path.clone());
            let records = fetch_records(&fetch).map_err(|e| e.to_string())?;
            write_records(&output, &records).map_err(|e| e.to_string())?;
            let msg = format!("saved {} trials to {}", records.len(), output.display());
            Ok(format_message(&msg, mode))
        }
        CliAction::EvalTemplate { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_JUDGMENTS_PATH));
            let state = SessionState::open(config).map_err(|e| e.to_string())?;
            let rows = judgment_template(&state.engine(), &QUERIES, CUTOFF);
            let written = write_template_if_missing(&output, &rows).map_err(|e| e.to_string())?;
            let msg = if written {
                format!(
                    "judgment template saved to {}; fill in the relevance column (1 relevant, 0 not)",
                    output.display()
                )
            } else {
                format!("{} already exists, skipping", output.display())
            };
            Ok(format_message(&msg, mode))
        }
        CliAction::EvalMetrics { judgments } => {
            let path = judgments.unwrap_or_else(|| PathBuf::from(DEFAULT_JUDGMENTS_PATH));
            let judgments = load_judgments(&path).map_err(|e| e.to_string())?;
            let state = SessionState::open(config).map_err(|e| e.to_string())?;
            let report = evaluate(&state.engine(), &judgments, &QUERIES);
            Ok(format_report(&report, mode))
        }
        CliAction::InitConfig => init_config(config_file, mode),
    }
}
