//! Clap command tree definition.
//!
//! Builds the `clap::Command` tree for shell mode. REPL input is free-text
//! queries plus dot meta-commands and does not go through clap.

use clap::{value_parser, Arg, ArgAction, Command};

/// Default judgment file for `eval`
pub const DEFAULT_JUDGMENTS_PATH: &str = "data/evaluation_judgments.csv";

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("trialsearch")
        .about("Ranked search over clinical-trial records")
        .subcommand_required(false)
        .arg(
            Arg::new("data")
                .long("data")
                .help("Collection CSV (default: data_path from config)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./trialsearch.toml)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (record ids only)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_search())
        .subcommand(build_fetch())
        .subcommand(build_eval())
        .subcommand(build_init_config())
}

fn build_search() -> Command {
    Command::new("search")
        .about("Rank the collection against a query")
        .arg(
            Arg::new("query")
                .required(true)
                .num_args(1..)
                .help("Query text; multiple words are joined with spaces"),
        )
        .arg(
            Arg::new("top-k")
                .long("top-k")
                .short('k')
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Maximum results; 0 or less returns none (default: top_k from config)"),
        )
        .arg(
            Arg::new("no-filters")
                .long("no-filters")
                .action(ArgAction::SetTrue)
                .help("Disable phase/status/location boosts"),
        )
}

fn build_fetch() -> Command {
    Command::new("fetch")
        .about("Download studies from ClinicalTrials.gov into the collection CSV")
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(usize))
                .help("Studies to request (default: fetch.page_size from config)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Destination CSV (default: the collection path)"),
        )
}

fn build_eval() -> Command {
    Command::new("eval")
        .about("Relevance evaluation: Baseline (no boosts) vs System (boosts)")
        .subcommand_required(true)
        .subcommand(
            Command::new("template")
                .about("Write a judgment template for the fixed query set")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Template path (default: data/evaluation_judgments.csv)"),
                ),
        )
        .subcommand(
            Command::new("metrics")
                .about("Compute mean P@5 and nDCG@5 from a labelled judgment file")
                .arg(
                    Arg::new("judgments")
                        .long("judgments")
                        .help("Judgment path (default: data/evaluation_judgments.csv)"),
                ),
        )
}

fn build_init_config() -> Command {
    Command::new("init-config").about("Write a default trialsearch.toml if none exists")
}
