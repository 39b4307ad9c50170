//! ArgMatches → CliAction conversion, and REPL meta-commands.
//!
//! Translates clap's parsed arguments into the action to run:
//! - `search` → `CliAction::Search`
//! - `fetch` → `CliAction::Fetch`
//! - `eval template|metrics` → `CliAction::EvalTemplate` / `EvalMetrics`
//! - `init-config` → `CliAction::InitConfig`

use clap::ArgMatches;
use std::path::PathBuf;

/// The result of parsing a shell-mode invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Rank the collection.
    Search {
        query: String,
        /// `None` means the configured default.
        k: Option<usize>,
        use_filters: bool,
    },
    /// Refresh the collection from the registry.
    Fetch {
        limit: Option<usize>,
        output: Option<PathBuf>,
    },
    /// Write a judgment template.
    EvalTemplate { output: Option<PathBuf> },
    /// Compute evaluation metrics.
    EvalMetrics { judgments: Option<PathBuf> },
    /// Write the default config file.
    InitConfig,
}

/// REPL-only commands, written with a leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Quit,
    Help,
    Filters(bool),
    Top(usize),
    Reload,
    /// Unknown or malformed meta-command; carries the usage hint.
    Invalid(String),
}

/// Clamp a signed result count to a usable one; `k <= 0` means none.
pub fn clamp_top_k(k: i64) -> usize {
    usize::try_from(k).unwrap_or(0)
}

/// Convert shell-mode matches into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    match matches.subcommand() {
        Some(("search", sub)) => {
            let query = sub
                .get_many::<String>("query")
                .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
                .ok_or("search requires a query")?;
            Ok(CliAction::Search {
                query,
                k: sub.get_one::<i64>("top-k").map(|k| clamp_top_k(*k)),
                use_filters: !sub.get_flag("no-filters"),
            })
        }
        Some(("fetch", sub)) => Ok(CliAction::Fetch {
            limit: sub.get_one::<usize>("limit").copied(),
            output: sub.get_one::<String>("output").map(PathBuf::from),
        }),
        Some(("eval", sub)) => match sub.subcommand() {
            Some(("template", args)) => Ok(CliAction::EvalTemplate {
                output: args.get_one::<String>("output").map(PathBuf::from),
            }),
            Some(("metrics", args)) => Ok(CliAction::EvalMetrics {
                judgments: args.get_one::<String>("judgments").map(PathBuf::from),
            }),
            _ => Err("eval requires 'template' or 'metrics'".to_string()),
        },
        Some(("init-config", _)) => Ok(CliAction::InitConfig),
        Some((other, _)) => Err(format!("unknown command '{}'", other)),
        None => Err("no command given".to_string()),
    }
}

/// Check for a REPL meta-command.
///
/// Returns `None` for ordinary query lines.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let trimmed = line.trim();
    if !trimmed.starts_with('.') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next()?;
    let arg = parts.next();

    let meta = match (cmd, arg) {
        (".quit" | ".exit", _) => MetaCommand::Quit,
        (".help", _) => MetaCommand::Help,
        (".reload", _) => MetaCommand::Reload,
        (".filters", Some("on")) => MetaCommand::Filters(true),
        (".filters", Some("off")) => MetaCommand::Filters(false),
        (".filters", _) => MetaCommand::Invalid("usage: .filters on|off".to_string()),
        (".top", Some(n)) => match n.parse::<i64>() {
            Ok(k) => MetaCommand::Top(clamp_top_k(k)),
            Err(_) => MetaCommand::Invalid("usage: .top <n>".to_string()),
        },
        (".top", None) => MetaCommand::Invalid("usage: .top <n>".to_string()),
        (other, _) => MetaCommand::Invalid(format!("unknown meta-command '{}' (try .help)", other)),
    };
    Some(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;

    fn action(args: &[&str]) -> CliAction {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        matches_to_action(&matches).unwrap()
    }

    #[test]
    fn test_search_action() {
        assert_eq!(
            action(&["trialsearch", "search", "lung", "cancer", "phase", "1", "-k", "3"]),
            CliAction::Search {
                query: "lung cancer phase 1".to_string(),
                k: Some(3),
                use_filters: true,
            }
        );
    }

    #[test]
    fn test_search_negative_k_clamps_to_zero() {
        match action(&["trialsearch", "search", "asthma", "--top-k", "-5", "--no-filters"]) {
            CliAction::Search { k, use_filters, .. } => {
                assert_eq!(k, Some(0));
                assert!(!use_filters);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_eval_actions() {
        assert_eq!(
            action(&["trialsearch", "eval", "metrics", "--judgments", "j.csv"]),
            CliAction::EvalMetrics {
                judgments: Some(PathBuf::from("j.csv"))
            }
        );
        assert_eq!(
            action(&["trialsearch", "eval", "template"]),
            CliAction::EvalTemplate { output: None }
        );
    }

    #[test]
    fn test_fetch_action() {
        assert_eq!(
            action(&["trialsearch", "fetch", "--limit", "25", "-o", "out.csv"]),
            CliAction::Fetch {
                limit: Some(25),
                output: Some(PathBuf::from("out.csv")),
            }
        );
    }

    #[test]
    fn test_no_subcommand_is_error() {
        let matches = build_cli().try_get_matches_from(["trialsearch"]).unwrap();
        assert!(matches_to_action(&matches).is_err());
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(-1), 0);
        assert_eq!(clamp_top_k(0), 0);
        assert_eq!(clamp_top_k(7), 7);
    }

    #[test]
    fn test_meta_commands() {
        assert_eq!(check_meta_command("lung cancer"), None);
        assert_eq!(check_meta_command(".quit"), Some(MetaCommand::Quit));
        assert_eq!(check_meta_command(" .filters off "), Some(MetaCommand::Filters(false)));
        assert_eq!(check_meta_command(".top 20"), Some(MetaCommand::Top(20)));
        assert_eq!(check_meta_command(".top -2"), Some(MetaCommand::Top(0)));
        assert_eq!(check_meta_command(".reload"), Some(MetaCommand::Reload));
        assert!(matches!(check_meta_command(".top x"), Some(MetaCommand::Invalid(_))));
        assert!(matches!(check_meta_command(".filters"), Some(MetaCommand::Invalid(_))));
        assert!(matches!(check_meta_command(".nope"), Some(MetaCommand::Invalid(_))));
    }
}
