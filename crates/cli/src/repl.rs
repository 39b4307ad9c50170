//! REPL loop with rustyline.
//!
//! Interactive mode: every line is a query; lines starting with `.` are
//! meta-commands. History is kept in `~/.trialsearch_history`.
//! Pipe mode: read queries from stdin, one per line.

use std::io::{self, BufRead};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use crate::format::{format_error, format_message, format_results, OutputMode};
use crate::parse::{check_meta_command, MetaCommand};
use crate::state::SessionState;

const META_COMMANDS: &[&str] = &[".quit", ".exit", ".help", ".filters", ".top", ".reload"];

/// Run the interactive REPL. Returns the process exit code.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) -> i32 {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<MetaHelper, _> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return 1;
        }
    };
    rl.set_helper(Some(MetaHelper));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    println!(
        "{} records loaded from {}. Type .help for commands.",
        state.record_count(),
        state.data_path().display()
    );

    loop {
        let prompt = state.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                if let Some(meta) = check_meta_command(trimmed) {
                    if !run_meta(meta, state, mode) {
                        break;
                    }
                    continue;
                }

                println!("{}", format_results(&state.search(trimmed), mode));
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C, new prompt
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format_error(&err, mode));
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
    0
}

/// Run in pipe mode: each non-empty stdin line is a query.
///
/// Lines starting with `#` are skipped. Meta-commands are honored so
/// scripts can switch settings between queries.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                return 1;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(meta) = check_meta_command(trimmed) {
            if !run_meta(meta, state, mode) {
                break;
            }
            continue;
        }

        println!("{}", format_results(&state.search(trimmed), mode));
    }

    0
}

/// Apply a meta-command. Returns false when the session should end.
fn run_meta(meta: MetaCommand, state: &mut SessionState, mode: OutputMode) -> bool {
    match meta {
        MetaCommand::Quit => return false,
        MetaCommand::Help => print_help(state),
        MetaCommand::Filters(on) => {
            state.set_filters(on);
            let msg = format!("boosts {}", if on { "on" } else { "off" });
            println!("{}", format_message(&msg, mode));
        }
        MetaCommand::Top(k) => {
            state.set_top_k(k);
            println!("{}", format_message(&format!("top_k = {}", k), mode));
        }
        MetaCommand::Reload => match state.reload() {
            Ok(count) => {
                let msg = format!("reloaded {} records", count);
                println!("{}", format_message(&msg, mode));
            }
            Err(e) => eprintln!("{}", format_error(&e, mode)),
        },
        MetaCommand::Invalid(usage) => eprintln!("{}", format_error(&usage, mode)),
    }
    true
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.trialsearch_history", h))
}

fn print_help(state: &SessionState) {
    println!("Type a query to search, e.g. 'lung cancer phase 2 recruiting in boston'.");
    println!();
    println!("Meta-commands:");
    println!(
        "  .filters on|off   toggle phase/status/location boosts (now: {})",
        if state.filters() { "on" } else { "off" }
    );
    println!("  .top <n>          results per query (now: {})", state.top_k());
    println!(
        "  .reload           rebuild the index from {}",
        state.data_path().display()
    );
    println!("  .help             show this message");
    println!("  .quit             exit (also Ctrl-D)");
}

// =========================================================================
// Rustyline helper: completes meta-command names
// =========================================================================

struct MetaHelper;

impl Helper for MetaHelper {}
impl Validator for MetaHelper {}
impl Highlighter for MetaHelper {}
impl Hinter for MetaHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for MetaHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, meta_candidates(&line[..pos])))
    }
}

fn meta_candidates(prefix: &str) -> Vec<Pair> {
    if !prefix.starts_with('.') || prefix.contains(char::is_whitespace) {
        return Vec::new();
    }
    META_COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(prefix))
        .map(|cmd| Pair {
            display: cmd.to_string(),
            replacement: format!("{} ", cmd),
        })
        .collect()
}
