use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::History;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::form::COMMANDS;

/// Completion, highlighting and hints for the slash commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> {
        self.commands.iter().filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = self
                .matching(line)
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: format!("{cmd} "),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.matching(line)
                .find(|cmd| cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Adds a submitted line to the history. A failure is logged and ignored.
pub fn record_history<I: History>(history: &mut I, line: &str) -> bool {
    match history.add(line) {
        Ok(added) => added,
        Err(err) => {
            tracing::debug!("Failed to record history entry: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    #[test]
    fn test_matching_commands() {
        let helper = CliHelper::new();
        let matches: Vec<_> = helper.matching("/s").cloned().collect();
        assert_eq!(matches, vec!["/save".to_string(), "/show".to_string()]);
        assert_eq!(helper.matching("/re").count(), 1);
        assert_eq!(helper.matching("/x").count(), 0);
    }

    #[test]
    fn test_record_history_skips_consecutive_duplicates() {
        let mut history = DefaultHistory::new();

        assert!(record_history(&mut history, "/show"));
        assert!(record_history(&mut history, "/save 1"));
        assert!(!record_history(&mut history, "/save 1"));
        assert_eq!(history.len(), 2);
    }
}
