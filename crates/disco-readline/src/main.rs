mod bootstrap;
mod form;
mod helper;

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use disco_application::{SessionHandle, StatusLevel, StatusMessage};
use disco_infrastructure::DiscoPaths;

use crate::bootstrap::{AppBootstrap, init_tracing};
use crate::form::{Command, help_text, join_answer_lines, parse_command, render_form, render_questions};
use crate::helper::{CliHelper, record_history};

/// A terminal is a single client of the session registry.
const CLIENT_KEY: &str = "terminal";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let paths = DiscoPaths::from_env();
    let _log_guard = init_tracing(&paths)?;

    let app = AppBootstrap::init(&paths).await.inspect_err(|e| {
        tracing::error!("Startup failed: {e:#}");
    })?;
    let handle = app.registry.resume(CLIENT_KEY).await;

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== BA Discovery Bot ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Saving to '{}' / '{}'", app.workbook, app.worksheet).bright_black()
    );
    println!("{}", "Type '/help' for commands or 'quit' to exit.".bright_black());
    println!();
    print_form(&app, &handle).await;

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let Some(command) = parse_command(&line) else {
            continue;
        };
        record_history(rl.history_mut(), line.trim());

        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => println!("{}", help_text().bright_black()),
            Command::Show => print_form(&app, &handle).await,
            Command::Questions => println!("{}", render_questions(app.controller.questions())),
            Command::Context(None) => {
                let session = handle.read().await;
                if session.context().is_empty() {
                    println!("{}", "No discovery context set.".bright_black());
                } else {
                    println!("Discovery Context: {}", session.context());
                }
            }
            Command::Context(Some(text)) => {
                handle.write().await.set_context(text);
                println!("{}", "Discovery context updated.".green());
            }
            Command::Answer(number) => {
                let Some(question) = question_at(&app, number) else {
                    continue;
                };
                println!("{}", format!("[{number}] {question}").bright_cyan());
                println!(
                    "{}",
                    "Type the stakeholder response. Finish with an empty line.".bright_black()
                );
                match read_answer(&mut rl) {
                    Ok(Some(answer)) => {
                        handle.write().await.set_response(question.clone(), answer);
                        println!(
                            "{}",
                            format!("Response recorded. Use /save {number} to analyse and save.")
                                .green()
                        );
                    }
                    Ok(None) => println!("{}", "Answer discarded.".yellow()),
                    Err(err) => {
                        eprintln!("{}", format!("Error: {err:?}").red());
                        break;
                    }
                }
            }
            Command::Save(number) => {
                let Some(question) = question_at(&app, number) else {
                    continue;
                };
                println!("{}", "Analysing response...".bright_black());
                let outcome = {
                    let session = handle.read().await;
                    app.controller.submit(&session, &question).await
                };
                print_status(&StatusMessage::from_outcome(&outcome));
                if let Ok(row) = &outcome {
                    for line in row.analysis.lines() {
                        println!("{}", line.bright_blue());
                    }
                }
            }
            Command::Reset => {
                let session_id = app.registry.reset(CLIENT_KEY).await;
                println!("{}", format!("New session started: {session_id}").green());
                print_form(&app, &handle).await;
            }
            Command::Invalid(message) => println!("{}", message.yellow()),
        }
    }

    Ok(())
}

fn question_at(app: &AppBootstrap, number: usize) -> Option<String> {
    let questions = app.controller.questions();
    let question = number
        .checked_sub(1)
        .and_then(|index| questions.get(index))
        .map(str::to_string);
    if question.is_none() {
        println!(
            "{}",
            format!("No question {number}. Pick 1 to {}.", questions.len()).yellow()
        );
    }
    question
}

/// Reads lines until an empty one. CTRL-C discards the answer, CTRL-D ends it.
fn read_answer(rl: &mut Editor<CliHelper, DefaultHistory>) -> rustyline::Result<Option<String>> {
    let mut lines = Vec::new();
    loop {
        match rl.readline("... ") {
            Ok(line) if line.is_empty() => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) => return Ok(None),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(Some(join_answer_lines(&lines)))
}

async fn print_form(app: &AppBootstrap, handle: &SessionHandle) {
    let session = handle.read().await;
    print!("{}", render_form(&session, app.controller.questions()));
}

fn print_status(status: &StatusMessage) {
    match status.level {
        StatusLevel::Success => println!("{}", status.text.bright_green()),
        StatusLevel::Invalid => println!("{}", status.text.yellow()),
        StatusLevel::Error => eprintln!("{}", status.text.red()),
    }

    if let Some(analysis) = &status.unsaved_analysis {
        println!("{}", "Analysis (not saved):".yellow());
        for line in analysis.lines() {
            println!("{}", line.bright_blue());
        }
    }
}
