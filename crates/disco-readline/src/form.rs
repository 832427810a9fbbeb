//! Plain-text form view and REPL command parsing.

use disco_core::question::QuestionSet;
use disco_core::session::DiscoverySession;

pub const COMMANDS: [&str; 8] = [
    "/context", "/answer", "/save", "/show", "/questions", "/reset", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/context <text>`; `None` just shows the current value
    Context(Option<String>),
    /// `/answer <n>`, 1-based
    Answer(usize),
    /// `/save <n>`, 1-based
    Save(usize),
    Show,
    Questions,
    Reset,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one input line. Returns `None` for blank lines.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match head {
        "quit" | "exit" | "/quit" | "/exit" => Command::Quit,
        "/context" if rest.is_empty() => Command::Context(None),
        "/context" => Command::Context(Some(rest.to_string())),
        "/answer" => parse_number(rest)
            .map(Command::Answer)
            .unwrap_or_else(|| Command::Invalid("Usage: /answer <question number>".to_string())),
        "/save" => parse_number(rest)
            .map(Command::Save)
            .unwrap_or_else(|| Command::Invalid("Usage: /save <question number>".to_string())),
        "/show" => Command::Show,
        "/questions" => Command::Questions,
        "/reset" => Command::Reset,
        "/help" => Command::Help,
        other => Command::Invalid(format!("Unknown command: {other}. Type /help.")),
    };

    Some(command)
}

fn parse_number(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Joins the lines typed for a multi-line answer.
pub fn join_answer_lines(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn render_form(session: &DiscoverySession, questions: &QuestionSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("Session ID: {}\n", session.id()));

    let context = if session.context().is_empty() {
        "(not set)"
    } else {
        session.context()
    };
    out.push_str(&format!(
        "Discovery Context (Project / Client / Team): {context}\n"
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');

    for (index, question) in questions.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", index + 1, question));
        let response = session.response(question);
        if response.is_empty() {
            out.push_str("    Stakeholder Response: (empty)\n");
        } else {
            out.push_str("    Stakeholder Response:\n");
            for line in response.lines() {
                out.push_str(&format!("      {line}\n"));
            }
        }
    }

    out
}

pub fn render_questions(questions: &QuestionSet) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| format!("[{}] {}", index + 1, question))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn help_text() -> &'static str {
    "\
/context <text>   Set the discovery context (project / client / team)
/answer <n>       Type the stakeholder response for question n (end with an empty line)
/save <n>         Analyse and save the answer for question n
/show             Show the whole form
/questions        List the questions
/reset            Start a new discovery session
/help             Show this help
quit              Exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("/exit"), Some(Command::Quit));
        assert_eq!(
            parse_command("/context  Loan Onboarding "),
            Some(Command::Context(Some("Loan Onboarding".to_string())))
        );
        assert_eq!(parse_command("/context"), Some(Command::Context(None)));
        assert_eq!(parse_command("/answer 2"), Some(Command::Answer(2)));
        assert_eq!(parse_command("/save 5"), Some(Command::Save(5)));
        assert_eq!(parse_command("/reset"), Some(Command::Reset));
    }

    #[test]
    fn test_parse_invalid_numbers() {
        assert!(matches!(parse_command("/save"), Some(Command::Invalid(_))));
        assert!(matches!(parse_command("/save 0"), Some(Command::Invalid(_))));
        assert!(matches!(parse_command("/answer two"), Some(Command::Invalid(_))));
        assert!(matches!(parse_command("/plan"), Some(Command::Invalid(_))));
    }

    #[test]
    fn test_join_answer_lines() {
        let lines = vec!["Manual PDF review".to_string(), "takes 3 days".to_string()];
        assert_eq!(join_answer_lines(&lines), "Manual PDF review\ntakes 3 days");
        assert_eq!(join_answer_lines(&[]), "");
    }

    #[test]
    fn test_render_form() {
        let questions = QuestionSet::default();
        let mut session = DiscoverySession::with_id("abc-123");
        session.set_context("Loan Onboarding");
        session.set_response(
            "What problem are you trying to solve?",
            "Manual PDF review\ntakes 3 days",
        );

        let form = render_form(&session, &questions);

        assert!(form.starts_with("Session ID: abc-123\n"));
        assert!(form.contains("Discovery Context (Project / Client / Team): Loan Onboarding"));
        assert!(form.contains("[1] What problem are you trying to solve?\n    Stakeholder Response:\n      Manual PDF review\n      takes 3 days\n"));
        assert!(form.contains("[5] What does success look like?\n    Stakeholder Response: (empty)"));
    }

    #[test]
    fn test_render_form_after_reset() {
        let questions = QuestionSet::default();
        let mut session = DiscoverySession::new();
        session.set_response("Who is affected by this problem?", "Loan officers");
        session.reset();

        let form = render_form(&session, &questions);
        assert!(!form.contains("Loan officers"));
        assert!(form.contains("Discovery Context (Project / Client / Team): (not set)"));
    }

    #[test]
    fn test_render_questions() {
        let questions = QuestionSet::new(vec!["A?".to_string(), "B?".to_string()]).unwrap();
        assert_eq!(render_questions(&questions), "[1] A?\n[2] B?");
    }
}
