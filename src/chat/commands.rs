//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to inspect the session without sending messages to the
//! webhook.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Print the whole conversation again.
    History,

    /// Print the session token.
    Session,

    /// Show the current motivational quote.
    Quote,

    /// Save the transcript to a specific file immediately.
    SaveTranscript(String),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Display session statistics.
    Stats,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be sent as a regular message.
///
/// # Examples
///
/// ```
/// # use animo::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/save chat.json").is_some());
/// assert!(parse_command("Hoy me siento genial").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "history" | "log" => ChatCommand::History,
        "session" => ChatCommand::Session,
        "quote" => ChatCommand::Quote,
        "save" => match argument {
            Some(arg) => ChatCommand::SaveTranscript(arg.to_string()),
            None => ChatCommand::Invalid("/save requires a file path".to_string()),
        },
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "stats" | "status" => ChatCommand::Stats,
        "" => ChatCommand::Invalid("empty command; type /help for a list".to_string()),
        other => ChatCommand::Invalid(format!("unknown command /{other}; type /help for a list")),
    };

    Some(result)
}

/// Splits off a trailing line-continuation backslash.
///
/// Returns the line without the backslash when the user asked to keep
/// typing on the next line, or `None` when the line completes the draft.
pub fn continued_line(line: &str) -> Option<&str> {
    line.strip_suffix('\\')
}

/// Returns the help text for available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /help, /?              Show this help message
  /history               Print the conversation so far
  /session               Show the session token sent to the webhook
  /stats                 Show session statistics
  /quote                 Show the current motivational quote
  /save <path>           Save the transcript as JSON
  /quit, /exit, /q       Exit the chat

End a line with \ to continue the message on the next line."#
}
