//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Reset the conversation, discarding the message log.
    Reset,

    /// Reset onto a different model.
    Model(String),

    /// Reset onto a different temperature.
    Temperature(f32),

    /// Display session statistics.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use geminius::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/model gemini-2.5-pro").is_some());
/// assert!(parse_command("Hello!").is_none());
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
        "reset" | "clear" => ChatCommand::Reset,
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "temperature" | "temp" => match argument.map(str::parse::<f32>) {
            Some(Ok(value)) if value.is_finite() => ChatCommand::Temperature(value),
            Some(_) => {
                ChatCommand::Invalid("/temperature requires a finite number".to_string())
            }
            None => ChatCommand::Invalid("/temperature requires a value".to_string()),
        },
        "stats" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!(
            "Unknown command: /{command} (type /help for commands)"
        )),
    };

    Some(result)
}

/// Returns the help text listing available commands.
pub fn help_text() -> &'static str {
    "Available commands:
  /reset              Discard the conversation and start over
  /model <name>       Start a new conversation with a different model
  /temperature <t>    Start a new conversation with a different temperature
  /stats              Show session statistics
  /help               Show this help
  /quit               Exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_messages_are_not_commands() {
        assert!(parse_command("Hello, Gemini!").is_none());
        assert!(parse_command("what does /reset do?").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn parse_reset() {
        assert_eq!(parse_command("/reset"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Reset));
    }

    #[test]
    fn parse_model() {
        assert_eq!(
            parse_command("/model gemini-2.5-pro"),
            Some(ChatCommand::Model("gemini-2.5-pro".to_string()))
        );
        assert!(matches!(
            parse_command("/model"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_temperature() {
        assert_eq!(
            parse_command("/temperature 0.2"),
            Some(ChatCommand::Temperature(0.2))
        );
        assert_eq!(
            parse_command("/temp 1.0"),
            Some(ChatCommand::Temperature(1.0))
        );
        assert!(matches!(
            parse_command("/temperature warm"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(
            parse_command("/temperature"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_quit_aliases() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_command("/QUIT"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/Reset"), Some(ChatCommand::Reset));
    }
}
