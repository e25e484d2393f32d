//! Parsing of terminal input lines.

use super::error::ClientError;

/// What a line typed by the user asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// `/kick <name>`
    Kick(String),
    /// `/quit`
    Quit,
    /// Anything else is chat text.
    Text(String),
}

impl InputCommand {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let trimmed = line.trim();
        if trimmed == "/quit" {
            return Ok(InputCommand::Quit);
        }
        if let Some(rest) = trimmed.strip_prefix("/kick") {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let target = rest.trim();
                if target.is_empty() {
                    return Err(ClientError::InvalidCommand(
                        "usage: /kick <name>".to_string(),
                    ));
                }
                return Ok(InputCommand::Kick(target.to_string()));
            }
        }
        Ok(InputCommand::Text(line.to_string()))
    }
}
