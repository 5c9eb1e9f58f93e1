//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so the input grammar and the
//! reconnection policy stay easy to test.

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain chat message text
    Message(String),
    /// `/image <data>`: send the payload as a chat image
    Image(String),
    /// `/quit`: end the session
    Quit,
}

/// Parse a line of user input into a command.
///
/// Lines starting with `/image ` carry an image payload, `/quit` ends the
/// session, and everything else is sent verbatim as a chat message.
pub fn parse_input(line: &str) -> InputCommand {
    if line == "/quit" {
        return InputCommand::Quit;
    }
    if let Some(data) = line.strip_prefix("/image ") {
        return InputCommand::Image(data.to_string());
    }
    InputCommand::Message(line.to_string())
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
