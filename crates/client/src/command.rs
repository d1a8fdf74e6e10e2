//! Parsing of the commands typed at the client prompt.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    /// Replace the start value input text.
    SetStart(String),
    /// Replace the rate input text.
    SetRate(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("Usage: set start <value> | set rate <value>")]
    SetUsage,
}

/// Help text printed for `help`.
pub const HELP: &str = "commands: start | pause | resume | reset | set start <v> | set rate <v> | show | quit";

impl Command {
    /// Parse a line of input. Blank lines yield `Ok(None)`.
    ///
    /// `set` keeps the value text as typed; an omitted value clears the input.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "reset" => Self::Reset,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "set" => {
                let target = words.next();
                let value = words.next().unwrap_or_default().to_string();
                if words.next().is_some() {
                    return Err(CommandError::SetUsage);
                }
                match target {
                    Some("start") => Self::SetStart(value),
                    Some("rate") => Self::SetRate(value),
                    _ => return Err(CommandError::SetUsage),
                }
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse("start"), Ok(Some(Command::Start)));
        assert_eq!(Command::parse("  Pause "), Ok(Some(Command::Pause)));
        assert_eq!(Command::parse("resume"), Ok(Some(Command::Resume)));
        assert_eq!(Command::parse("reset"), Ok(Some(Command::Reset)));
        assert_eq!(Command::parse("show"), Ok(Some(Command::Show)));
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn set_keeps_value_text() {
        assert_eq!(
            Command::parse("set start 12.50"),
            Ok(Some(Command::SetStart("12.50".into())))
        );
        assert_eq!(
            Command::parse("set rate"),
            Ok(Some(Command::SetRate(String::new())))
        );
    }

    #[test]
    fn malformed_set_is_rejected() {
        assert_matches!(Command::parse("set speed 3"), Err(CommandError::SetUsage));
        assert_matches!(Command::parse("set rate 1 2"), Err(CommandError::SetUsage));
        assert_matches!(Command::parse("set"), Err(CommandError::SetUsage));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_matches!(Command::parse("stop"), Err(CommandError::Unknown(c)) if c == "stop");
    }
}
