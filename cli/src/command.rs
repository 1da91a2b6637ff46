//! Parsing of REPL input lines.

use letterform_core::FormationSession;

/// Confidence used when a line carries only a letter.
pub const DEFAULT_CONFIDENCE: f32 = 1.0;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A recognized letter with its confidence
    Letter { letter: String, confidence: f32 },
    Confirm,
    Undo,
    Clear,
    Reset,
    Acknowledge,
    /// Print the current state without changing it
    Show,
}

impl Command {
    /// Parse a trimmed, non-empty input line.
    ///
    /// Lines starting with `:` are commands. Anything else is a letter label,
    /// optionally followed by a confidence (`c 0.92`).
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(cmd) = line.strip_prefix(':') {
            return match cmd {
                "confirm" | "c" => Ok(Command::Confirm),
                "undo" | "u" => Ok(Command::Undo),
                "clear" => Ok(Command::Clear),
                "reset" | "r" => Ok(Command::Reset),
                "ack" | "a" => Ok(Command::Acknowledge),
                "state" | "s" => Ok(Command::Show),
                other => Err(format!("unknown command ':{}'", other)),
            };
        }

        let mut parts = line.split_whitespace();
        let letter = parts
            .next()
            .ok_or_else(|| "empty input".to_string())?
            .to_string();
        let confidence = match parts.next() {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|e| format!("bad confidence '{}': {}", raw, e))?,
            None => DEFAULT_CONFIDENCE,
        };
        if let Some(extra) = parts.next() {
            return Err(format!("unexpected trailing input '{}'", extra));
        }
        Ok(Command::Letter { letter, confidence })
    }

    /// Apply the command to a session. Returns a short note for the user,
    /// if the command has something to report.
    pub fn apply(&self, session: &mut FormationSession) -> Option<String> {
        match self {
            Command::Letter { letter, confidence } => {
                if session.add_letter(letter, *confidence) {
                    None
                } else {
                    Some(format!("ignored '{}'", letter))
                }
            }
            Command::Confirm => match session.confirm_word() {
                Some(word) => Some(format!("confirmed {}", word)),
                None => Some("nothing to confirm".to_string()),
            },
            Command::Undo => match session.remove_last() {
                Some(p) => Some(format!("removed {}", p.letter)),
                None => Some("buffer already empty".to_string()),
            },
            Command::Clear => {
                session.clear_buffer();
                None
            }
            Command::Reset => {
                session.reset_session();
                None
            }
            Command::Acknowledge => {
                session.acknowledge_formed_word();
                None
            }
            Command::Show => None,
        }
    }
}
