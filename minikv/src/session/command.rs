use thiserror::Error;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid command. Use SET <key> <value>, GET <key>, or EXIT.")]
    Invalid,
}

impl Command {
    /// Parse one input line.
    ///
    /// Whitespace-only lines parse to `None` and are ignored. Command
    /// words are case-sensitive, matching the on-disk record marker. The
    /// value of a SET is the remainder of the line, internal whitespace
    /// preserved.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = split_token(line);
        match word {
            "GET" => {
                let (key, rest) = split_token(rest);
                if key.is_empty() || !rest.trim().is_empty() {
                    return Err(CommandError::Invalid);
                }
                Ok(Some(Command::Get {
                    key: key.to_string(),
                }))
            }
            "SET" => {
                let (key, rest) = split_token(rest);
                let value = rest.trim_start();
                if key.is_empty() || value.is_empty() {
                    return Err(CommandError::Invalid);
                }
                Ok(Some(Command::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }))
            }
            "EXIT" => Ok(Some(Command::Exit)),
            _ => Err(CommandError::Invalid),
        }
    }
}

/// Split off the next whitespace-delimited token, returning it and the
/// unconsumed tail
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}
