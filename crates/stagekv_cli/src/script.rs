//! Script parsing.
//!
//! A script holds one command per line:
//!
//! ```text
//! # comment
//! BEGIN
//! PUT A 5
//! GET A
//! COMMIT
//! ```
//!
//! Command words are case-insensitive. Keys are taken verbatim.

use crate::error::{CliError, CliResult};
use stagekv_core::Value;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET <key>`
    Get(String),
    /// `PUT <key> <value>`
    Put(String, Value),
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `STATUS`
    Status,
}

/// Parses a single line. Blank lines and comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> CliResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let word = parts.next().unwrap_or_default().to_ascii_uppercase();
    let args: Vec<&str> = parts.collect();

    let command = match (word.as_str(), args.as_slice()) {
        ("GET", [key]) => Command::Get((*key).to_string()),
        ("PUT", [key, value]) => {
            let value = value
                .parse::<Value>()
                .map_err(|e| CliError::parse(line_no, format!("invalid value {value:?}: {e}")))?;
            Command::Put((*key).to_string(), value)
        }
        ("BEGIN", []) => Command::Begin,
        ("COMMIT", []) => Command::Commit,
        ("ROLLBACK", []) => Command::Rollback,
        ("STATUS", []) => Command::Status,
        ("GET" | "PUT" | "BEGIN" | "COMMIT" | "ROLLBACK" | "STATUS", _) => {
            return Err(CliError::parse(
                line_no,
                format!("wrong number of arguments for {word}"),
            ));
        }
        _ => return Err(CliError::parse(line_no, format!("unknown command {word:?}"))),
    };

    Ok(Some(command))
}

/// Parses a whole script, returning each command with its line number.
pub fn parse_script(source: &str) -> CliResult<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        if let Some(command) = parse_line(line_no, line)? {
            commands.push((line_no, command));
        }
    }
    Ok(commands)
}
