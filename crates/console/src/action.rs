//! Parsing of console input lines into actions.

use thiserror::Error;

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add { name: String, quantity: i64 },
    Remove { name: String, quantity: i64 },
    SetTarget { name: String, level: i64 },
    List,
    Shortages,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
Commands:
  add <name> <qty>       add stock (introduces the item if new)
  remove <name> <qty>    take stock out
  target <name> <qty>    set the desired stock level for an item
  list                   show current stock
  shortages              show items below their target
  reset                  restore the starting stock and targets
  help                   show this text
  quit                   leave
Names may contain spaces; the quantity is always the last word.
";

/// Parse one line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Action>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match verb.to_lowercase().as_str() {
        "add" => {
            let (name, quantity) = name_and_number(rest, "add <name> <qty>")?;
            Action::Add { name, quantity }
        }
        "remove" | "rm" => {
            let (name, quantity) = name_and_number(rest, "remove <name> <qty>")?;
            Action::Remove { name, quantity }
        }
        "target" => {
            let (name, level) = name_and_number(rest, "target <name> <qty>")?;
            Action::SetTarget { name, level }
        }
        "list" | "ls" => Action::List,
        "shortages" => Action::Shortages,
        "reset" => Action::Reset,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(action))
}

/// Split `"<name with spaces> <number>"`. The ledger trims and validates the name.
fn name_and_number(rest: &str, usage: &'static str) -> Result<(String, i64), ParseError> {
    let Some((name, number)) = rest.rsplit_once(char::is_whitespace) else {
        return Err(ParseError::Usage(usage));
    };
    let number = number
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber(number.to_string()))?;
    Ok((name.to_string(), number))
}
