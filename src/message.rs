use crate::error::OperatorError;
use crate::model::SeriesTable;
use std::path::PathBuf;
use std::str::FromStr;

/// Commands accepted at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Ignore,
    Alias,
    Group,
    Ungroup,
    Undo,
    Redo,
    Convert,
    ForceConvert,
    Path,
    Help,
    Quit,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Ignore,
        Operator::Alias,
        Operator::Group,
        Operator::Ungroup,
        Operator::Undo,
        Operator::Redo,
        Operator::Convert,
        Operator::ForceConvert,
        Operator::Path,
        Operator::Help,
        Operator::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operator::Ignore => "ignore",
            Operator::Alias => "alias",
            Operator::Group => "group",
            Operator::Ungroup => "ungroup",
            Operator::Undo => "undo",
            Operator::Redo => "redo",
            Operator::Convert => "convert",
            Operator::ForceConvert => "force",
            Operator::Path => "path",
            Operator::Help => "help",
            Operator::Quit => "quit",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Operator::Ignore => "i <numbers>            hide series from the table and from conversion",
            Operator::Alias => "a <number> <alias>     convert a series under another name",
            Operator::Group => "g <numbers> <name>     move series into a named group",
            Operator::Ungroup => "ungroup <numbers>      move series back to the ungrouped list",
            Operator::Undo => "u                      undo the latest change",
            Operator::Redo => "r                      redo the latest undo, until the next change",
            Operator::Convert => "c [destination]        convert every visible series",
            Operator::ForceConvert => "f [destination]        convert, overwriting existing output",
            Operator::Path => "p <directory>          read a new directory, dropping the current table",
            Operator::Help => "h                      show this help",
            Operator::Quit => "q                      quit",
        }
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        let operator = match word {
            "i" | "ignore" => Operator::Ignore,
            "a" | "alias" => Operator::Alias,
            "g" | "group" => Operator::Group,
            "ungroup" => Operator::Ungroup,
            "u" | "undo" => Operator::Undo,
            "r" | "redo" => Operator::Redo,
            "c" | "convert" => Operator::Convert,
            "f" | "force" => Operator::ForceConvert,
            "p" | "path" => Operator::Path,
            "h" | "help" => Operator::Help,
            "q" | "quit" => Operator::Quit,
            _ => return Err(OperatorError::Unknown(word.to_string())),
        };
        Ok(operator)
    }
}

/// What the session should do after an operator ran.
#[derive(Debug)]
pub enum Outcome {
    Table(SeriesTable),
    Convert {
        destination: Option<PathBuf>,
        overwrite: bool,
    },
    ChangePath(PathBuf),
    Help,
    Halt,
}
