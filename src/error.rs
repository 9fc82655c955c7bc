use std::path::PathBuf;

use thiserror::Error;

use crate::model::SeriesNumber;

#[derive(Debug, Error)]
#[error("{}: not a DICOM file ({reason})", path.display())]
pub struct NotDicomError {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum GroupingError {
    #[error("key {0} in subset is not present in the records")]
    KeyNotFound(String),
    #[error("record {key} has no attribute {attribute}")]
    MissingAttribute { key: String, attribute: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no statement was given")]
    EmptyStatement,
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("can only range integers, got {0:?}")]
    NotAnInteger(String),
    #[error("cannot use a solitary colon")]
    SolitaryColon,
    #[error("hanging colon in {0:?}")]
    HangingColon(String),
    #[error("cannot range non-positive numbers in {0:?}")]
    NonPositiveBound(String),
    #[error("cannot have step size 0")]
    ZeroStep,
    #[error("too many numbers for one word: {0:?}")]
    TooManyNumbers(String),
    #[error("can only have one grouping")]
    MultipleGroups,
    #[error("unmatched bracket")]
    UnmatchedBracket,
    #[error("brackets should begin groups")]
    BracketNotLeading,
    #[error("empty group")]
    EmptyGroup,
    #[error("unexpected text {0:?} after closing bracket")]
    TrailingAfterBracket(String),
    #[error("range {0:?} covers too many series")]
    RangeTooLarge(String),
    #[error("cannot form an argument from multiple words")]
    MultipleWords,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("directory supplied ({}) does not exist", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("series {number} has multiple names: {names:?}")]
    NonUniqueName {
        number: SeriesNumber,
        names: Vec<String>,
    },
    #[error("series {0} not in table")]
    SeriesNotFound(SeriesNumber),
    #[error("alias indices are not paired with aliases")]
    UnpairedAlias,
    #[error("{0:?} cannot be converted to a series number")]
    InvalidSeriesNumber(String),
    #[error("group name must not be empty")]
    EmptyGroupName,
    #[error(transparent)]
    Grouping(#[from] GroupingError),
}

#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("operator {0:?} does not exist")]
    Unknown(String),
    #[error("{operator} {reason}")]
    InvalidArguments {
        operator: &'static str,
        reason: &'static str,
    },
    #[error("no changes to undo")]
    NothingToUndo,
    #[error("no changes to redo")]
    NothingToRedo,
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}:\n{output}")]
    Failed {
        program: String,
        status: String,
        output: String,
    },
    #[error("{program} did not finish within {seconds}s")]
    TimedOut { program: String, seconds: u64 },
    #[error("file {} would be overwritten", .0.display())]
    WouldOverwrite(PathBuf),
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Operator(#[from] OperatorError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
