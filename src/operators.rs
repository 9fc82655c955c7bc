//! Applying a parsed statement to a table.

use std::path::PathBuf;

use crate::error::{Error, OperatorError};
use crate::message::{Operator, Outcome};
use crate::model::{SeriesNumber, SeriesTable};
use crate::parsing::parse_statement;

/// Parses `line` and applies it to `table`.
pub fn process_statement(line: &str, table: &SeriesTable) -> Result<Outcome, Error> {
    let statement = parse_statement(line)?;
    let operator: Operator = statement.operator.parse()?;
    Ok(apply(operator, statement.group, statement.argument, table)?)
}

/// Runs one operator. Group entries are series numbers.
pub fn apply(
    operator: Operator,
    group: Option<Vec<SeriesNumber>>,
    argument: Option<String>,
    table: &SeriesTable,
) -> Result<Outcome, OperatorError> {
    let name = operator.name();
    let outcome = match operator {
        Operator::Ignore => {
            let numbers = require_group(name, group)?;
            forbid_argument(name, &argument)?;
            Outcome::Table(table.ignore(&numbers)?)
        }
        Operator::Alias => {
            let numbers = require_group(name, group)?;
            let alias = require_argument(name, argument)?;
            let [number] = numbers.as_slice() else {
                return Err(invalid(name, "takes exactly one series"));
            };
            Outcome::Table(table.alias_series(&[(*number, alias)])?)
        }
        Operator::Group => {
            let numbers = require_group(name, group)?;
            let group_name = require_argument(name, argument)?;
            Outcome::Table(table.group(&numbers, &group_name)?)
        }
        Operator::Ungroup => {
            let numbers = require_group(name, group)?;
            forbid_argument(name, &argument)?;
            Outcome::Table(table.ungroup(&numbers)?)
        }
        Operator::Undo => {
            forbid_both(name, &group, &argument)?;
            Outcome::Table(table.undo().ok_or(OperatorError::NothingToUndo)?)
        }
        Operator::Redo => {
            forbid_both(name, &group, &argument)?;
            Outcome::Table(table.redo().ok_or(OperatorError::NothingToRedo)?)
        }
        Operator::Convert | Operator::ForceConvert => {
            forbid_group(name, &group)?;
            Outcome::Convert {
                destination: argument.map(PathBuf::from),
                overwrite: operator == Operator::ForceConvert,
            }
        }
        Operator::Path => {
            forbid_group(name, &group)?;
            Outcome::ChangePath(PathBuf::from(require_argument(name, argument)?))
        }
        Operator::Help => {
            forbid_both(name, &group, &argument)?;
            Outcome::Help
        }
        Operator::Quit => halt(group, argument)?,
    };
    Ok(outcome)
}

/// Ends the session. Takes neither a group nor an argument.
pub fn halt(group: Option<Vec<SeriesNumber>>, argument: Option<String>) -> Result<Outcome, OperatorError> {
    forbid_both(Operator::Quit.name(), &group, &argument)?;
    Ok(Outcome::Halt)
}

fn invalid(operator: &'static str, reason: &'static str) -> OperatorError {
    OperatorError::InvalidArguments { operator, reason }
}

fn require_group(
    operator: &'static str,
    group: Option<Vec<SeriesNumber>>,
) -> Result<Vec<SeriesNumber>, OperatorError> {
    group.ok_or_else(|| invalid(operator, "requires series numbers"))
}

fn require_argument(operator: &'static str, argument: Option<String>) -> Result<String, OperatorError> {
    argument.ok_or_else(|| invalid(operator, "requires a name"))
}

fn forbid_group(operator: &'static str, group: &Option<Vec<SeriesNumber>>) -> Result<(), OperatorError> {
    match group {
        Some(_) => Err(invalid(operator, "does not take a group")),
        None => Ok(()),
    }
}

fn forbid_argument(operator: &'static str, argument: &Option<String>) -> Result<(), OperatorError> {
    match argument {
        Some(_) => Err(invalid(operator, "does not take arguments")),
        None => Ok(()),
    }
}

fn forbid_both(
    operator: &'static str,
    group: &Option<Vec<SeriesNumber>>,
    argument: &Option<String>,
) -> Result<(), OperatorError> {
    forbid_group(operator, group)?;
    forbid_argument(operator, argument)
}
