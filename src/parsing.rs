//! Statement parsing for the interactive prompt.
//!
//! A statement reads `<operator> [<group>] [<argument>]`, where the group is
//! either a leading range word (`1:4`) or a bracketed list of range words
//! (`[1 3:5 9:-2:3]`).

use std::collections::BTreeSet;

use crate::error::ParseError;
use crate::model::SeriesNumber;

/// Longest sequence a single range word may expand to.
pub const MAX_RANGE_LEN: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub operator: String,
    pub group: Option<Vec<SeriesNumber>>,
    pub argument: Option<String>,
}

pub fn parse_statement(line: &str) -> Result<Statement, ParseError> {
    let mut words = line.split_whitespace();
    let operator = words.next().ok_or(ParseError::EmptyStatement)?.to_string();
    let rest: Vec<&str> = words.collect();

    let (group, rest) = get_group(&rest)?;
    let argument = get_argument(&rest)?;

    Ok(Statement {
        operator,
        group,
        argument,
    })
}

/// Takes zero or one remaining word as the argument.
pub fn get_argument(words: &[&str]) -> Result<Option<String>, ParseError> {
    match words {
        [] => Ok(None),
        [word] => Ok(Some(word.to_string())),
        _ => Err(ParseError::MultipleWords),
    }
}

/// Splits an optional group off the front of `words`.
pub fn get_group<'a>(words: &[&'a str]) -> Result<(Option<Vec<SeriesNumber>>, Vec<&'a str>), ParseError> {
    let Some(first) = words.first() else {
        return Ok((None, Vec::new()));
    };

    let joined = words.join(" ");
    let mut left = None;
    let mut right = None;
    for (pos, c) in joined.char_indices() {
        let slot = match c {
            '[' => &mut left,
            ']' => &mut right,
            _ => continue,
        };
        if slot.replace(pos).is_some() {
            return Err(ParseError::MultipleGroups);
        }
    }

    let (left, right) = match (left, right) {
        (None, None) => {
            if first.starts_with(|c: char| c.is_ascii_digit()) {
                return Ok((Some(get_srange(first)?), words[1..].to_vec()));
            }
            return Ok((None, words.to_vec()));
        }
        (Some(left), Some(right)) if left < right => (left, right),
        (Some(_), _) => return Err(ParseError::UnmatchedBracket),
        (None, Some(_)) => return Err(ParseError::BracketNotLeading),
    };
    if left != 0 {
        return Err(ParseError::BracketNotLeading);
    }

    let mut numbers = BTreeSet::new();
    for word in joined[left + 1..right].split_whitespace() {
        numbers.extend(get_srange(word)?);
    }
    if numbers.is_empty() {
        return Err(ParseError::EmptyGroup);
    }

    let closing = words.iter().position(|word| word.contains(']')).unwrap_or(0);
    let trailing = words[closing].split(']').nth(1).unwrap_or_default();
    if !trailing.is_empty() {
        return Err(ParseError::TrailingAfterBracket(trailing.to_string()));
    }

    Ok((Some(numbers.into_iter().collect()), words[closing + 1..].to_vec()))
}

/// Expands a range word into ascending series numbers.
///
/// `n` is a single number, `a:b` an inclusive range in either direction and
/// `a:step:b` an arithmetic sequence that includes `b` when reachable.
pub fn get_srange(word: &str) -> Result<Vec<SeriesNumber>, ParseError> {
    if word == ":" {
        return Err(ParseError::SolitaryColon);
    }
    let parts: Vec<&str> = word.split(':').collect();
    if parts.len() > 3 {
        return Err(ParseError::TooManyNumbers(word.to_string()));
    }
    if parts.len() > 1 && parts.iter().any(|part| part.is_empty()) {
        return Err(ParseError::HangingColon(word.to_string()));
    }
    let numbers = parts
        .iter()
        .map(|part| parse_integer(part))
        .collect::<Result<Vec<_>, _>>()?;

    match numbers[..] {
        [single] => Ok(vec![single]),
        [a, b] => {
            let (start, stop) = (a.min(b), a.max(b));
            if start <= 0 {
                return Err(ParseError::NonPositiveBound(word.to_string()));
            }
            if stop - start >= MAX_RANGE_LEN as SeriesNumber {
                return Err(ParseError::RangeTooLarge(word.to_string()));
            }
            Ok((start..=stop).collect())
        }
        [start, step, stop] => {
            if step == 0 {
                return Err(ParseError::ZeroStep);
            }
            if start <= 0 || stop <= 0 {
                return Err(ParseError::NonPositiveBound(word.to_string()));
            }
            let mut sequence = Vec::new();
            let mut current = start;
            while (step > 0 && current <= stop) || (step < 0 && current >= stop) {
                if sequence.len() == MAX_RANGE_LEN {
                    return Err(ParseError::RangeTooLarge(word.to_string()));
                }
                sequence.push(current);
                match current.checked_add(step) {
                    Some(next) => current = next,
                    None => break,
                }
            }
            sequence.sort_unstable();
            Ok(sequence)
        }
        _ => Err(ParseError::TooManyNumbers(word.to_string())),
    }
}

fn parse_integer(text: &str) -> Result<SeriesNumber, ParseError> {
    if let Ok(value) = text.parse::<SeriesNumber>() {
        return Ok(value);
    }
    match text.parse::<f64>() {
        Ok(_) => Err(ParseError::NotAnInteger(text.to_string())),
        Err(_) => Err(ParseError::NotANumber(text.to_string())),
    }
}
