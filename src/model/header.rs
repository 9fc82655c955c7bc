use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

pub const SERIES_NUMBER: &str = "SeriesNumber";
pub const SERIES_DESCRIPTION: &str = "SeriesDescription";
pub const SERIES_TIME: &str = "SeriesTime";
pub const ECHO_TIME: &str = "EchoTime";
pub const SERIES_INSTANCE_UID: &str = "SeriesInstanceUID";
pub const STUDY_INSTANCE_UID: &str = "StudyInstanceUID";
pub const PATIENT_ID: &str = "PatientID";

/// A single header attribute value.
///
/// Values of the same kind compare naturally; floats use IEEE total order so
/// that grouping and sorting stay deterministic. Values of different kinds
/// order as `Int < Float < Text`.
#[derive(Debug, Clone)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            AttrValue::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            AttrValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Int(value) => Some(*value as f64),
            AttrValue::Float(value) => Some(*value),
            AttrValue::Text(text) => text.trim().parse().ok(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttrValue::Int(_) => 0,
            AttrValue::Float(_) => 1,
            AttrValue::Text(_) => 2,
        }
    }
}

impl Ord for AttrValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AttrValue::Int(a), AttrValue::Int(b)) => a.cmp(b),
            (AttrValue::Float(a), AttrValue::Float(b)) => a.total_cmp(b),
            (AttrValue::Text(a), AttrValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AttrValue {}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write!(f, "{value}"),
            AttrValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Anything that can be looked up by attribute name.
pub trait Attributes {
    fn attribute(&self, name: &str) -> Option<AttrValue>;
}

/// Named attributes read from one file's header. Immutable once read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderRecord {
    attributes: BTreeMap<String, AttrValue>,
}

impl HeaderRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Attributes for HeaderRecord {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        self.get(name).cloned()
    }
}
