use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while reading a candidate record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("candidate record #{position} is missing field '{field}'")]
    MissingField { position: usize, field: &'static str },

    #[error("candidate record #{position} has malformed field '{field}'")]
    MalformedField { position: usize, field: &'static str },
}

/// Restaurant as supplied by the dataset provider
///
/// Fields are kept as raw JSON so that an incomplete or badly typed dataset
/// still loads; the typed accessors report a missing or malformed field the
/// first time it is actually read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub name: Option<Value>,
    /// Miles from the locale centre, precomputed by the provider
    #[serde(default)]
    pub distance: Option<Value>,
    #[serde(default)]
    pub additional_amenities: Option<Value>,
    #[serde(default)]
    pub cuisine_type: Option<Value>,
    /// Position in the provider's sequence, used in error messages
    #[serde(skip)]
    pub position: usize,
}

impl CandidateRecord {
    /// A non-finite `distance` has no JSON form and is stored as `null`
    pub fn new(name: &str, distance: f64, additional_amenities: &str, cuisine_type: &str) -> Self {
        Self {
            name: Some(Value::from(name)),
            distance: Some(Value::from(distance)),
            additional_amenities: Some(Value::from(additional_amenities)),
            cuisine_type: Some(Value::from(cuisine_type)),
            position: 0,
        }
    }

    pub fn name(&self) -> Result<&str, RecordError> {
        self.text(&self.name, "name")
    }

    /// Integer and float JSON numbers are both accepted
    pub fn distance(&self) -> Result<f64, RecordError> {
        match &self.distance {
            None => Err(self.missing("distance")),
            Some(value) => value.as_f64().ok_or_else(|| self.malformed("distance")),
        }
    }

    pub fn additional_amenities(&self) -> Result<&str, RecordError> {
        self.text(&self.additional_amenities, "additional_amenities")
    }

    pub fn cuisine_type(&self) -> Result<&str, RecordError> {
        self.text(&self.cuisine_type, "cuisine_type")
    }

    fn text<'a>(&self, value: &'a Option<Value>, field: &'static str) -> Result<&'a str, RecordError> {
        match value {
            None => Err(self.missing(field)),
            Some(value) => value.as_str().ok_or_else(|| self.malformed(field)),
        }
    }

    fn missing(&self, field: &'static str) -> RecordError {
        RecordError::MissingField {
            position: self.position,
            field,
        }
    }

    fn malformed(&self, field: &'static str) -> RecordError {
        RecordError::MalformedField {
            position: self.position,
            field,
        }
    }
}

/// One selectable restaurant offered to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantOption {
    /// 0-based position in the filtered sequence
    pub index: usize,
    pub description: String,
}

/// Identifier tying a later selection back to the options offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
