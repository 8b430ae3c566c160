//! Record types held by the store.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier assigned by the remote service.
///
/// Services disagree on whether ids are numbers or strings, so both are
/// accepted and kept as received. `5` and `"5"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// A person's age as the service returned it.
///
/// Form input arrives as text and the service may echo it back as a string
/// or coerce it to a number; either way searching goes through
/// [`Age::search_text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Unset,
}

impl Age {
    /// Wrap raw form input.
    pub fn from_input(input: impl Into<String>) -> Self {
        Age::Text(input.into())
    }

    /// The literal decimal form used for substring search.
    ///
    /// Integral floats print without a fraction (`30.0` reads as `30`).
    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            Age::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    // Adding zero turns -0.0 into 0.0.
                    Cow::Owned(format!("{:.0}", f + 0.0))
                }
                _ => Cow::Owned(n.to_string()),
            },
            Age::Text(s) => Cow::Borrowed(s),
            Age::Unset => Cow::Borrowed(""),
        }
    }
}

impl From<i32> for Age {
    fn from(n: i32) -> Self {
        Age::Number(n.into())
    }
}

impl From<u32> for Age {
    fn from(n: u32) -> Self {
        Age::Number(n.into())
    }
}

impl From<&str> for Age {
    fn from(s: &str) -> Self {
        Age::Text(s.to_string())
    }
}

/// A person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// `None` until the service has persisted the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub age: Age,
    /// Avatar URI, never written by this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other fields the service populated
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Create a record as the service would return it.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, age: impl Into<Age>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            age: age.into(),
            image: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an image URI.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Whether the record has an id with the given value.
    pub fn has_id(&self, id: &RecordId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

/// Body sent when creating or updating a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub name: String,
    pub age: String,
}

impl RecordInput {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
