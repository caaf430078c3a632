use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry: the lookup title plus whatever display fields the dataset carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Exact, case-sensitive lookup key
    pub title: String,
    /// Remaining columns of the catalog record, kept verbatim for display
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Movie {
    /// Creates a movie with no display fields
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Map::new(),
        }
    }

    /// Adds a display field, replacing any previous value under the same name
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}
