use serde::{Deserialize, Serialize};

/// identifies a census block group. origins and destinations share this id space;
/// in the O-D table it is the GEOID of the block group as a string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BlockGroupId(pub String);

impl BlockGroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// reads an id from a feature attribute. feature services report GEOIDs as
    /// strings on some layers and as numbers on others, so both are accepted.
    pub fn from_attribute(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(Self(s.trim().to_string()))
            }
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlockGroupId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
