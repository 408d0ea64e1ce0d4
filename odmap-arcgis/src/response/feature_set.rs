use serde::{Deserialize, Serialize};

/// one page of an `f=json` attribute query
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
    /// set when the service truncated the page at its record limit; the next
    /// page starts at the current offset plus the number of features returned.
    #[serde(default)]
    pub exceeded_transfer_limit: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FeatureRecord {
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// body of a `returnCountOnly=true` query
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountResult {
    pub count: u64,
}
