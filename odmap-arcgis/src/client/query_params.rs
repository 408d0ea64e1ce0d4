use itertools::Itertools;
use odmap_core::model::Predicate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    GeoJson,
}

impl ResponseFormat {
    pub fn code(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::GeoJson => "geojson",
        }
    }
}

/// where clauses longer than this are sent in a POST form body instead of
/// the GET query string
pub const MAX_GET_WHERE_LEN: usize = 1500;

/// parameters of a layer `query` request
#[derive(Clone, Debug, PartialEq)]
pub struct QueryParams {
    pub predicate: Predicate,
    pub out_fields: Vec<String>,
    pub return_geometry: bool,
    pub return_count_only: bool,
    pub format: ResponseFormat,
    pub result_offset: Option<u64>,
    pub result_record_count: Option<u64>,
}

impl QueryParams {
    /// attribute rows without geometry
    pub fn attributes(predicate: Predicate, out_fields: Vec<String>) -> Self {
        Self {
            predicate,
            out_fields,
            return_geometry: false,
            return_count_only: false,
            format: ResponseFormat::Json,
            result_offset: None,
            result_record_count: None,
        }
    }

    pub fn count(predicate: Predicate) -> Self {
        Self {
            return_count_only: true,
            ..Self::attributes(predicate, vec![])
        }
    }

    /// features with geometry as a GeoJSON FeatureCollection, in WGS84
    pub fn geometries(predicate: Predicate, out_fields: Vec<String>) -> Self {
        Self {
            return_geometry: true,
            format: ResponseFormat::GeoJson,
            ..Self::attributes(predicate, out_fields)
        }
    }

    pub fn with_page(mut self, offset: u64, page_size: u64) -> Self {
        self.result_offset = Some(offset);
        self.result_record_count = Some(page_size);
        self
    }

    /// the query string of the request
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let out_fields = if self.out_fields.is_empty() {
            String::from("*")
        } else {
            self.out_fields.iter().join(",")
        };
        let mut pairs = vec![
            ("where", self.predicate.to_where_clause()),
            ("outFields", out_fields),
            ("returnGeometry", self.return_geometry.to_string()),
        ];
        if self.return_count_only {
            pairs.push(("returnCountOnly", String::from("true")));
        }
        if self.return_geometry {
            pairs.push(("outSR", String::from("4326")));
        }
        if let Some(offset) = self.result_offset {
            pairs.push(("resultOffset", offset.to_string()));
        }
        if let Some(count) = self.result_record_count {
            pairs.push(("resultRecordCount", count.to_string()));
        }
        pairs.push(("f", self.format.code().to_string()));
        pairs
    }

    /// whether encoded pairs carry a where clause too long for a GET url
    pub fn requires_post(pairs: &[(&'static str, String)]) -> bool {
        pairs
            .iter()
            .any(|(key, value)| *key == "where" && value.len() > MAX_GET_WHERE_LEN)
    }
}
