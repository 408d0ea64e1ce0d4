use serde::{Deserialize, Serialize};

/// attribute names used by the O-D table and the block group layer of the
/// feature service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldNames {
    #[serde(default = "defaults::origin")]
    pub origin: String,
    #[serde(default = "defaults::destination")]
    pub destination: String,
    #[serde(default = "defaults::trips")]
    pub trips: String,
    #[serde(default = "defaults::day_type")]
    pub day_type: String,
    #[serde(default = "defaults::day_part")]
    pub day_part: String,
    /// block group identifier on the geometry layer
    #[serde(default = "defaults::geoid")]
    pub geoid: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            origin: defaults::origin(),
            destination: defaults::destination(),
            trips: defaults::trips(),
            day_type: defaults::day_type(),
            day_part: defaults::day_part(),
            geoid: defaults::geoid(),
        }
    }
}

mod defaults {
    pub fn origin() -> String {
        String::from("Origin")
    }
    pub fn destination() -> String {
        String::from("Destination_Zone_ID")
    }
    pub fn trips() -> String {
        String::from("Average_Daily_O_D_Traffic__StL_")
    }
    pub fn day_type() -> String {
        String::from("Day_Type")
    }
    pub fn day_part() -> String {
        String::from("Day_Part")
    }
    pub fn geoid() -> String {
        String::from("GEOID")
    }
}
