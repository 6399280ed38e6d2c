use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::query::AbsoluteTimestamp;

/// One propagated point of the altitude series
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Sample {
    #[serde(rename = "t")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: AbsoluteTimestamp,
    #[serde(rename = "alt_km")]
    pub altitude_km: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Metadata {
    #[serde(rename = "tle_source")]
    pub source_label: String,
    #[serde(rename = "tle_epoch")]
    pub epoch_timestamp: String,
    #[serde(rename = "earth_radius_km")]
    pub reference_radius_km: f64,
}

/// The collaborator's answer to an altitude query
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct QueryResult {
    #[serde(rename = "norad_id")]
    pub catalog_id: u32,
    #[serde(rename = "start")]
    pub window_start: String,
    #[serde(rename = "end")]
    pub window_end: String,
    pub step_seconds: i64,
    #[serde(rename = "points")]
    pub samples: Vec<Sample>,
    #[serde(rename = "meta")]
    pub metadata: Metadata,
}
