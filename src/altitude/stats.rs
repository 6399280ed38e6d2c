use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::types::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no samples to summarize")]
    EmptySeries,
}

/// Summary of an altitude series, in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub range: f64,
}

impl Statistics {
    pub fn from_samples(samples: &[Sample]) -> Result<Self, StatsError> {
        let (first, rest) = samples.split_first().ok_or(StatsError::EmptySeries)?;

        let mut min = first.altitude_km;
        let mut max = first.altitude_km;
        let mut sum = first.altitude_km;
        for sample in rest {
            min = min.min(sample.altitude_km);
            max = max.max(sample.altitude_km);
            sum += sample.altitude_km;
        }

        Ok(Self {
            min,
            max,
            mean: sum / samples.len() as f64,
            range: max - min,
        })
    }
}
