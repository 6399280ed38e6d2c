mod stats;
mod types;

pub use stats::{Statistics, StatsError};
pub use types::{Metadata, QueryResult, Sample};
