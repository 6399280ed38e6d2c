use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::error::ValidationError;
use super::normalize::normalize_in;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A UTC instant with whole-second precision.
///
/// Renders as `YYYY-MM-DDTHH:mm:ssZ` and parses back to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbsoluteTimestamp(DateTime<Utc>);

impl AbsoluteTimestamp {
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(0))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for AbsoluteTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for AbsoluteTimestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = DateTime::parse_from_rfc3339(s.trim())?;
        Ok(Self::from_utc(parsed.with_timezone(&Utc)))
    }
}

impl Serialize for AbsoluteTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Collaborators may omit the offset; those values are read as UTC.
impl<'de> Deserialize<'de> for AbsoluteTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if let Ok(ts) = s.parse() {
            return Ok(ts);
        }
        NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self::from_utc(naive.and_utc()))
            .map_err(serde::de::Error::custom)
    }
}

/// Raw operator input, exactly as typed into the form.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct QueryForm {
    #[serde(deserialize_with = "text_or_integer")]
    pub catalog_id: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:mm:ss`
    pub start: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:mm:ss`
    pub end: String,
    #[serde(default = "default_step", deserialize_with = "text_or_integer")]
    pub step: String,
}

fn default_step() -> String {
    "60".to_string()
}

impl QueryForm {
    pub fn new(catalog_id: impl ToString, start: &str, end: &str, step: impl ToString) -> Self {
        Self {
            catalog_id: catalog_id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            step: step.to_string(),
        }
    }
}

/// A fully validated query. Window ordering and step range are left for the
/// collaborator to judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    pub catalog_id: u32,
    pub window_start: AbsoluteTimestamp,
    pub window_end: AbsoluteTimestamp,
    pub step_seconds: i64,
}

impl QueryParameters {
    pub fn from_form<Tz: TimeZone>(form: &QueryForm, zone: &Tz) -> Result<Self, ValidationError> {
        let catalog_id = form
            .catalog_id
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidCatalogId(form.catalog_id.clone()))?;
        let window_start = normalize_in(zone, &form.start)?;
        let window_end = normalize_in(zone, &form.end)?;
        let step_seconds = form
            .step
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidStep(form.step.clone()))?;

        Ok(Self {
            catalog_id,
            window_start,
            window_end,
            step_seconds,
        })
    }
}

fn text_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
    })
}
