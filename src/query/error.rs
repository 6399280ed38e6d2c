use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid timestamp '{0}': expected YYYY-MM-DDTHH:mm:ss in local time")]
    InvalidTimestamp(String),
    #[error("invalid catalog id '{0}': expected an integer NORAD id")]
    InvalidCatalogId(String),
    #[error("invalid step '{0}': expected an integer number of seconds")]
    InvalidStep(String),
}
