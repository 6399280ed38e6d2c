mod error;
mod normalize;
mod request;
mod types;

pub use error::ValidationError;
pub use request::QueryRequest;
pub use types::{AbsoluteTimestamp, QueryForm, QueryParameters};
