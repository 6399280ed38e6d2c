mod controller;
mod error;
mod state;
mod transport;

pub use controller::{Controller, PendingAttempt, Resolution};
pub use error::QueryError;
pub use state::{AttemptId, LifecycleState};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
