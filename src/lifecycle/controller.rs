use std::sync::Arc;

use chrono::{Local, TimeZone};
use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::altitude::QueryResult;
use crate::query::{QueryForm, QueryParameters, QueryRequest, ValidationError};

use super::error::QueryError;
use super::state::{AttemptId, LifecycleState};
use super::transport::{Transport, TransportError, TransportResponse};

/// How an attempt's response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer submission took over before this one resolved.
    Superseded,
}

/// Handle to an attempt whose request is in flight. Dropping it does not
/// cancel anything.
#[derive(Debug)]
pub struct PendingAttempt {
    pub id: AttemptId,
    handle: JoinHandle<Resolution>,
}

impl PendingAttempt {
    pub async fn settled(self) -> Result<Resolution, JoinError> {
        self.handle.await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Owns the single outstanding altitude query and its lifecycle state.
///
/// The controller is the only writer of the state cell. Readers either take
/// a snapshot with [`Controller::state`] or follow changes through
/// [`Controller::subscribe`].
pub struct Controller<T, Tz = Local> {
    transport: T,
    zone: Tz,
    state: Arc<watch::Sender<LifecycleState>>,
}

impl<T: Transport> Controller<T, Local> {
    pub fn new(transport: T) -> Self {
        Self::with_zone(transport, Local)
    }
}

impl<T, Tz> Controller<T, Tz>
where
    T: Transport,
    Tz: TimeZone,
{
    /// Wall-clock input is interpreted in `zone`.
    pub fn with_zone(transport: T, zone: Tz) -> Self {
        Self {
            transport,
            zone,
            state: Arc::new(watch::Sender::new(LifecycleState::Idle)),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a new attempt, superseding any pending one.
    ///
    /// Invalid input moves the state straight to `Failed` and nothing is
    /// sent. Otherwise the request is handed to the runtime and this returns
    /// immediately; must be called from within a tokio runtime.
    pub fn submit(&self, form: &QueryForm) -> Result<PendingAttempt, ValidationError> {
        let params = match QueryParameters::from_form(form, &self.zone) {
            Ok(params) => params,
            Err(e) => {
                let error = QueryError::from(e.clone());
                log::warn!("Rejected altitude query: {}", error);
                self.state.send_replace(LifecycleState::Failed {
                    message: error.to_string(),
                });
                return Err(e);
            }
        };

        let attempt_id = AttemptId::new();
        self.state.send_replace(LifecycleState::Pending { attempt_id });
        log::info!(
            "Attempt {}: NORAD {} from {} to {} every {}s",
            attempt_id,
            params.catalog_id,
            params.window_start,
            params.window_end,
            params.step_seconds
        );

        let call = self.transport.send(QueryRequest::altitude(&params));
        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            let outcome = interpret(call.await);
            resolve(&state, attempt_id, outcome)
        });

        Ok(PendingAttempt {
            id: attempt_id,
            handle,
        })
    }
}

fn interpret(
    outcome: Result<TransportResponse, TransportError>,
) -> Result<QueryResult, QueryError> {
    let response = outcome?;
    if response.is_success() {
        return Ok(serde_json::from_str(&response.body)?);
    }

    let detail = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail);
    let message = match detail {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Null) | None => {
            format!("request failed with status {}", response.status)
        }
        Some(other) => other.to_string(),
    };

    Err(QueryError::RequestFailed {
        status: response.status,
        message,
    })
}

fn resolve(
    state: &watch::Sender<LifecycleState>,
    attempt_id: AttemptId,
    outcome: Result<QueryResult, QueryError>,
) -> Resolution {
    let next = match &outcome {
        Ok(result) => LifecycleState::Succeeded {
            result: result.clone(),
        },
        Err(e) => LifecycleState::Failed {
            message: e.to_string(),
        },
    };

    let applied = state.send_if_modified(|current| {
        if current.pending_attempt() != Some(attempt_id) {
            return false;
        }
        *current = next;
        true
    });

    if !applied {
        log::debug!("Discarding response for superseded attempt {}", attempt_id);
        return Resolution::Superseded;
    }

    match outcome {
        Ok(result) => log::info!(
            "Attempt {}: received {} samples",
            attempt_id,
            result.samples.len()
        ),
        Err(e) => match e.status() {
            Some(status) => log::warn!("Attempt {} failed ({}): {}", attempt_id, status, e),
            None => log::warn!("Attempt {} failed: {}", attempt_id, e),
        },
    }
    Resolution::Applied
}
