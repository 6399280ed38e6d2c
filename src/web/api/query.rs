use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::{IntoParams, ToSchema};

use crate::altitude::Statistics;
use crate::lifecycle::{AttemptId, LifecycleState};
use crate::query::QueryForm;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

const LONG_POLL: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    /// Hold the response while a query is pending, up to 30 seconds
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    pub attempt_id: AttemptId,
    pub state: LifecycleState,
}

/// Lifecycle snapshot plus the statistics derived from it
#[derive(Debug, Serialize, ToSchema)]
pub struct StateResponse {
    pub state: LifecycleState,
    /// Present only while a non-empty result is held
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

impl From<LifecycleState> for StateResponse {
    fn from(state: LifecycleState) -> Self {
        let statistics = state
            .result()
            .and_then(|result| Statistics::from_samples(&result.samples).ok());
        StateResponse { state, statistics }
    }
}

#[utoipa::path(
    post,
    path = "/api/query",
    tag = "altitude",
    request_body = QueryForm,
    responses(
        (status = 202, description = "Query issued", body = SubmitResponse),
        (status = 400, description = "Invalid catalog id, timestamp or step", body = ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<QueryForm>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    state.remember_form(&form);
    let attempt = state.controller.submit(&form)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            attempt_id: attempt.id,
            state: state.controller.state(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/state",
    tag = "altitude",
    params(StateQuery),
    responses(
        (status = 200, description = "Current query state", body = StateResponse)
    )
)]
pub async fn current_state(
    State(state): State<AppState>,
    Query(query): Query<StateQuery>,
) -> Json<StateResponse> {
    if query.wait {
        let mut updates = state.controller.subscribe();
        if updates.borrow_and_update().pending_attempt().is_some() {
            let _ = tokio::time::timeout(LONG_POLL, updates.changed()).await;
        }
    }
    Json(state.controller.state().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::{Metadata, QueryResult, Sample};
    use crate::query::AbsoluteTimestamp;
    use chrono::{TimeZone, Utc};

    fn result(altitudes: &[f64]) -> QueryResult {
        QueryResult {
            catalog_id: 25544,
            window_start: "2024-05-01T00:00:00Z".into(),
            window_end: "2024-05-01T00:03:00Z".into(),
            step_seconds: 60,
            samples: altitudes
                .iter()
                .map(|&altitude_km| Sample {
                    timestamp: AbsoluteTimestamp::from_utc(
                        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                    ),
                    altitude_km,
                })
                .collect(),
            metadata: Metadata {
                source_label: "celestrak".into(),
                epoch_timestamp: "2024-04-30T12:00:00Z".into(),
                reference_radius_km: 6378.137,
            },
        }
    }

    #[test]
    fn statistics_accompany_results() {
        let response = StateResponse::from(LifecycleState::Succeeded {
            result: result(&[400.0, 420.0, 410.0]),
        });
        assert_eq!(response.statistics.unwrap().mean, 410.0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["state"]["status"], "succeeded");
        assert_eq!(json["state"]["result"]["norad_id"], 25544);
        assert_eq!(json["statistics"]["range"], 20.0);
    }

    #[test]
    fn empty_result_has_no_statistics() {
        let response = StateResponse::from(LifecycleState::Succeeded { result: result(&[]) });
        assert!(response.statistics.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("statistics").is_none());
    }

    #[test]
    fn failed_state_serializes_message() {
        let response = StateResponse::from(LifecycleState::Failed {
            message: "satellite not found".into(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["state"]["status"], "failed");
        assert_eq!(json["state"]["message"], "satellite not found");
    }
}
