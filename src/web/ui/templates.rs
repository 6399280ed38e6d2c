use askama::Template;
use askama_web::WebTemplate;

use crate::altitude::{QueryResult, Statistics};
use crate::lifecycle::LifecycleState;
use crate::query::QueryForm;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub form: QueryForm,
    pub backend: String,
    pub status: &'static str,
    pub pending: bool,
    pub message: Option<String>,
    pub result: Option<ResultView>,
}

pub struct ResultView {
    pub catalog_id: u32,
    pub window: String,
    pub step_seconds: i64,
    pub source: String,
    pub epoch: String,
    pub radius_km: String,
    pub stats: Option<StatsView>,
    pub rows: Vec<SampleRow>,
}

pub struct StatsView {
    pub min: String,
    pub max: String,
    pub mean: String,
    pub range: String,
}

pub struct SampleRow {
    pub timestamp: String,
    pub altitude_km: String,
}

impl DashboardTemplate {
    pub fn new(form: QueryForm, backend: &str, state: &LifecycleState) -> Self {
        let message = match state {
            LifecycleState::Failed { message } => Some(message.clone()),
            _ => None,
        };
        Self {
            form,
            backend: backend.to_string(),
            status: state.label(),
            pending: state.pending_attempt().is_some(),
            message,
            result: state.result().map(ResultView::from),
        }
    }
}

impl From<&QueryResult> for ResultView {
    fn from(result: &QueryResult) -> Self {
        let stats = Statistics::from_samples(&result.samples)
            .ok()
            .map(|s| StatsView {
                min: km(s.min),
                max: km(s.max),
                mean: km(s.mean),
                range: km(s.range),
            });
        ResultView {
            catalog_id: result.catalog_id,
            window: format!("{} to {}", result.window_start, result.window_end),
            step_seconds: result.step_seconds,
            source: result.metadata.source_label.clone(),
            epoch: result.metadata.epoch_timestamp.clone(),
            radius_km: km(result.metadata.reference_radius_km),
            stats,
            rows: result
                .samples
                .iter()
                .map(|s| SampleRow {
                    timestamp: s
                        .timestamp
                        .instant()
                        .format("%Y-%m-%d %H:%M:%S UTC")
                        .to_string(),
                    altitude_km: km(s.altitude_km),
                })
                .collect(),
        }
    }
}

fn km(value: f64) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::{Metadata, Sample};
    use crate::query::AbsoluteTimestamp;
    use chrono::{TimeZone, Utc};

    fn form() -> QueryForm {
        QueryForm::new(25544, "2024-05-01T00:00:00", "2024-05-01T06:00:00", 60)
    }

    #[test]
    fn renders_statistics_for_result() {
        let state = LifecycleState::Succeeded {
            result: QueryResult {
                catalog_id: 25544,
                window_start: "2024-04-30T22:00:00Z".into(),
                window_end: "2024-05-01T04:00:00Z".into(),
                step_seconds: 60,
                samples: vec![
                    Sample {
                        timestamp: AbsoluteTimestamp::from_utc(
                            Utc.with_ymd_and_hms(2024, 4, 30, 22, 0, 0).unwrap(),
                        ),
                        altitude_km: 408.1,
                    },
                    Sample {
                        timestamp: AbsoluteTimestamp::from_utc(
                            Utc.with_ymd_and_hms(2024, 4, 30, 22, 1, 0).unwrap(),
                        ),
                        altitude_km: 410.0,
                    },
                ],
                metadata: Metadata {
                    source_label: "celestrak".into(),
                    epoch_timestamp: "2024-04-30T12:00:00Z".into(),
                    reference_radius_km: 6378.137,
                },
            },
        };

        let html = DashboardTemplate::new(form(), "http://127.0.0.1:8000", &state)
            .render()
            .unwrap();
        assert!(html.contains("NORAD 25544"));
        assert!(html.contains("408.100 km"));
        assert!(html.contains("1.900 km"));
        assert!(html.contains("2024-04-30 22:01:00 UTC"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn pending_page_refreshes_and_failure_is_escaped() {
        let pending = LifecycleState::Pending {
            attempt_id: crate::lifecycle::AttemptId::new(),
        };
        let html = DashboardTemplate::new(form(), "http://127.0.0.1:8000", &pending)
            .render()
            .unwrap();
        assert!(html.contains("http-equiv=\"refresh\""));

        let failed = LifecycleState::Failed {
            message: "<unknown satellite>".into(),
        };
        let html = DashboardTemplate::new(form(), "http://127.0.0.1:8000", &failed)
            .render()
            .unwrap();
        assert!(html.contains("unknown satellite"));
        assert!(!html.contains("<unknown satellite>"));
        assert!(!html.contains("id=\"result\""));
    }
}
