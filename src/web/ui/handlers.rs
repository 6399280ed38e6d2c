use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect},
};

use crate::query::QueryForm;
use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    DashboardTemplate::new(
        state.form(),
        &state.config.backend.base_url,
        &state.controller.state(),
    )
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<QueryForm>) -> Redirect {
    state.remember_form(&form);
    // Rejections land in the lifecycle state and are shown on the dashboard.
    let _ = state.controller.submit(&form);
    Redirect::to("/")
}
