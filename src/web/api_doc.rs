use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::query::{StateResponse, SubmitResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::query::submit,
        super::api::query::current_state,
    ),
    components(
        schemas(
            SubmitResponse,
            StateResponse,
            ErrorResponse,
            crate::query::QueryForm,
            crate::lifecycle::LifecycleState,
            crate::lifecycle::AttemptId,
            crate::altitude::QueryResult,
            crate::altitude::Sample,
            crate::altitude::Metadata,
            crate::altitude::Statistics,
        )
    ),
    info(
        title = "Alt-O-Mat API",
        description = "Satellite altitude profile queries",
        version = "0.1.0"
    ),
    tags(
        (name = "altitude", description = "Altitude query lifecycle")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_query_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/query"));
        assert!(doc.paths.paths.contains_key("/api/state"));
    }
}
