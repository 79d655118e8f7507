//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use intake_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Intake API",
        version = "0.1.0",
        description = "File intake service. Uploads are recorded once per submitter and content fingerprint; re-submitting the same bytes returns the original import id."
    ),
    paths(
        handlers::imports::create_import,
        handlers::imports::get_import,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(
        schemas(
            models::ImportRecord,
            models::ImportStatus,
            models::ImportAcceptedResponse,
            models::SubmitOutcome,
            handlers::health::LivenessResponse,
            handlers::health::ReadinessResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "imports", description = "Idempotent file intake and status lookup"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
