//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::handlers::{AnalysisResponse, HealthResponse, ReadyResponse};

/// Outfit Analysis API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Outfit Analysis API",
        version = "0.1.0",
        description = r#"
## Outfit Photo Classification

Upload a photo of an outfit and get back:

- a **category**: Sport, Casual, Professional or Chill
- a short **explanation** and a **confidence** level
- optionally a **suggestionImageUrl**, a signed link to a generated
  reference outfit for the same category

Errors always have the shape `{"error": "<message>"}`.
"#,
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Analysis", description = "Outfit photo classification"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::analyze::analyze_outfit_handler,
    ),
    components(schemas(AnalysisResponse, HealthResponse, ReadyResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_analyze_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/analyze-outfit"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
