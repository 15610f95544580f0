//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "REST API for browsing, searching and adding catalog items",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Catalog item endpoints"),
        (name = "Stats", description = "Aggregate catalog statistics")
    )
)]
pub struct ApiDoc;
