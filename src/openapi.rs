use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Flight Quote Image API", version = "1.0.0"),
    paths(crate::api::health, crate::api::render),
    components(schemas(crate::api::HealthResponse)),
    tags((name = "flightquote", description = "Flight quote PNG rendering"))
)]
pub struct ApiDoc;
