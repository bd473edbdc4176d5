//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use tubely_core::models;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video ingestion service. Uploaded MP4s are remuxed for fast start, classified by aspect ratio and stored under landscape/, portrait/ or other/ keys."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_get::get_video,
    ),
    components(
        schemas(
            models::VideoResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "videos", description = "Video upload and retrieval")
    )
)]
pub struct ApiDoc;
