//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: user CRUD paths, health probes, the shared error
//! schema, and the `X-API-Key` security scheme. The deprecated numeric id
//! lookup is intentionally not registered.
//!
//! The generated specification backs Swagger UI, which is served at `/docs`
//! in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::users::{CreateUserRequest, ErasableString, PatchUserRequest, UserResponse};

/// Enrich the generated document with the API key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "Static API key required on every /api/v1 route.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cruder API",
        description = "HTTP interface for user record management and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user_by_username,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserResponse,
        CreateUserRequest,
        PatchUserRequest,
        ErasableString,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
