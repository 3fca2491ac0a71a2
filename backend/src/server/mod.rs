//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::UserService;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::middleware::{ApiKeyAuth, Trace};
use crate::outbound::persistence::DieselUserRepository;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    api_key: Option<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        api_key,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(ApiKeyAuth::new(api_key))
        .configure(users::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        api_key,
    } = config;

    let repository = Arc::new(DieselUserRepository::new(db_pool));
    let http_state = web::Data::new(HttpState::new(Arc::new(UserService::new(repository))));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            api_key: api_key.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
