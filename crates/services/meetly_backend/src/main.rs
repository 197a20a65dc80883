// File: crates/services/meetly_backend/src/main.rs
use meetly_backend::app_state::AppState;
use meetly_backend::service_factory::MeetlyServiceFactory;
use meetly_common::{config_error, log_result, logging, MeetlyError};
use meetly_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), MeetlyError> {
    logging::init();

    let config = Arc::new(load_config().map_err(config_error)?);
    let service_factory = log_result(
        MeetlyServiceFactory::new(&config).await,
        "Services initialized",
        "Failed to initialize services",
    )?;
    let state = Arc::new(AppState::new(config.clone(), service_factory));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = meetly_backend::api_router(state);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use meetly_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Meetly API",
                version = "0.1.0",
                description = "Meetly booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "Meetly", description = "Core service endpoints")),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
