use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod catalog;
pub mod config;
pub mod db;
pub mod receipt;
pub mod schema;

pub use crate::config::AppConfig;
pub use crate::db::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::receipt::handlers::cash_machine,
        crate::receipt::handlers::download_latest_receipt,
        crate::receipt::handlers::download_receipt,
        crate::catalog::routes::list_items,
        crate::catalog::routes::create_item
    ),
    components(
        schemas(
            receipt::models::CashMachineRequest,
            catalog::model::Item,
            catalog::model::NewItem,
            schema::BinaryBody,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Receipts", description = "Receipt generation and retrieval."),
        (name = "Catalog", description = "Catalog item endpoints.")
    )
)]
pub struct ApiDoc;

pub async fn health_check() -> &'static str {
    "OK"
}

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(receipt::handlers::json_config())
        .route("/health", web::get().to(health_check))
        .configure(receipt::handlers::config)
        .service(web::scope("/api").configure(catalog::routes::config));
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let bind_address = config.bind_address();
    let allowed_origins = config.allowed_origins.clone();

    let app_state = match AppState::new_with_config(config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialize application state. Check DATABASE_URL and the receipt template. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("cash_register_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://{}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![receipt::handlers::RECEIPT_URL_HEADER])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()))
    })
    .bind(bind_address)?
    .run()
    .await
}
