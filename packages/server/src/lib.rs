#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the population map.
//!
//! Loads the district population and main road `GeoJSON` datasets once at
//! startup, then serves filter options, legend data, and recomposed layers
//! to the browser map frontend. The frontend's static files are served
//! from the configured directory at `/`.

pub mod config;
mod handlers;

use std::sync::{Mutex, PoisonError};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use webgis_map::session::{Event, MapData, SessionState, Transition};

use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Loaded datasets and filter index. Immutable after startup.
    pub data: MapData,
    /// Current filter/view state, replaced wholesale on every transition.
    /// The lock serializes transitions.
    pub session: Mutex<SessionState>,
    /// Configuration the server was started with.
    pub config: ServerConfig,
}

impl AppState {
    /// Creates the state with the session at its initial value.
    #[must_use]
    pub fn new(data: MapData, config: ServerConfig) -> Self {
        Self {
            data,
            session: Mutex::new(SessionState::initial()),
            config,
        }
    }

    /// Snapshot of the current session state.
    pub fn current(&self) -> SessionState {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies an event to the session and stores the resulting state.
    ///
    /// The state is a plain value that is only ever swapped whole, so a
    /// poisoned lock still holds a consistent state and is recovered.
    pub fn apply(&self, event: &Event) -> Transition {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let transition = self.data.apply(&session, event);
        *session = transition.state.clone();
        transition
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/config", web::get().to(handlers::map_config))
            .route("/legend", web::get().to(handlers::legend))
            .route("/regions", web::get().to(handlers::regions))
            .route("/sub-regions", web::get().to(handlers::sub_regions))
            .route("/view", web::get().to(handlers::view))
            .route("/select/region", web::post().to(handlers::select_region))
            .route(
                "/select/sub-region",
                web::post().to(handlers::select_sub_region),
            )
            .route("/heatmap/toggle", web::post().to(handlers::toggle_heatmap))
            .route("/reset", web::post().to(handlers::reset)),
    );
}

/// Starts the population map API server.
///
/// Loads the configuration and both datasets, then starts the Actix-Web
/// HTTP server. A dataset that fails to load is logged and left
/// unavailable; the server still starts. This is a regular async function:
/// the caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the configuration cannot be
/// loaded, or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::load().map_err(std::io::Error::other)?;

    log::info!("Loading datasets from {}...", config.data.dir.display());
    let data = MapData::load(&config.data.population_path(), &config.data.road_path());
    log::info!(
        "Filter index ready: {} regions",
        data.index().region_count()
    );

    let static_dir = config.server.static_dir.clone();
    let state = web::Data::new(AppState::new(data, config));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files
            .service(Files::new("/", &static_dir).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
