//! Club booking portal
//!
//! Clubs log in with their email, browse competitions and spend their points on places. A club
//! may only buy a limited number of places per competition, and never for a competition that
//! already took place.
//!
//! Clubs and competitions are read from two JSON files at startup and only live in memory.
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::info;

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod http;
pub mod ports;

use adapters::{
    clock::SystemClock,
    database::{
        loader::{load_clubs, load_competitions, LoadError},
        memory::MemoryDatabase,
    },
};
use commands::DomainLogic;
use config::{Config, ConfigError};
use http::{router, templates::Templates, AppState};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn start_server() -> Result<(), StartupError> {
    info!("Loading configuration...");
    let config = Config::load()?;

    info!("Loading clubs and competitions...");
    let database = MemoryDatabase::new(
        load_clubs(&config.clubs_file)?,
        load_competitions(&config.competitions_file)?,
    );
    let domain = DomainLogic::new(database, SystemClock, config.max_places_per_club);
    let app = router(AppState::new(domain, Templates::new()?));

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
