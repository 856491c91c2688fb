//! Course Library server.
//!
//! Serves authors and their courses over a content-negotiated REST API.

use clap::Parser;
use courselib_persistence::backends::memory::InMemoryRepository;
use courselib_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

/// Creates the repository, with the demo data set when configured.
fn create_repository(config: &ServerConfig) -> InMemoryRepository {
    if config.seed_data {
        let repository = InMemoryRepository::with_seed_data();
        info!(
            authors = repository.author_count(),
            courses = repository.course_count(),
            "Loaded demo data"
        );
        repository
    } else {
        InMemoryRepository::new()
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        base_url = %config.base_url,
        seed_data = config.seed_data,
        "Starting Course Library server"
    );

    let repository = create_repository(&config);
    let app = create_app_with_config(repository, config.clone())
        .map_err(|e| anyhow::anyhow!("Invalid base URL: {}", e))?;

    serve(app, &config).await
}
