pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::interfaces::http::start_server;

pub use crate::application::{FileFormat, TableNormalizer, TypeDetector, UploadProcessor};
pub use crate::domain::error::{AppError, Result};
pub use crate::domain::table::{
    CellValue, Column, ColumnType, DisplayValue, NormalizedRow, ProcessingResult, Schema, Table,
};

fn init_tracing(config: &AppConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ConfigService::new().load().map_err(|err| {
        // Subscriber is not up yet, so this one goes straight to stderr
        eprintln!("{}", err);
        err
    })?;

    init_tracing(&config);
    info!(
        host = %config.host,
        port = config.port,
        "Starting tabula"
    );

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(&config).map_err(|err| {
            error!(error = %err, "Failed to start HTTP server");
            err
        })?;
        server.await
    })
}
