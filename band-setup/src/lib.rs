//! Band setup tooling: configuration loading and the offline image test.
//!
//! Device scanning, authentication and label printing live outside this
//! crate; it prepares the display image they send.

pub mod config;

pub use config::{ConfigError, SetupConfig};
pub use image_test::ImageTestReport;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env, then the setup configuration.
pub fn init_config() -> Result<SetupConfig, ConfigError> {
    load_dotenv();
    let config = SetupConfig::load()?;
    tracing::info!(
        image = ?config.image,
        background = ?config.background,
        "Settings loaded"
    );
    Ok(config)
}
