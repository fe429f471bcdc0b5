use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use tilescan_grid::DEFAULT_TILE_SIZE;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct GridSettings {
    /// Initial width in tiles
    pub width: usize,
    /// Initial height in tiles
    pub height: usize,
    /// Pixels per tile edge, fixed for the run
    pub tile_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusSettings {
    /// Events buffered per subscriber before it starts lagging
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub grid: GridSettings,
    pub bus: BusSettings,
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Loads settings from built-in defaults, then the TOML file at `path` if it
/// exists, then `TILESCAN__*` environment variables.
pub fn load_config_from(path: &str) -> Result<AppConfig, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .set_default("grid.width", 10)?
        .set_default("grid.height", 10)?
        .set_default("grid.tile_size", i64::from(DEFAULT_TILE_SIZE))?
        .set_default("bus.capacity", 16)?
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix("TILESCAN").separator("__"))
        .build()
        .and_then(|c| c.try_deserialize::<AppConfig>())
        .and_then(validate);

    match settings {
        Ok(config) => {
            info!("Successfully loaded configuration: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

fn validate(config: AppConfig) -> Result<AppConfig, ConfigError> {
    if config.bus.capacity == 0 {
        return Err(ConfigError::Message("bus.capacity must be at least 1".into()));
    }
    Ok(config)
}
