//! Runtime setup configuration loaded from an optional JSON file + environment overrides.

use std::path::{Path, PathBuf};

use band_bitmap::ImageOptions;
use band_bitmap::options::MAX_CROP_SIZE;
use serde::{Deserialize, Serialize};

/// Environment variable naming the JSON config file.
pub const CONFIG_FILE_VAR: &str = "BAND_SETUP_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration for preparing the band image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Image drawn on the band display.
    pub image: Option<PathBuf>,

    /// Image shown wherever the first one does not reach.
    pub background: Option<PathBuf>,

    /// Transform sequence and display placement.
    pub options: ImageOptions,
}

impl SetupConfig {
    /// Load configuration: file named by `BAND_SETUP_CONFIG` first, env overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the image pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let crop_size = self.options.crop_size;
        if crop_size == 0 || crop_size > MAX_CROP_SIZE {
            return Err(ConfigError::InvalidValue {
                key: "crop_size",
                value: crop_size.to_string(),
            });
        }
        Ok(())
    }

    /// Apply overrides from `get` (normally the process environment).
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(
        &mut self,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let g = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = g("BAND_IMAGE") {
            self.image = Some(PathBuf::from(v));
        }
        if let Some(v) = g("BAND_IMAGE_BACKGROUND") {
            self.background = Some(PathBuf::from(v));
        }

        let opts = &mut self.options;
        if let Some(v) = g("BAND_IMAGE_NEGATE") {
            opts.negate = parse_bool("BAND_IMAGE_NEGATE", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_ROTATE") {
            opts.rotate = parse_num("BAND_IMAGE_ROTATE", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_FLIP_H") {
            opts.flip_horizontal = parse_bool("BAND_IMAGE_FLIP_H", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_FLIP_V") {
            opts.flip_vertical = parse_bool("BAND_IMAGE_FLIP_V", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_OFFSET_X") {
            opts.offset_x = parse_num("BAND_IMAGE_OFFSET_X", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_OFFSET_Y") {
            opts.offset_y = parse_num("BAND_IMAGE_OFFSET_Y", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_HEIGHT") {
            opts.display_rows = parse_num("BAND_IMAGE_HEIGHT", &v)?;
        }
        if let Some(v) = g("BAND_IMAGE_START") {
            opts.display_start = parse_num("BAND_IMAGE_START", &v)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: s.to_string(),
        }),
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, s: &str) -> Result<T, ConfigError> {
    s.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: s.to_string(),
    })
}
