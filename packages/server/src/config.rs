//! Server configuration.
//!
//! The defaults live in `config/default.toml`, embedded at compile time.
//! Setting `WEBGIS_CONFIG` to a TOML file path overrides them; any section
//! or key missing from that file keeps its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Embedded default configuration.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Environment variable naming an override configuration file.
pub const CONFIG_ENV_VAR: &str = "WEBGIS_CONFIG";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`ServerConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Dataset locations.
    pub data: DataConfig,
    /// Initial viewport.
    pub map: MapViewConfig,
    /// Static file hosting.
    pub server: StaticConfig,
}

/// Where the two `GeoJSON` datasets live.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory containing both dataset files.
    pub dir: PathBuf,
    /// District population `FeatureCollection` file name.
    pub population_file: String,
    /// Main road `FeatureCollection` file name.
    pub road_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            population_file: "penduduk_kecamatan.geojson".to_string(),
            road_file: "jalan_utama.geojson".to_string(),
        }
    }
}

impl DataConfig {
    /// Full path of the district dataset.
    #[must_use]
    pub fn population_path(&self) -> PathBuf {
        self.dir.join(&self.population_file)
    }

    /// Full path of the road dataset.
    #[must_use]
    pub fn road_path(&self) -> PathBuf {
        self.dir.join(&self.road_file)
    }
}

/// Initial map viewport handed to the frontend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    /// Map center as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub default_zoom: u8,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: [-7.450, 112.640],
            default_zoom: 10,
        }
    }
}

/// Static frontend hosting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory served at `/`.
    pub static_dir: PathBuf,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("app/dist"),
        }
    }
}

impl ServerConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is not valid TOML or has
    /// values of the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Loads the file named by `WEBGIS_CONFIG`, or the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the override file cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => Self::from_toml(DEFAULT_CONFIG_TOML),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let parsed = ServerConfig::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, ServerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            [data]
            dir = "/srv/geojson"

            [map]
            default_zoom = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.data.dir, PathBuf::from("/srv/geojson"));
        assert_eq!(config.data.population_file, "penduduk_kecamatan.geojson");
        assert_eq!(config.map.default_zoom, 12);
        assert_eq!(config.map.center, [-7.450, 112.640]);
        assert_eq!(config.server, StaticConfig::default());
    }

    #[test]
    fn dataset_paths_join_dir() {
        let data = DataConfig::default();
        assert_eq!(
            data.population_path(),
            PathBuf::from("data/penduduk_kecamatan.geojson")
        );
        assert_eq!(data.road_path(), PathBuf::from("data/jalan_utama.geojson"));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = ServerConfig::from_toml("[map]\ndefault_zoom = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::from_file(Path::new("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{err}");
    }
}
