//! `GeoJSON` `FeatureCollection` validation and loading.
//!
//! Only the top-level shape is validated. Individual features are kept even
//! when their geometry is missing or malformed; such features carry no
//! geometry and contribute zero area, no heat point, and no bounds.

use std::io::Read;
use std::path::Path;

use geojson::{Geometry, JsonObject};

use crate::MapError;

/// A single feature: an optional parsed geometry plus its property bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    /// Parsed geometry, `None` if absent, null, or unparseable.
    pub geometry: Option<Geometry>,
    /// Raw properties (empty if the feature had none).
    pub properties: JsonObject,
}

impl Feature {
    /// Builds a feature from its raw JSON value.
    ///
    /// Never fails: anything that cannot be interpreted is replaced with an
    /// empty default.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut object) = value else {
            log::warn!("Skipping non-object feature payload");
            return Self::default();
        };

        let properties = match object.remove("properties") {
            Some(serde_json::Value::Object(props)) => props,
            _ => JsonObject::new(),
        };

        let geometry = match object.remove("geometry") {
            None | Some(serde_json::Value::Null) => None,
            Some(raw) => match Geometry::from_json_value(raw) {
                Ok(geometry) => Some(geometry),
                Err(e) => {
                    log::warn!(
                        "Feature {:?} has an unreadable geometry: {e}",
                        crate::properties::sub_region_name(&properties)
                    );
                    None
                }
            },
        };

        Self {
            geometry,
            properties,
        }
    }

    /// Builds a feature from properties and an optional geometry value.
    #[must_use]
    pub fn new(properties: JsonObject, geometry: Option<geojson::Value>) -> Self {
        Self {
            geometry: geometry.map(Geometry::new),
            properties,
        }
    }
}

/// An ordered collection of features from one `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    features: Vec<Feature>,
}

impl Dataset {
    /// Wraps already-built features.
    #[must_use]
    pub const fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Validates and converts a parsed `GeoJSON` document.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDatasetFormat`] if the top-level `type` is
    /// not `FeatureCollection` or `features` is not an array.
    pub fn from_json(value: serde_json::Value) -> Result<Self, MapError> {
        let serde_json::Value::Object(mut object) = value else {
            return Err(MapError::InvalidDatasetFormat {
                message: "document is not a JSON object".to_string(),
            });
        };

        match object.get("type").and_then(serde_json::Value::as_str) {
            Some("FeatureCollection") => {}
            Some(other) => {
                return Err(MapError::InvalidDatasetFormat {
                    message: format!("expected type FeatureCollection, found {other}"),
                });
            }
            None => {
                return Err(MapError::InvalidDatasetFormat {
                    message: "missing type field".to_string(),
                });
            }
        }

        let Some(serde_json::Value::Array(raw_features)) = object.remove("features") else {
            return Err(MapError::InvalidDatasetFormat {
                message: "features is not an array".to_string(),
            });
        };

        let features = raw_features.into_iter().map(Feature::from_json).collect();

        Ok(Self { features })
    }

    /// Parses a dataset from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Json`] if the input is not valid JSON, or
    /// [`MapError::InvalidDatasetFormat`] if it is not a `FeatureCollection`.
    pub fn from_reader(reader: impl Read) -> Result<Self, MapError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json(value)
    }

    /// Reads and parses a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the file cannot be opened, otherwise the
    /// same errors as [`Dataset::from_reader`].
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!("Loaded {}: {} features", path.display(), dataset.len());
        Ok(dataset)
    }

    /// Loads a dataset, logging and swallowing any failure.
    ///
    /// A failed dataset is reported once and treated as unavailable so the
    /// other dataset can still render.
    #[must_use]
    pub fn load_or_log(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                None
            }
        }
    }

    /// Features in document order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for Dataset {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
