#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cascading filter index, geometry metrics, and layer composition for the
//! population map.
//!
//! Takes the district population and main road `GeoJSON` datasets, builds
//! the region/sub-region filter index once, and recomposes the styled
//! choropleth features, heatmap points, and road features on every filter
//! or view change. Everything here is synchronous and free of I/O apart
//! from [`dataset::Dataset::load`].

pub mod classify;
pub mod compose;
pub mod dataset;
pub mod filter_index;
pub mod metrics;
pub mod properties;
pub mod session;

use thiserror::Error;

/// Errors that can occur while loading map datasets.
#[derive(Debug, Error)]
pub enum MapError {
    /// The document is not a `GeoJSON` `FeatureCollection`.
    #[error("Invalid GeoJSON dataset: {message}")]
    InvalidDatasetFormat {
        /// Description of what went wrong.
        message: String,
    },

    /// Reading the dataset file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
