#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the population map server.
//!
//! Composition outputs are serialized straight from the core crate; the
//! types here only cover the envelopes and request bodies around them.

use serde::{Deserialize, Serialize};
use webgis_map_models::{HeatmapStyle, Legend, Selection};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Whether the district dataset loaded.
    pub regions_loaded: bool,
    /// Whether the road dataset loaded.
    pub roads_loaded: bool,
}

/// Initial map viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapConfig {
    /// Map center as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub default_zoom: u8,
}

/// Legend swatches plus heatmap rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLegend {
    /// Population and road legend rows.
    #[serde(flatten)]
    pub legend: Legend,
    /// Heatmap radius, blur, and gradient.
    pub heatmap: HeatmapStyle,
}

/// Query parameters for the sub-region options endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRegionQueryParams {
    /// Region to list sub-regions for (`"all"` when omitted).
    #[serde(default)]
    pub region: Selection,
}

/// Body of `POST /api/select/region`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRegionBody {
    /// Region name or `"all"`.
    pub region: Selection,
}

/// Body of `POST /api/select/sub-region`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSubRegionBody {
    /// Sub-region name or `"all"`.
    pub sub_region: Selection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_region_query_defaults_to_all() {
        let params: SubRegionQueryParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.region.is_all());
    }

    #[test]
    fn select_bodies_are_camel_case() {
        let body: SelectSubRegionBody =
            serde_json::from_value(serde_json::json!({ "subRegion": "Gubeng" })).unwrap();
        assert_eq!(body.sub_region, Selection::from("Gubeng"));

        let body: SelectRegionBody =
            serde_json::from_value(serde_json::json!({ "region": "all" })).unwrap();
        assert!(body.region.is_all());
    }
}
