#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter selection, classification, and heatmap types for the population
//! map.
//!
//! These types form the data contract between the layer composition core
//! and whatever renders its output. The color and weight constants here are
//! the single source of truth for both rendered features and the legend.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The wire value meaning "no filter" for a selection widget.
pub const ALL: &str = "all";

/// One level of the cascading filter: either everything, or a single name.
///
/// Serialized as a plain string, with `"all"` standing for [`Selection::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No filtering at this level.
    #[default]
    All,
    /// Filter to a single region or sub-region name.
    Named(String),
}

impl Selection {
    /// Returns `true` if this selection does not filter anything.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the selected name, or `None` for [`Selection::All`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Named(value)
        }
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => ALL.to_string(),
            Selection::Named(name) => name,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// The region and sub-region currently selected in the cascading filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Region (city/regency) filter, matched by substring.
    pub region: Selection,
    /// Sub-region (district) filter, matched exactly.
    pub sub_region: Selection,
}

impl FilterSelection {
    /// Creates a selection from its two levels.
    #[must_use]
    pub const fn new(region: Selection, sub_region: Selection) -> Self {
        Self { region, sub_region }
    }

    /// The unfiltered selection (`"all"`, `"all"`).
    #[must_use]
    pub const fn all() -> Self {
        Self {
            region: Selection::All,
            sub_region: Selection::All,
        }
    }
}

/// Population bucket used for choropleth fill colors.
///
/// Variants are ordered from the highest bucket to the lowest, matching the
/// order in which thresholds are evaluated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PopulationBucket {
    /// More than 100,000 residents.
    Over100k,
    /// More than 75,000 residents.
    Over75k,
    /// More than 50,000 residents.
    Over50k,
    /// More than 40,000 residents.
    Over40k,
    /// More than 30,000 residents.
    Over30k,
    /// 30,000 residents or fewer.
    AtMost30k,
}

impl PopulationBucket {
    /// All buckets, highest first.
    pub const ALL: [Self; 6] = [
        Self::Over100k,
        Self::Over75k,
        Self::Over50k,
        Self::Over40k,
        Self::Over30k,
        Self::AtMost30k,
    ];

    /// Exclusive lower bound of the bucket. A population must be strictly
    /// greater than this value to land in the bucket.
    #[must_use]
    pub const fn lower_bound(self) -> f64 {
        match self {
            Self::Over100k => 100_000.0,
            Self::Over75k => 75_000.0,
            Self::Over50k => 50_000.0,
            Self::Over40k => 40_000.0,
            Self::Over30k => 30_000.0,
            Self::AtMost30k => 0.0,
        }
    }

    /// Fill color for features in this bucket.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Over100k => "#800026",
            Self::Over75k => "#BD0026",
            Self::Over50k => "#E31A1C",
            Self::Over40k => "#FC4E2A",
            Self::Over30k => "#FD8D3C",
            Self::AtMost30k => "#FEB24C",
        }
    }
}

/// Road classification derived from a road's `REMARK` descriptor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoadClass {
    /// Arterial road (`Arteri`).
    Arterial,
    /// Collector road (`Kolektor`).
    Collector,
    /// Anything else.
    Local,
}

impl RoadClass {
    /// All road classes in legend order.
    pub const ALL: [Self; 3] = [Self::Arterial, Self::Collector, Self::Local];

    /// Line color for this class.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Arterial => "#FF0000",
            Self::Collector => "#0000FF",
            Self::Local => "#00AA00",
        }
    }

    /// Line weight in pixels.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Arterial => 4,
            Self::Collector => 3,
            Self::Local => 2,
        }
    }

    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Arterial => "Arteri",
            Self::Collector => "Kolektor",
            Self::Local => "Lokal",
        }
    }
}

/// Resolved styling for a road feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadStyle {
    /// Road class.
    pub class: RoadClass,
    /// Line color.
    pub color: &'static str,
    /// Line weight in pixels.
    pub weight: u8,
}

/// A weighted point for the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Heat weight (population / 10,000).
    pub intensity: f64,
}

/// Geographic bounding rectangle, used by the renderer to auto-fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl Bounds {
    /// Creates a new bounding rectangle from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }
}

/// Popup statistics for a region feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPopup {
    /// Sub-region (district) name.
    pub name: String,
    /// Owning region (city/regency) name.
    pub region: String,
    /// Resident count.
    pub population: f64,
    /// Approximate planar area in square kilometers.
    pub area_km2: f64,
    /// Residents per square kilometer.
    pub density: f64,
}

/// Popup details for a road feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadPopup {
    /// Road name.
    pub name: String,
    /// Free-text road type descriptor.
    #[serde(rename = "type")]
    pub road_type: String,
    /// Approximate length in kilometers.
    pub length_km: f64,
}

/// A population legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationLegendEntry {
    /// Lower bound shown for the row.
    pub lower_bound: f64,
    /// Upper bound shown for the row (`None` for the open-ended top row).
    pub upper_bound: Option<f64>,
    /// Fill color.
    pub color: String,
}

/// A road legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadLegendEntry {
    /// Road class.
    pub class: RoadClass,
    /// Line color.
    pub color: String,
    /// Display label.
    pub label: String,
}

/// Legend data for both layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Population rows, ascending by lower bound.
    pub population: Vec<PopulationLegendEntry>,
    /// Road rows.
    pub roads: Vec<RoadLegendEntry>,
}

/// Heatmap rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapStyle {
    /// Point radius in pixels.
    pub radius: u32,
    /// Blur radius in pixels.
    pub blur: u32,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u8,
    /// Intensity mapped to the top of the gradient.
    pub max: f64,
    /// Gradient stops as `(position, color)`, ascending.
    pub gradient: Vec<(f64, String)>,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        let stops = [0.0, 0.3, 0.5, 0.7, 0.9, 1.0];
        let gradient = stops
            .into_iter()
            .zip(PopulationBucket::ALL.iter().rev())
            .map(|(stop, bucket)| (stop, bucket.color().to_string()))
            .collect();

        Self {
            radius: 25,
            blur: 35,
            max_zoom: 13,
            max: 10.0,
            gradient,
        }
    }
}
