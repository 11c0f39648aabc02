//! Layer composition: turns a dataset and the current filter into the
//! styled features, heatmap points, and bounds handed to the renderer.
//!
//! Every call rebuilds its output from scratch; nothing is cached between
//! calls, so repeated calls with the same inputs return equal results.

use geo::BoundingRect;
use geojson::Geometry;
use serde::Serialize;
use webgis_map_models::{
    Bounds, FilterSelection, HeatPoint, PopulationBucket, RegionPopup, RoadPopup, RoadStyle,
    Selection,
};

use crate::dataset::Dataset;
use crate::{classify, metrics, properties};

/// District outline color.
pub const REGION_BORDER_COLOR: &str = "white";
/// District outline weight in pixels.
pub const REGION_BORDER_WEIGHT: u8 = 2;
/// District outline dash pattern.
pub const REGION_DASH_ARRAY: &str = "3";
/// District outline opacity.
pub const REGION_STROKE_OPACITY: f64 = 1.0;
/// Choropleth fill opacity while the heatmap is hidden.
pub const FILL_OPACITY: f64 = 0.7;
/// Choropleth fill opacity while the heatmap is shown.
pub const HEATMAP_FILL_OPACITY: f64 = 0.9;
/// Road line opacity.
pub const ROAD_OPACITY: f64 = 0.8;
/// Population per unit of heat intensity.
pub const HEAT_INTENSITY_DIVISOR: f64 = 10_000.0;

/// Popup fallback for a district without a name.
pub const UNKNOWN_SUB_REGION_LABEL: &str = "Tidak diketahui";
/// Popup fallback for a district without a region.
pub const UNKNOWN_REGION_LABEL: &str = "-";
/// Popup fallback for a road without a name.
pub const UNNAMED_ROAD_LABEL: &str = "Jalan Tanpa Nama";
/// Popup fallback for a road without a type descriptor.
pub const DEFAULT_ROAD_TYPE_LABEL: &str = "Jalan Lokal";

/// A district feature styled for the choropleth layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledRegion {
    /// Source geometry, `None` if the feature had none.
    pub geometry: Option<Geometry>,
    /// Population bucket.
    pub bucket: PopulationBucket,
    /// Fill color.
    pub color: &'static str,
    /// Outline color.
    pub border_color: &'static str,
    /// Outline weight in pixels.
    pub weight: u8,
    /// Outline dash pattern.
    pub dash_array: &'static str,
    /// Outline opacity.
    pub opacity: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Popup statistics.
    pub popup_fields: RegionPopup,
    /// Hover label, e.g. `"Gubeng (120.000 jiwa)"`.
    pub tooltip_label: String,
}

/// Output of one choropleth/heatmap composition pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionComposition {
    /// Matched districts in dataset order.
    pub styled_features: Vec<StyledRegion>,
    /// One point per matched district with a polygonal geometry.
    pub heat_points: Vec<HeatPoint>,
    /// Number of matched districts.
    pub matched_count: usize,
    /// Bounding box of matched geometries, `None` when there are none.
    pub bounds: Option<Bounds>,
}

/// A road feature styled for the road layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledRoad {
    /// Source geometry, `None` if the feature had none.
    pub geometry: Option<Geometry>,
    /// Class, color, and weight.
    #[serde(flatten)]
    pub style: RoadStyle,
    /// Line opacity.
    pub opacity: f64,
    /// Popup details.
    pub popup_fields: RoadPopup,
}

/// Region filter test.
///
/// Matches by substring, so `"Malang"` also matches `"Kota Malang"`.
#[must_use]
pub fn region_matches(region_name: &str, filter: &Selection) -> bool {
    filter.name().is_none_or(|wanted| region_name.contains(wanted))
}

/// Sub-region filter test (exact match).
#[must_use]
pub fn sub_region_matches(sub_region_name: &str, filter: &Selection) -> bool {
    filter.name().is_none_or(|wanted| sub_region_name == wanted)
}

/// Formats a count with `.` thousands separators, rounding to a whole
/// number (`120000.0` → `"120.000"`).
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let digits = rounded.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value.is_sign_negative() && rounded != "0" {
        out.push('-');
    }

    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(char::from(*digit));
    }

    out
}

fn geometry_bounds(geometry: &Geometry) -> Option<Bounds> {
    let shape: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    shape.bounding_rect().map(|rect| {
        Bounds::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    })
}

fn merge_bounds(acc: Option<Bounds>, next: Option<Bounds>) -> Option<Bounds> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, b) => a.or(b),
    }
}

/// Filters and styles the district dataset for the current selection.
///
/// `heatmap_mode` only affects the fill opacity of the styled features;
/// heat points are always produced so the renderer can show or hide them.
#[must_use]
pub fn compose_regions(
    data: &Dataset,
    selection: &FilterSelection,
    heatmap_mode: bool,
) -> RegionComposition {
    let fill_opacity = if heatmap_mode {
        HEATMAP_FILL_OPACITY
    } else {
        FILL_OPACITY
    };

    let mut composition = RegionComposition::default();

    for feature in data.features() {
        let props = &feature.properties;
        let region = properties::region_name(props);
        let sub_region = properties::sub_region_name(props);

        if !region_matches(region, &selection.region)
            || !sub_region_matches(sub_region, &selection.sub_region)
        {
            continue;
        }

        let population = properties::population(props);
        let area_km2 = feature
            .geometry
            .as_ref()
            .map_or(0.0, |geometry| metrics::area(&geometry.value));
        let bucket = classify::population_bucket(population);

        if let Some((lat, lng)) = feature
            .geometry
            .as_ref()
            .and_then(|geometry| metrics::centroid(&geometry.value))
        {
            composition.heat_points.push(HeatPoint {
                lat,
                lng,
                intensity: population / HEAT_INTENSITY_DIVISOR,
            });
        }

        composition.bounds = merge_bounds(
            composition.bounds,
            feature.geometry.as_ref().and_then(geometry_bounds),
        );

        let name = if sub_region.is_empty() {
            UNKNOWN_SUB_REGION_LABEL
        } else {
            sub_region
        };

        composition.styled_features.push(StyledRegion {
            geometry: feature.geometry.clone(),
            bucket,
            color: bucket.color(),
            border_color: REGION_BORDER_COLOR,
            weight: REGION_BORDER_WEIGHT,
            dash_array: REGION_DASH_ARRAY,
            opacity: REGION_STROKE_OPACITY,
            fill_opacity,
            tooltip_label: format!("{name} ({} jiwa)", format_thousands(population)),
            popup_fields: RegionPopup {
                name: name.to_string(),
                region: if region.is_empty() {
                    UNKNOWN_REGION_LABEL.to_string()
                } else {
                    region.to_string()
                },
                population,
                area_km2,
                density: metrics::density(population, area_km2),
            },
        });
    }

    composition.matched_count = composition.styled_features.len();

    log::debug!(
        "Region filter {}/{}: {} districts, {} heat points",
        selection.region,
        selection.sub_region,
        composition.matched_count,
        composition.heat_points.len()
    );

    composition
}

/// Filters and styles the road dataset for a region.
///
/// Roads are never filtered by sub-region.
#[must_use]
pub fn compose_roads(data: &Dataset, region: &Selection) -> Vec<StyledRoad> {
    let roads: Vec<StyledRoad> = data
        .features()
        .iter()
        .filter(|feature| {
            region_matches(properties::road_region_name(&feature.properties), region)
        })
        .map(|feature| {
            let props = &feature.properties;
            let remark = properties::remark(props);
            let name = properties::road_name(props);

            StyledRoad {
                geometry: feature.geometry.clone(),
                style: classify::road_style(remark),
                opacity: ROAD_OPACITY,
                popup_fields: RoadPopup {
                    name: if name.is_empty() {
                        UNNAMED_ROAD_LABEL
                    } else {
                        name
                    }
                    .to_string(),
                    road_type: if remark.is_empty() {
                        DEFAULT_ROAD_TYPE_LABEL
                    } else {
                        remark
                    }
                    .to_string(),
                    length_km: properties::shape_length(props) * metrics::KM_PER_DEGREE,
                },
            }
        })
        .collect();

    log::debug!("Road filter {region}: {} segments", roads.len());

    roads
}
