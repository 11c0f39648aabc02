//! Approximate planar metrics for district polygons.
//!
//! Areas use the shoelace formula on raw longitude/latitude coordinates and
//! convert square degrees to square kilometers with a fixed
//! `111 km per degree` factor. This is deliberately not geodesic; the same
//! constant is used for road lengths so figures stay comparable.

use geojson::{PolygonType, Position, Value};

/// Kilometers per coordinate degree.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Square kilometers per square coordinate degree.
pub const KM2_PER_SQUARE_DEGREE: f64 = KM_PER_DEGREE * KM_PER_DEGREE;

/// Returns the `(x, y)` pair of a position, treating missing ordinates as
/// `0`.
fn xy(position: &Position) -> (f64, f64) {
    let x = position.first().copied().unwrap_or_default();
    let y = position.get(1).copied().unwrap_or_default();
    (x, y)
}

/// Area of a single ring in square kilometers.
///
/// Sums consecutive vertex pairs only, so the ring is expected to repeat
/// its first vertex at the end as `GeoJSON` requires. Rings with fewer than
/// two vertices have zero area.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn ring_area(ring: &[Position]) -> f64 {
    let twice_signed: f64 = ring
        .windows(2)
        .map(|pair| {
            let (x0, y0) = xy(&pair[0]);
            let (x1, y1) = xy(&pair[1]);
            x0 * y1 - x1 * y0
        })
        .sum();

    (twice_signed / 2.0).abs() * KM2_PER_SQUARE_DEGREE
}

fn outer_ring(polygon: &PolygonType) -> &[Position] {
    polygon.first().map(Vec::as_slice).unwrap_or_default()
}

/// Approximate area of a geometry in square kilometers.
///
/// Only the outer ring of each polygon counts; holes are ignored. Geometry
/// types other than `Polygon` and `MultiPolygon` have zero area.
#[must_use]
pub fn area(geometry: &Value) -> f64 {
    match geometry {
        Value::Polygon(polygon) => ring_area(outer_ring(polygon)),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|polygon| ring_area(outer_ring(polygon)))
            .sum(),
        _ => 0.0,
    }
}

/// Vertex-average centroid as `(lat, lng)`.
///
/// Averages every vertex of the outer ring of the first polygon, including
/// the closing vertex. This is a placement point for heatmap weights, not an
/// area-weighted centroid. Returns `None` for non-polygonal geometries and
/// empty rings.
#[must_use]
pub fn centroid(geometry: &Value) -> Option<(f64, f64)> {
    let ring = match geometry {
        Value::Polygon(polygon) => outer_ring(polygon),
        Value::MultiPolygon(polygons) => outer_ring(polygons.first()?),
        _ => return None,
    };

    if ring.is_empty() {
        return None;
    }

    let (sum_lng, sum_lat) = ring.iter().map(xy).fold((0.0, 0.0), |(sx, sy), (x, y)| {
        (sx + x, sy + y)
    });

    #[allow(clippy::cast_precision_loss)]
    let count = ring.len() as f64;

    Some((sum_lat / count, sum_lng / count))
}

/// Residents per square kilometer, or `0` when the area is not positive.
#[must_use]
pub fn density(population: f64, area_km2: f64) -> f64 {
    if area_km2 > 0.0 {
        population / area_km2
    } else {
        0.0
    }
}
