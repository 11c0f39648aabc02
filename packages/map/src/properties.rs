//! Typed accessors over the `GeoJSON` property bag.
//!
//! Every accessor returns a documented default instead of failing, so a
//! feature with missing or oddly typed properties still renders with zero
//! metrics and the default classification.
//!
//! Strings follow "first non-empty wins" semantics: a present but empty
//! `WADMKK` falls back to `WADMPR` just like an absent one.

use geojson::JsonObject;

/// Sub-region (district) name, also the road name on road features.
pub const NAME: &str = "NAMOBJ";
/// Region (city/regency) name.
pub const REGION: &str = "WADMKK";
/// Province-level name, used as region when [`REGION`] is missing.
pub const REGION_FALLBACK: &str = "WADMPR";
/// Resident count.
pub const POPULATION: &str = "Penduduk";
/// Free-text road type descriptor.
pub const REMARK: &str = "REMARK";
/// Road length in coordinate degrees.
pub const SHAPE_LENGTH: &str = "SHAPE_Leng";

fn non_empty_str<'a>(props: &'a JsonObject, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Reads a numeric property, accepting numbers and numeric strings.
///
/// Missing, null, non-numeric, and non-finite values yield `0`.
fn number(props: &JsonObject, key: &str) -> f64 {
    let value = match props.get(key) {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Region name of a district feature: `WADMKK`, else `WADMPR`, else `""`.
#[must_use]
pub fn region_name(props: &JsonObject) -> &str {
    non_empty_str(props, REGION)
        .or_else(|| non_empty_str(props, REGION_FALLBACK))
        .unwrap_or_default()
}

/// Region name of a road feature: `WADMKK`, else `""`.
///
/// Road datasets carry no province-level fallback.
#[must_use]
pub fn road_region_name(props: &JsonObject) -> &str {
    non_empty_str(props, REGION).unwrap_or_default()
}

/// Sub-region name: `NAMOBJ`, else `""`.
#[must_use]
pub fn sub_region_name(props: &JsonObject) -> &str {
    non_empty_str(props, NAME).unwrap_or_default()
}

/// Resident count: `Penduduk`, else `0`.
#[must_use]
pub fn population(props: &JsonObject) -> f64 {
    number(props, POPULATION)
}

/// Road name: `NAMOBJ`, else `""`.
#[must_use]
pub fn road_name(props: &JsonObject) -> &str {
    non_empty_str(props, NAME).unwrap_or_default()
}

/// Road type descriptor: `REMARK`, else `""`.
#[must_use]
pub fn remark(props: &JsonObject) -> &str {
    non_empty_str(props, REMARK).unwrap_or_default()
}

/// Road length in degrees: `SHAPE_Leng`, else `0`.
#[must_use]
pub fn shape_length(props: &JsonObject) -> f64 {
    number(props, SHAPE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn region_prefers_wadmkk() {
        let p = props(serde_json::json!({ "WADMKK": "Surabaya", "WADMPR": "Jawa Timur" }));
        assert_eq!(region_name(&p), "Surabaya");
    }

    #[test]
    fn region_falls_back_to_wadmpr() {
        let p = props(serde_json::json!({ "WADMPR": "Jawa Timur" }));
        assert_eq!(region_name(&p), "Jawa Timur");

        let p = props(serde_json::json!({ "WADMKK": "", "WADMPR": "Jawa Timur" }));
        assert_eq!(region_name(&p), "Jawa Timur");
    }

    #[test]
    fn road_region_ignores_wadmpr() {
        let p = props(serde_json::json!({ "WADMPR": "Jawa Timur" }));
        assert_eq!(road_region_name(&p), "");
    }

    #[test]
    fn missing_properties_use_defaults() {
        let p = JsonObject::new();
        assert_eq!(region_name(&p), "");
        assert_eq!(sub_region_name(&p), "");
        assert_eq!(road_name(&p), "");
        assert_eq!(remark(&p), "");
        assert!(population(&p).abs() < f64::EPSILON);
        assert!(shape_length(&p).abs() < f64::EPSILON);
    }

    #[test]
    fn population_accepts_numeric_strings() {
        let p = props(serde_json::json!({ "Penduduk": " 45000 " }));
        assert!((population(&p) - 45_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn population_rejects_garbage() {
        for value in [
            serde_json::json!(null),
            serde_json::json!("banyak"),
            serde_json::json!(true),
            serde_json::json!([1, 2]),
        ] {
            let p = props(serde_json::json!({ "Penduduk": value }));
            assert!(population(&p).abs() < f64::EPSILON, "{value}");
        }
    }

    #[test]
    fn non_string_names_default_to_empty() {
        let p = props(serde_json::json!({ "NAMOBJ": 42, "WADMKK": null }));
        assert_eq!(sub_region_name(&p), "");
        assert_eq!(region_name(&p), "");
    }
}
