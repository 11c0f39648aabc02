//! Choropleth bucket and road class classification.
//!
//! The legend is derived from the same constants, so rendered colors and
//! legend swatches cannot drift apart.

use webgis_map_models::{
    Legend, PopulationBucket, PopulationLegendEntry, RoadClass, RoadLegendEntry, RoadStyle,
};

/// Substring marking an arterial road in `REMARK`.
pub const ARTERIAL_MARKER: &str = "Arteri";

/// Substring marking a collector road in `REMARK`.
pub const COLLECTOR_MARKER: &str = "Kolektor";

/// Maps a population to its choropleth bucket.
///
/// Thresholds are strict: a population exactly on a threshold falls into
/// the bucket below it. Non-finite and negative values land in the lowest
/// bucket.
#[must_use]
pub fn population_bucket(population: f64) -> PopulationBucket {
    PopulationBucket::ALL
        .into_iter()
        .find(|bucket| population > bucket.lower_bound())
        .unwrap_or(PopulationBucket::AtMost30k)
}

/// Fill color for a population value.
#[must_use]
pub fn population_color(population: f64) -> &'static str {
    population_bucket(population).color()
}

/// Classifies a road by case-sensitive substring match on its descriptor.
///
/// `Arteri` wins over `Kolektor` when both appear; anything else is local.
#[must_use]
pub fn road_class(remark: &str) -> RoadClass {
    if remark.contains(ARTERIAL_MARKER) {
        RoadClass::Arterial
    } else if remark.contains(COLLECTOR_MARKER) {
        RoadClass::Collector
    } else {
        RoadClass::Local
    }
}

/// Class, color, and line weight for a road descriptor.
#[must_use]
pub fn road_style(remark: &str) -> RoadStyle {
    let class = road_class(remark);
    RoadStyle {
        class,
        color: class.color(),
        weight: class.weight(),
    }
}

/// Legend rows for both layers.
///
/// Population rows ascend by lower bound; each swatch is the color of a
/// value just above that bound.
#[must_use]
pub fn legend() -> Legend {
    let grades: Vec<f64> = PopulationBucket::ALL
        .iter()
        .rev()
        .map(|bucket| bucket.lower_bound())
        .collect();

    let population = grades
        .iter()
        .enumerate()
        .map(|(i, &lower_bound)| PopulationLegendEntry {
            lower_bound,
            upper_bound: grades.get(i + 1).copied(),
            color: population_color(lower_bound + 1.0).to_string(),
        })
        .collect();

    let roads = RoadClass::ALL
        .iter()
        .map(|class| RoadLegendEntry {
            class: *class,
            color: class.color().to_string(),
            label: class.label().to_string(),
        })
        .collect();

    Legend { population, roads }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(population_bucket(100_000.0), PopulationBucket::Over75k);
        assert_eq!(population_bucket(75_000.0), PopulationBucket::Over50k);
        assert_eq!(population_bucket(50_000.0), PopulationBucket::Over40k);
        assert_eq!(population_bucket(40_000.0), PopulationBucket::Over30k);
        assert_eq!(population_bucket(30_000.0), PopulationBucket::AtMost30k);
    }

    #[test]
    fn values_above_thresholds() {
        assert_eq!(population_bucket(100_001.0), PopulationBucket::Over100k);
        assert_eq!(population_bucket(120_000.0), PopulationBucket::Over100k);
        assert_eq!(population_bucket(75_000.5), PopulationBucket::Over75k);
        assert_eq!(population_bucket(45_000.0), PopulationBucket::Over40k);
        assert_eq!(population_bucket(0.0), PopulationBucket::AtMost30k);
        assert_eq!(population_bucket(-5.0), PopulationBucket::AtMost30k);
        assert_eq!(population_bucket(f64::NAN), PopulationBucket::AtMost30k);
    }

    #[test]
    fn colors_match_buckets() {
        assert_eq!(population_color(120_000.0), "#800026");
        assert_eq!(population_color(80_000.0), "#BD0026");
        assert_eq!(population_color(60_000.0), "#E31A1C");
        assert_eq!(population_color(50_000.0), "#FC4E2A");
        assert_eq!(population_color(35_000.0), "#FD8D3C");
        assert_eq!(population_color(10.0), "#FEB24C");
    }

    #[test]
    fn bucket_rank_never_rises_as_population_falls() {
        let mut previous = population_bucket(1_000_000.0);
        let mut population = 1_000_000.0;
        while population >= 0.0 {
            let bucket = population_bucket(population);
            assert!(bucket >= previous, "{population}: {bucket} above {previous}");
            previous = bucket;
            population -= 250.0;
        }
    }

    #[test]
    fn road_classes() {
        assert_eq!(road_class("Jalan Arteri Primer"), RoadClass::Arterial);
        assert_eq!(road_class("Jalan Kolektor"), RoadClass::Collector);
        assert_eq!(road_class(""), RoadClass::Local);
        assert_eq!(road_class("Jalan Lokal"), RoadClass::Local);
    }

    #[test]
    fn road_class_is_case_sensitive_and_prioritized() {
        assert_eq!(road_class("jalan arteri"), RoadClass::Local);
        assert_eq!(road_class("Kolektor menuju Arteri"), RoadClass::Arterial);
        assert_eq!(road_class("Arterial"), RoadClass::Arterial);
    }

    #[test]
    fn road_style_carries_class_constants() {
        let style = road_style("Jalan Arteri Sekunder");
        assert_eq!(style.class, RoadClass::Arterial);
        assert_eq!(style.color, "#FF0000");
        assert_eq!(style.weight, 4);

        let style = road_style("Jalan Setapak");
        assert_eq!(style.color, "#00AA00");
        assert_eq!(style.weight, 2);
    }

    #[test]
    fn legend_matches_classifier() {
        let legend = legend();
        let bounds: Vec<f64> = legend.population.iter().map(|e| e.lower_bound).collect();
        assert_eq!(
            bounds,
            vec![0.0, 30_000.0, 40_000.0, 50_000.0, 75_000.0, 100_000.0]
        );
        assert_eq!(legend.population[0].color, "#FEB24C");
        assert_eq!(legend.population[0].upper_bound, Some(30_000.0));
        assert_eq!(legend.population[5].color, "#800026");
        assert_eq!(legend.population[5].upper_bound, None);

        for entry in &legend.population {
            assert_eq!(entry.color, population_color(entry.lower_bound + 1.0));
        }

        let labels: Vec<&str> = legend.roads.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Arteri", "Kolektor", "Lokal"]);
    }
}
