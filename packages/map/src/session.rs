//! Filter/view state machine.
//!
//! [`SessionState`] is an immutable value: every transition produces a new
//! state and the compositions that changed as a result. Callers replace
//! their stored state with [`Transition::state`] wholesale.

use std::path::Path;

use serde::{Deserialize, Serialize};
use webgis_map_models::{FilterSelection, Selection};

use crate::compose::{self, RegionComposition, StyledRoad};
use crate::dataset::Dataset;
use crate::filter_index::FilterIndex;

/// Current filter selection and heatmap visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Region and sub-region selection.
    pub selection: FilterSelection,
    /// Whether the heatmap layer is shown.
    pub heatmap_visible: bool,
}

impl SessionState {
    /// `("all", "all", heatmap hidden)`.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            selection: FilterSelection::all(),
            heatmap_visible: false,
        }
    }

    /// State after `event`, without recomposing anything.
    ///
    /// Selecting a region always resets the sub-region to `"all"`, even if
    /// the previous sub-region also belongs to the new region.
    #[must_use]
    pub fn next(&self, event: &Event) -> Self {
        match event {
            Event::SelectRegion(region) => Self {
                selection: FilterSelection::new(region.clone(), Selection::All),
                heatmap_visible: self.heatmap_visible,
            },
            Event::SelectSubRegion(sub_region) => Self {
                selection: FilterSelection::new(
                    self.selection.region.clone(),
                    sub_region.clone(),
                ),
                heatmap_visible: self.heatmap_visible,
            },
            Event::ToggleHeatmap => Self {
                selection: self.selection.clone(),
                heatmap_visible: !self.heatmap_visible,
            },
            Event::Reset => Self::initial(),
        }
    }
}

/// A user interaction driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// Pick a region (or `"all"`); resets the sub-region.
    SelectRegion(Selection),
    /// Pick a sub-region (or `"all"`) within the current region.
    SelectSubRegion(Selection),
    /// Show or hide the heatmap.
    ToggleHeatmap,
    /// Back to the initial state.
    Reset,
}

impl Event {
    const fn recomposes_roads(&self) -> bool {
        matches!(self, Self::SelectRegion(_) | Self::Reset)
    }

    const fn repopulates_sub_regions(&self) -> bool {
        matches!(self, Self::SelectRegion(_) | Self::Reset)
    }
}

/// Result of a transition.
///
/// Each output is `Some` only if it was recomputed (and, for compositions,
/// its dataset is loaded). Outputs that are `None` are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// The new state.
    pub state: SessionState,
    /// Recomposed districts, heat points, and counts.
    pub regions: Option<RegionComposition>,
    /// Recomposed road features.
    pub roads: Option<Vec<StyledRoad>>,
    /// New options for the sub-region widget.
    pub sub_region_options: Option<Vec<String>>,
}

/// Loaded datasets and the filter index built from them.
///
/// Either dataset may be missing if it failed to load; compositions for a
/// missing dataset are skipped.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    regions: Option<Dataset>,
    roads: Option<Dataset>,
    index: FilterIndex,
}

impl MapData {
    /// Wraps loaded datasets and builds the filter index from the district
    /// dataset.
    #[must_use]
    pub fn new(regions: Option<Dataset>, roads: Option<Dataset>) -> Self {
        let index = regions.as_ref().map(FilterIndex::build).unwrap_or_default();
        Self {
            regions,
            roads,
            index,
        }
    }

    /// Loads both datasets one after the other.
    ///
    /// Each failure is logged once and leaves that dataset unavailable
    /// without affecting the other.
    #[must_use]
    pub fn load(regions_path: &Path, roads_path: &Path) -> Self {
        let regions = Dataset::load_or_log(regions_path);
        let roads = Dataset::load_or_log(roads_path);

        if regions.is_none() && roads.is_none() {
            log::error!("No dataset could be loaded");
        }

        Self::new(regions, roads)
    }

    /// District dataset, if loaded.
    #[must_use]
    pub const fn regions(&self) -> Option<&Dataset> {
        self.regions.as_ref()
    }

    /// Road dataset, if loaded.
    #[must_use]
    pub const fn roads(&self) -> Option<&Dataset> {
        self.roads.as_ref()
    }

    /// Filter index over the district dataset.
    #[must_use]
    pub const fn index(&self) -> &FilterIndex {
        &self.index
    }

    fn compose_regions(&self, state: &SessionState) -> Option<RegionComposition> {
        self.regions.as_ref().map(|data| {
            compose::compose_regions(data, &state.selection, state.heatmap_visible)
        })
    }

    fn compose_roads(&self, state: &SessionState) -> Option<Vec<StyledRoad>> {
        self.roads
            .as_ref()
            .map(|data| compose::compose_roads(data, &state.selection.region))
    }

    /// Every output for `state`, as needed for a first render.
    #[must_use]
    pub fn view(&self, state: &SessionState) -> Transition {
        Transition {
            state: state.clone(),
            regions: self.compose_regions(state),
            roads: self.compose_roads(state),
            sub_region_options: Some(self.index.sub_regions_for(&state.selection.region)),
        }
    }

    /// Applies `event` to `state` and recomposes what it affects.
    ///
    /// Every event recomposes the district layer (the fill opacity depends
    /// on heatmap visibility, so toggling needs fresh output too). Only
    /// region changes and resets touch the road layer and the sub-region
    /// options.
    #[must_use]
    pub fn apply(&self, state: &SessionState, event: &Event) -> Transition {
        let next = state.next(event);
        log::debug!("{event:?}: {state:?} -> {next:?}");

        Transition {
            regions: self.compose_regions(&next),
            roads: if event.recomposes_roads() {
                self.compose_roads(&next)
            } else {
                None
            },
            sub_region_options: if event.repopulates_sub_regions() {
                Some(self.index.sub_regions_for(&next.selection.region))
            } else {
                None
            },
            state: next,
        }
    }

    /// `selectRegion` transition.
    #[must_use]
    pub fn select_region(&self, state: &SessionState, region: Selection) -> Transition {
        self.apply(state, &Event::SelectRegion(region))
    }

    /// `selectSubRegion` transition.
    #[must_use]
    pub fn select_sub_region(&self, state: &SessionState, sub_region: Selection) -> Transition {
        self.apply(state, &Event::SelectSubRegion(sub_region))
    }

    /// `toggleHeatmap` transition.
    #[must_use]
    pub fn toggle_heatmap(&self, state: &SessionState) -> Transition {
        self.apply(state, &Event::ToggleHeatmap)
    }

    /// `reset` transition.
    #[must_use]
    pub fn reset(&self, state: &SessionState) -> Transition {
        self.apply(state, &Event::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Feature;

    fn feature(value: serde_json::Value) -> Feature {
        Feature::from_json(value)
    }

    fn district(region: &str, sub_region: &str, population: u32) -> Feature {
        feature(serde_json::json!({
            "type": "Feature",
            "properties": { "WADMKK": region, "NAMOBJ": sub_region, "Penduduk": population },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            }
        }))
    }

    fn road(region: &str, remark: &str) -> Feature {
        feature(serde_json::json!({
            "type": "Feature",
            "properties": { "WADMKK": region, "REMARK": remark, "SHAPE_Leng": 0.05 },
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
        }))
    }

    fn data() -> MapData {
        MapData::new(
            Some(Dataset::new(vec![
                district("Surabaya", "Gubeng", 120_000),
                district("Surabaya", "Wonokromo", 50_000),
                district("Sidoarjo", "Waru", 45_000),
                district("Sidoarjo", "Gubeng", 1_000),
            ])),
            Some(Dataset::new(vec![
                road("Surabaya", "Jalan Arteri Primer"),
                road("Sidoarjo", "Jalan Kolektor"),
            ])),
        )
    }

    #[test]
    fn initial_state() {
        let state = SessionState::initial();
        assert_eq!(state, SessionState::default());
        assert!(state.selection.region.is_all());
        assert!(state.selection.sub_region.is_all());
        assert!(!state.heatmap_visible);
    }

    #[test]
    fn initial_view_composes_everything() {
        let view = data().view(&SessionState::initial());
        assert_eq!(view.regions.unwrap().matched_count, 4);
        assert_eq!(view.roads.unwrap().len(), 2);
        assert_eq!(
            view.sub_region_options.unwrap(),
            vec!["Gubeng", "Waru", "Wonokromo"]
        );
    }

    #[test]
    fn select_region_recomposes_both_layers() {
        let data = data();
        let t = data.select_region(&SessionState::initial(), Selection::from("Surabaya"));

        assert_eq!(t.state.selection.region, Selection::from("Surabaya"));
        let regions = t.regions.unwrap();
        assert_eq!(regions.matched_count, 2);
        assert_eq!(regions.styled_features[0].color, "#800026");
        assert_eq!(regions.styled_features[1].color, "#FC4E2A");
        assert_eq!(t.roads.unwrap().len(), 1);
        assert_eq!(t.sub_region_options.unwrap(), vec!["Gubeng", "Wonokromo"]);
    }

    #[test]
    fn select_region_always_resets_sub_region() {
        let data = data();
        let state = data
            .select_region(&SessionState::initial(), Selection::from("Surabaya"))
            .state;
        let state = data
            .select_sub_region(&state, Selection::from("Gubeng"))
            .state;
        assert_eq!(state.selection.sub_region, Selection::from("Gubeng"));

        // Gubeng also exists under Sidoarjo, but the selection still resets
        let t = data.select_region(&state, Selection::from("Sidoarjo"));
        assert!(t.state.selection.sub_region.is_all());
        assert_eq!(t.regions.unwrap().matched_count, 2);
    }

    #[test]
    fn select_sub_region_leaves_roads_alone() {
        let data = data();
        let state = data
            .select_region(&SessionState::initial(), Selection::from("Surabaya"))
            .state;
        let t = data.select_sub_region(&state, Selection::from("Wonokromo"));

        assert_eq!(t.regions.unwrap().matched_count, 1);
        assert!(t.roads.is_none());
        assert!(t.sub_region_options.is_none());
    }

    #[test]
    fn unknown_sub_region_matches_nothing() {
        let t = data().select_sub_region(&SessionState::initial(), Selection::from("Atlantis"));
        let regions = t.regions.unwrap();
        assert_eq!(regions.matched_count, 0);
        assert!(regions.heat_points.is_empty());
        assert!(regions.bounds.is_none());
    }

    #[test]
    fn toggle_heatmap_recomposes_with_new_opacity() {
        let data = data();
        let on = data.toggle_heatmap(&SessionState::initial());
        assert!(on.state.heatmap_visible);
        assert!(on.roads.is_none());
        let regions = on.regions.unwrap();
        assert!(
            regions
                .styled_features
                .iter()
                .all(|f| (f.fill_opacity - compose::HEATMAP_FILL_OPACITY).abs() < f64::EPSILON)
        );

        let off = data.toggle_heatmap(&on.state);
        assert!(!off.state.heatmap_visible);
        assert!(
            off.regions
                .unwrap()
                .styled_features
                .iter()
                .all(|f| (f.fill_opacity - compose::FILL_OPACITY).abs() < f64::EPSILON)
        );
    }

    #[test]
    fn toggle_keeps_filter() {
        let data = data();
        let state = data
            .select_region(&SessionState::initial(), Selection::from("Sidoarjo"))
            .state;
        let t = data.toggle_heatmap(&state);
        assert_eq!(t.state.selection, state.selection);
        assert_eq!(t.regions.unwrap().matched_count, 2);
    }

    #[test]
    fn reset_returns_to_initial() {
        let data = data();
        let mut state = SessionState::initial();
        for event in [
            Event::SelectRegion(Selection::from("Surabaya")),
            Event::SelectSubRegion(Selection::from("Gubeng")),
            Event::ToggleHeatmap,
        ] {
            state = data.apply(&state, &event).state;
        }

        let t = data.reset(&state);
        assert_eq!(t.state, SessionState::initial());
        assert_eq!(t, data.view(&SessionState::initial()));
    }

    #[test]
    fn missing_datasets_skip_compositions() {
        let data = MapData::new(None, None);
        let t = data.select_region(&SessionState::initial(), Selection::from("Surabaya"));
        assert!(t.regions.is_none());
        assert!(t.roads.is_none());
        assert_eq!(t.sub_region_options, Some(Vec::new()));
        assert!(data.index().is_empty());
    }

    #[test]
    fn missing_files_load_as_unavailable() {
        let data = MapData::load(Path::new("missing/regions.geojson"), Path::new("missing/roads.geojson"));
        assert!(data.regions().is_none());
        assert!(data.roads().is_none());
    }

    #[test]
    fn event_wire_format() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "type": "select_region",
            "value": "Surabaya"
        }))
        .unwrap();
        assert_eq!(event, Event::SelectRegion(Selection::from("Surabaya")));

        let event: Event =
            serde_json::from_value(serde_json::json!({ "type": "toggle_heatmap" })).unwrap();
        assert_eq!(event, Event::ToggleHeatmap);
    }
}
