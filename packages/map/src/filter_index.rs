//! Region → sub-region index backing the cascading filter widgets.
//!
//! Built once from the full, unfiltered district dataset. Each region keeps
//! its sub-regions in first-seen order without duplicates; every query that
//! feeds a widget returns names sorted alphabetically.

use std::collections::BTreeMap;

use webgis_map_models::Selection;

use crate::dataset::Dataset;
use crate::properties;

/// Mapping between regions and the sub-regions they contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterIndex {
    /// region name -> sub-region names in first-seen order
    regions: BTreeMap<String, Vec<String>>,
    /// sub-region name -> owning region name (last seen wins)
    owners: BTreeMap<String, String>,
}

impl FilterIndex {
    /// Builds the index in a single pass over the district features.
    ///
    /// Features without a region name contribute nothing to the index (they
    /// stay in the dataset). Features without a sub-region name register
    /// their region only.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self::default();

        for feature in dataset.features() {
            let region = properties::region_name(&feature.properties);
            if region.is_empty() {
                continue;
            }

            let sub_region = properties::sub_region_name(&feature.properties);
            index.insert(region, sub_region);
        }

        log::info!(
            "Filter index: {} regions, {} sub-regions",
            index.regions.len(),
            index.owners.len()
        );

        index
    }

    fn insert(&mut self, region: &str, sub_region: &str) {
        let members = self.regions.entry(region.to_string()).or_default();

        if sub_region.is_empty() {
            return;
        }

        if !members.iter().any(|existing| existing == sub_region) {
            members.push(sub_region.to_string());
        }

        if let Some(previous) = self
            .owners
            .insert(sub_region.to_string(), region.to_string())
            .filter(|previous| previous != region)
        {
            log::debug!("Sub-region {sub_region:?} moved from {previous:?} to {region:?}");
        }
    }

    /// All region names, sorted.
    #[must_use]
    pub fn regions_sorted(&self) -> Vec<String> {
        self.regions.keys().cloned().collect()
    }

    /// Sub-region names to offer for a region selection, sorted.
    ///
    /// [`Selection::All`] lists every sub-region in the dataset. An unknown
    /// region yields an empty list.
    #[must_use]
    pub fn sub_regions_for(&self, region: &Selection) -> Vec<String> {
        match region {
            Selection::All => self.owners.keys().cloned().collect(),
            Selection::Named(name) => {
                let mut names = self.regions.get(name).cloned().unwrap_or_default();
                names.sort();
                names
            }
        }
    }

    /// Sub-regions of a region in first-seen order.
    #[must_use]
    pub fn members(&self, region: &str) -> Option<&[String]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    /// Region that owns a sub-region.
    #[must_use]
    pub fn region_of(&self, sub_region: &str) -> Option<&str> {
        self.owners.get(sub_region).map(String::as_str)
    }

    /// Number of distinct regions.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no region was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
