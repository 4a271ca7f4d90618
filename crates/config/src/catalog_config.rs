//! `[catalog]` section: paging, listing sizes and search tuning

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sort names accepted for `catalog.default_sort`
pub const SORT_NAMES: [&str; 6] = ["rating", "popular", "updated", "new", "title", "chapters"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Titles per page in catalog listings
    pub items_per_page: usize,

    /// Maximum rows in the search-as-you-type dropdown
    pub search_result_limit: usize,

    /// Quiet period before a typed query runs
    pub search_debounce_ms: u64,

    /// Queries shorter than this (in characters) return nothing
    pub min_search_len: usize,

    /// Size of the popular / recently updated / top rated rails
    pub default_listing_limit: usize,

    pub default_sort: String,
}

impl CatalogConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: 20,
            search_result_limit: 5,
            search_debounce_ms: 300,
            min_search_len: 2,
            default_listing_limit: 10,
            default_sort: "updated".to_string(),
        }
    }
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors([
            Validator::in_range(self.items_per_page, 1, 200, "catalog.items_per_page"),
            Validator::in_range(self.search_result_limit, 1, 50, "catalog.search_result_limit"),
            Validator::in_range(self.search_debounce_ms, 0, 5000, "catalog.search_debounce_ms"),
            Validator::in_range(self.min_search_len, 1, 10, "catalog.min_search_len"),
            Validator::in_range(
                self.default_listing_limit,
                1,
                100,
                "catalog.default_listing_limit",
            ),
            Validator::one_of(&self.default_sort.as_str(), &SORT_NAMES, "catalog.default_sort"),
        ])
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn section_name(&self) -> &'static str {
        "catalog"
    }
}
