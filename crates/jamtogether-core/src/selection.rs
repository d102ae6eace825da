//! Studio selection set with studio-, region- and global-level toggles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Region;

/// How the single "select all / clear all" control decides which way to flip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleAllPolicy {
    /// Clear when anything is selected, otherwise select everything.
    #[default]
    ClearIfAny,
    /// Clear only when the selection is exactly the full set.
    ClearIfAll,
}

/// `selected/total` counter shown next to a region header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBadge {
    pub selected: usize,
    pub total: usize,
}

impl RegionBadge {
    #[must_use]
    pub fn is_full(self) -> bool {
        self.selected == self.total
    }
}

impl std::fmt::Display for RegionBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.selected, self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    studios: BTreeSet<String>,
}

impl Selection {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            studios: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, studio: &str) -> bool {
        self.studios.contains(studio)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studios.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.studios.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.studios.iter().map(String::as_str)
    }

    pub fn toggle_studio(&mut self, studio: &str) {
        if !self.studios.remove(studio) {
            self.studios.insert(studio.to_string());
        }
    }

    /// Deselects the whole region when it is fully selected, otherwise adds
    /// every studio of the region. Studios of other regions are untouched.
    pub fn toggle_region(&mut self, region: &Region) {
        if self.is_region_fully_selected(region) {
            for studio in &region.studios {
                self.studios.remove(studio);
            }
        } else {
            self.studios.extend(region.studios.iter().cloned());
        }
    }

    #[must_use]
    pub fn is_region_fully_selected(&self, region: &Region) -> bool {
        region.studios.iter().all(|s| self.studios.contains(s))
    }

    #[must_use]
    pub fn region_badge(&self, region: &Region) -> RegionBadge {
        RegionBadge {
            selected: region
                .studios
                .iter()
                .filter(|s| self.studios.contains(*s))
                .count(),
            total: region.studios.len(),
        }
    }

    /// Replaces the selection with exactly `universe`.
    pub fn select_all<'a, I>(&mut self, universe: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.studios = universe.into_iter().map(str::to_string).collect();
    }

    pub fn clear(&mut self) {
        self.studios.clear();
    }

    /// The combined "clear all / select all" control.
    pub fn toggle_all<'a, I>(&mut self, universe: I, policy: ToggleAllPolicy)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let universe: BTreeSet<String> = universe.into_iter().map(str::to_string).collect();
        let clear = match policy {
            ToggleAllPolicy::ClearIfAny => !self.studios.is_empty(),
            ToggleAllPolicy::ClearIfAll => self.studios == universe,
        };
        if clear {
            self.studios.clear();
        } else {
            self.studios = universe;
        }
    }
}
