//! Static studio catalog: studios, their rooms, and the region grouping.
//!
//! The built-in catalog is `config/studios.yaml`, embedded at compile time.
//! [`load_catalog`] reads the same format from disk so a deployment can swap
//! the studio list without a rebuild.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BUILTIN_CATALOG: &str = include_str!("../../../config/studios.yaml");

/// A bookable room inside a studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub url: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioEntry {
    pub name: String,
    pub rooms: Vec<Room>,
}

/// A named geographic grouping of studios used for bulk selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub studios: Vec<String>,
}

/// A studio as returned by the backend's `all-studios` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
    pub url: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub regions: Vec<Region>,
    pub studios: Vec<StudioEntry>,
}

/// A validated studio catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    regions: Vec<Region>,
    studios: Vec<StudioEntry>,
    region_by_studio: HashMap<String, usize>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogFileParse`] on malformed YAML and
    /// [`ConfigError::Validation`] when names are empty, duplicated, or a
    /// region references an unknown studio.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::from_file(file)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `file` is inconsistent.
    pub fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        let region_by_studio = validate_catalog(&file)?;
        Ok(Self {
            regions: file.regions,
            studios: file.studios,
            region_by_studio,
        })
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    #[must_use]
    pub fn studios(&self) -> &[StudioEntry] {
        &self.studios
    }

    #[must_use]
    pub fn studio(&self, name: &str) -> Option<&StudioEntry> {
        self.studios.iter().find(|s| s.name == name)
    }

    /// Name of the region `studio` belongs to, if any.
    #[must_use]
    pub fn region_of(&self, studio: &str) -> Option<&str> {
        self.region_by_studio
            .get(studio)
            .map(|&idx| self.regions[idx].name.as_str())
    }

    /// Every studio that belongs to a region, in region order. This is the
    /// universe the "select all" control works over.
    pub fn selectable_studio_names(&self) -> impl Iterator<Item = &str> {
        self.regions
            .iter()
            .flat_map(|r| r.studios.iter().map(String::as_str))
    }

    /// Studios with no region; searchable by name only.
    pub fn ungrouped_studios(&self) -> impl Iterator<Item = &StudioEntry> {
        self.studios
            .iter()
            .filter(|s| !self.region_by_studio.contains_key(&s.name))
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.studios.iter().map(|s| s.rooms.len()).sum()
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Catalog::from_yaml_str(&content)
}

fn validate_catalog(file: &CatalogFile) -> Result<HashMap<String, usize>, ConfigError> {
    let mut studio_names = HashSet::new();
    let mut room_names = HashSet::new();

    for studio in &file.studios {
        if studio.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "studio name must be non-empty".to_string(),
            ));
        }
        if !studio_names.insert(studio.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate studio name: '{}'",
                studio.name
            )));
        }
        for room in &studio.rooms {
            if room.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "studio '{}' has a room with an empty name",
                    studio.name
                )));
            }
            if !room_names.insert(room.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate room name: '{}'",
                    room.name
                )));
            }
            if !(-90.0..=90.0).contains(&room.lat) || !(-180.0..=180.0).contains(&room.lon) {
                return Err(ConfigError::Validation(format!(
                    "room '{}' has invalid coordinates ({}, {})",
                    room.name, room.lat, room.lon
                )));
            }
        }
    }

    let mut region_names = HashSet::new();
    let mut region_by_studio = HashMap::new();

    for (idx, region) in file.regions.iter().enumerate() {
        let trimmed = region.name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }
        if !region_names.insert(trimmed) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name: '{}'",
                region.name
            )));
        }
        for studio in &region.studios {
            if !studio_names.contains(studio.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "region '{}' references unknown studio '{studio}'",
                    region.name
                )));
            }
            if let Some(prev) = region_by_studio.insert(studio.clone(), idx) {
                return Err(ConfigError::Validation(format!(
                    "studio '{studio}' is listed in both '{}' and '{}'",
                    file.regions[prev].name, region.name
                )));
            }
        }
    }

    Ok(region_by_studio)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
