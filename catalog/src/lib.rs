#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative plant catalog for the garden planner.
//!
//! The catalog owns every [`PlantProfile`] known to the planner and answers
//! lookups through the [`CatalogOracle`] trait. Profiles come from the
//! built-in table or from a TOML manifest of the form:
//!
//! ```toml
//! version = 1
//!
//! [[plant]]
//! id = "tomato"
//! name = "Tomato"
//! companions = ["basil"]
//! avoid = ["potato"]
//! ```

mod builtin;

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use garden_planner_core::{CatalogOracle, PlantId, PlantProfile};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use self::builtin::BUILTIN_PLANTS;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest file could not be read.
    #[error("failed to read plant catalog at {}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The manifest was not valid TOML or did not match the expected schema.
    #[error("failed to parse plant catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// The manifest declared a version this build does not understand.
    #[error("unsupported plant catalog version {found}, expected {}", SUPPORTED_MANIFEST_VERSION)]
    UnsupportedVersion {
        /// Version found in the manifest.
        found: u32,
    },

    /// Two entries share an identifier.
    #[error("duplicate plant entry for {0}")]
    DuplicatePlant(PlantId),
}

/// In-memory plant table keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    plants: BTreeMap<PlantId, PlantProfile>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog populated with the built-in vegetables and herbs.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (id, name, companions, avoid) in BUILTIN_PLANTS {
            let _ = catalog.insert(
                PlantProfile::new(*id, *name)
                    .with_companions(companions.iter().copied())
                    .with_avoid(avoid.iter().copied()),
            );
        }
        catalog
    }

    /// Builds a catalog from profiles, rejecting duplicate identifiers.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = PlantProfile>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for profile in profiles {
            let id = profile.id().clone();
            if catalog.insert(profile).is_some() {
                return Err(CatalogError::DuplicatePlant(id));
            }
        }
        Ok(catalog)
    }

    /// Parses a TOML manifest.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let manifest: Manifest = toml::from_str(contents)?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: manifest.version,
            });
        }

        let catalog = Self::from_profiles(manifest.plant.into_iter().map(|entry| {
            PlantProfile::new(entry.id, entry.name)
                .with_companions(entry.companions)
                .with_avoid(entry.avoid)
        }))?;
        debug!(plants = catalog.len(), "parsed plant catalog manifest");
        Ok(catalog)
    }

    /// Loads a TOML manifest from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Adds or replaces a profile, returning the profile it displaced.
    pub fn insert(&mut self, profile: PlantProfile) -> Option<PlantProfile> {
        self.plants.insert(profile.id().clone(), profile)
    }

    /// Identifiers of every known plant in sorted order.
    #[must_use]
    pub fn ids(&self) -> impl Iterator<Item = &PlantId> {
        self.plants.keys()
    }

    /// Profiles of every known plant in identifier order.
    #[must_use]
    pub fn profiles(&self) -> impl Iterator<Item = &PlantProfile> {
        self.plants.values()
    }

    /// Number of known plants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Reports whether the catalog holds no plants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl CatalogOracle for Catalog {
    fn lookup(&self, id: &str) -> Option<&PlantProfile> {
        self.plants.get(id)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    plant: Vec<ManifestPlant>,
}

#[derive(Debug, Deserialize)]
struct ManifestPlant {
    id: String,
    name: String,
    #[serde(default)]
    companions: Vec<String>,
    #[serde(default)]
    avoid: Vec<String>,
}
