//! Scenario files: initial world layouts in TOML.
//!
//! ```toml
//! name = "riverside"
//! max_q = 7
//! max_r = 7
//! dt = 0.5
//! ticks = 200
//!
//! [[tiles]]
//! kind = "farm"
//! q = 2
//! r = 3
//!
//! [[people]]
//! q = 2
//! r = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::WorldError;
use crate::world::{HexCoord, ModelType, PEOPLE_MAX, Rotation, TileType, World};

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_ticks() -> u64 {
    600
}

fn default_people_max() -> usize {
    PEOPLE_MAX
}

fn default_person_model() -> ModelType {
    ModelType::Agent
}

/// Failure to load or validate a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid scenario TOML.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    /// The scenario parsed but describes an unusable world.
    #[error("invalid scenario: {0}")]
    Validation(String),
    /// The world could not be built.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// A structure to place when the world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TilePlacement {
    /// Structure type, by lower-case name.
    pub kind: TileType,
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
    /// Rotation step; wrapped into `0..6`.
    #[serde(default)]
    pub rotation: i32,
}

/// A person to add when the world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonPlacement {
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
    /// Visual identity.
    #[serde(default = "default_person_model")]
    pub model: ModelType,
}

/// A complete scenario description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Grid extent along q.
    pub max_q: u16,
    /// Grid extent along r.
    pub max_r: u16,
    /// Seconds simulated per update.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Number of updates to run.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Population capacity.
    #[serde(default = "default_people_max")]
    pub people_max: usize,
    /// Structures placed in order.
    #[serde(default)]
    pub tiles: Vec<TilePlacement>,
    /// People added in order, after every structure.
    #[serde(default)]
    pub people: Vec<PersonPlacement>,
}

/// Placements that were rejected while building a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Structures placed.
    pub tiles_placed: usize,
    /// Structures rejected.
    pub tiles_rejected: usize,
    /// People added.
    pub people_added: usize,
    /// People rejected.
    pub people_rejected: usize,
}

impl BuildReport {
    /// Whether every placement succeeded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.tiles_rejected == 0 && self.people_rejected == 0
    }
}

impl Scenario {
    /// Read and validate a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::parse(&text)?;
        tracing::info!(name = %scenario.name, path = %path.display(), "scenario loaded");
        Ok(scenario)
    }

    /// Parse and validate scenario TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid scenario TOML or fails
    /// validation.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the scenario describes a usable world.
    ///
    /// Placements are not checked here; out-of-range or unsupported ones
    /// are rejected one by one when the world is built.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Validation`] for empty extents or a negative
    /// or non-finite `dt`.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::Validation(
                "scenario must define a name".to_string(),
            ));
        }
        if self.max_q == 0 || self.max_r == 0 {
            return Err(ScenarioError::Validation(format!(
                "grid extents must be positive, got {}x{}",
                self.max_q, self.max_r
            )));
        }
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(ScenarioError::Validation(format!(
                "dt must be a non-negative number, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    /// Build the initial world.
    ///
    /// Rejected placements are reported through the log and counted in the
    /// returned [`BuildReport`]; they do not stop the build.
    ///
    /// # Errors
    ///
    /// Returns an error only if world storage cannot be allocated.
    pub fn build_world(&self) -> Result<(World, BuildReport), ScenarioError> {
        let mut world = World::with_people_capacity(self.max_q, self.max_r, self.people_max)?;
        let mut report = BuildReport::default();

        for tile in &self.tiles {
            let coord = HexCoord::new(tile.q, tile.r);
            match world.add_tile(tile.kind, Rotation::new(tile.rotation), coord) {
                Ok(()) => report.tiles_placed += 1,
                Err(_) => report.tiles_rejected += 1,
            }
        }

        for person in &self.people {
            match world.add_person(person.model, HexCoord::new(person.q, person.r)) {
                Ok(_) => report.people_added += 1,
                Err(_) => report.people_rejected += 1,
            }
        }

        tracing::info!(
            name = %self.name,
            tiles = report.tiles_placed,
            people = report.people_added,
            rejected = report.tiles_rejected + report.people_rejected,
            "world built"
        );
        Ok((world, report))
    }
}
