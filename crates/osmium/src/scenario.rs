//! Scenario files
//!
//! Every demo can be fed from a JSON file instead of the built-in sample.
//! The shapes here mirror the arguments of the corresponding `osmium-core`
//! entry points one-to-one, so a scenario is nothing more than serialized
//! input. All validation stays in the core; this module only reads and
//! parses.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input for the deadlock detection demo
///
/// Matrices are indexed `[process][resource]`, matching the row and column
/// order of the `processes` and `resources` lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlockScenario
{
    /// Process names, row order for both matrices
    pub processes: Vec<String>,
    /// Resource names, column order for both matrices
    pub resources: Vec<String>,
    /// Declared total units per resource
    pub totals: Vec<i64>,
    /// Currently held units, one row per process
    pub allocation: Vec<Vec<i64>>,
    /// Outstanding claims, one row per process
    pub request: Vec<Vec<i64>>,
}

/// Input for the page replacement demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingScenario
{
    /// Page reference string, replayed in order
    pub reference: Vec<u64>,
    /// Number of physical frames
    pub capacity: usize,
}

/// Input for the CPU scheduling demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingScenario
{
    /// The process batch, ties break by list order
    pub processes: Vec<ProcessEntry>,
    /// Time quantum for round robin runs
    #[serde(default = "default_quantum")]
    pub quantum: u64,
}

/// One process in a scheduling scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEntry
{
    /// Display name
    pub name: String,
    /// Tick at which the process becomes runnable
    pub arrival: u64,
    /// CPU ticks the process needs in total
    pub burst: u64,
}

/// Input for the memory allocation demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryScenario
{
    /// Fixed partition sizes, in address order
    pub blocks: Vec<u64>,
    /// Demands in arrival order
    pub demands: Vec<DemandEntry>,
}

/// One demand in a memory scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandEntry
{
    /// Requesting process
    pub process: String,
    /// Units of memory wanted
    pub size: u64,
}

const fn default_quantum() -> u64
{
    2
}

/// Failures while reading a scenario file
#[derive(Debug, Error)]
pub enum ScenarioError
{
    /// The file could not be read
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for this scenario shape
    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a scenario of any shape from a JSON file
///
/// ## Errors
///
/// [`ScenarioError::Io`] when the file cannot be read and
/// [`ScenarioError::Parse`] when its contents do not deserialize into `T`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ScenarioError>
{
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
