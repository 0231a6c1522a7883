use serde::{Deserialize, Serialize};

use super::engine::DEFAULT_ITERATIONS;

/// Simulation section of the config file.
///
/// Both fields are optional and can also be overridden from the command
/// line.
///
/// Example YAML:
/// ```yaml
/// simulation:
///   iterations: 5000
///   seed: 1234
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Samples drawn per configuration (default: 5000)
    #[serde(default)]
    pub iterations: Option<usize>,

    /// Fixed seed for the random source. Omit to seed from entropy, which
    /// makes runs non-reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn effective_iterations(&self) -> usize {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }
}
