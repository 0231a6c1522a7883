use serde::{Deserialize, Serialize};

use crate::scoring::SimulationConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
}
