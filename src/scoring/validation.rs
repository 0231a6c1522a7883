use super::config::SimulationConfig;
use super::engine::MAX_SUB_TIER;

/// Validate simulation settings at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_simulation(config: &SimulationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(iterations) = config.iterations {
        if iterations == 0 {
            errors.push("simulation.iterations: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a tier given on the command line before any sampling starts.
pub fn validate_tier(tier: u8) -> Result<(), Vec<String>> {
    if tier > MAX_SUB_TIER {
        Err(vec![format!(
            "tier: must be between 0 and {MAX_SUB_TIER}, got {tier}"
        )])
    } else {
        Ok(())
    }
}
