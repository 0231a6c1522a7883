pub mod config;
pub mod factors;
pub mod expression;
pub mod engine;
pub mod validation;

pub use config::SimulationConfig;
pub use factors::{build_generators, FactorGenerator, Symbol, ViewerProfile};
pub use expression::{ScoreError, ScoreExpr};
pub use engine::{
    normalize_sample, run_analysis, sample_distribution, DEFAULT_ITERATIONS, MAX_SUB_TIER,
};
pub use validation::{validate_simulation, validate_tier};
