use rand::RngCore;

use super::expression::{ScoreError, ScoreExpr};
use super::factors::{build_generators, FactorGenerator, Symbol, ViewerProfile};

/// Samples per configuration unless overridden by config or CLI.
pub const DEFAULT_ITERATIONS: usize = 5000;

/// Highest subscription tier. Tier 0 means no subscription.
pub const MAX_SUB_TIER: u8 = 3;

/// Draw every generator once, evaluate the product, and repeat `iterations`
/// times. Returns the sample array sorted ascending, each value normalized
/// to an integer magnitude.
///
/// The generator set must bind the template's symbols exactly; a mismatch is
/// rejected before any sampling happens.
pub fn sample_distribution(
    expr: &ScoreExpr,
    iterations: usize,
    generators: &[FactorGenerator],
    rng: &mut dyn RngCore,
) -> Result<Vec<u64>, ScoreError> {
    if iterations == 0 {
        return Err(ScoreError::InvalidIterations);
    }
    check_consistency(expr, generators)?;

    let mut raw = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let bindings: Vec<(Symbol, u64)> = generators
            .iter()
            .map(|generator| (generator.symbol, generator.draw(rng)))
            .collect();
        raw.push(expr.evaluate(&bindings)?);
    }

    raw.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(raw.into_iter().map(normalize_sample).collect())
}

/// Collapse a raw sample to an integer magnitude: no fractional digits
/// survive, rounding to the nearest integer. Idempotent on values that are
/// already integral.
pub fn normalize_sample(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

/// Every generator must bind a distinct symbol, and the bound set must equal
/// the template's symbol set. Checked once, before the sampling loop, so a
/// bad configuration fails with no partial results.
fn check_consistency(expr: &ScoreExpr, generators: &[FactorGenerator]) -> Result<(), ScoreError> {
    let mut bound: Vec<Symbol> = Vec::with_capacity(generators.len());
    for generator in generators {
        if bound.contains(&generator.symbol) {
            return Err(ScoreError::MalformedExpression {
                expr: expr.render(&[]),
                detail: format!("`{}` is bound by more than one generator", generator.symbol),
            });
        }
        bound.push(generator.symbol);
    }

    for symbol in &bound {
        if !expr.symbols().contains(symbol) {
            return Err(ScoreError::MalformedExpression {
                expr: expr.render(&[]),
                detail: format!("generator `{symbol}` has no slot in the expression"),
            });
        }
    }
    for symbol in expr.symbols() {
        if !bound.contains(symbol) {
            return Err(ScoreError::MalformedExpression {
                expr: expr.render(&[]),
                detail: format!("no generator binds `{symbol}`"),
            });
        }
    }
    Ok(())
}

/// The core entry point: build the five factor generators for a profile,
/// form their product expression, and sample the score distribution.
pub fn run_analysis(
    profile: &ViewerProfile,
    iterations: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<u64>, ScoreError> {
    if profile.sub_tier > MAX_SUB_TIER {
        return Err(ScoreError::InvalidTier {
            tier: profile.sub_tier,
        });
    }

    let generators = build_generators(profile);
    let expr = ScoreExpr::product(generators.iter().map(|generator| generator.symbol));
    sample_distribution(&expr, iterations, &generators, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn profile(follower: bool, vip_or_mod: bool, sub_tier: u8) -> ViewerProfile {
        ViewerProfile {
            follower,
            vip_or_mod,
            sub_tier,
        }
    }

    #[test]
    fn test_returns_requested_length_sorted_ascending() {
        let mut rng = rng();
        let samples = run_analysis(&profile(true, true, 2), DEFAULT_ITERATIONS, &mut rng).unwrap();
        assert_eq!(samples.len(), DEFAULT_ITERATIONS);
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_identity_configuration_stays_in_base_times_credit_range() {
        let mut rng = rng();
        let samples = run_analysis(&profile(false, false, 0), DEFAULT_ITERATIONS, &mut rng).unwrap();
        // base in [10, 10000], credit fixed at 2, everything else identity
        assert!(samples.iter().all(|&s| (20..=20_000).contains(&s)));
    }

    #[test]
    fn test_follower_flag_raises_the_minimum() {
        let mut rng = rng();
        let samples = run_analysis(&profile(true, false, 0), DEFAULT_ITERATIONS, &mut rng).unwrap();
        // the follow draw is at least 2, so the floor doubles from 20 to 40
        assert!(samples[0] >= 40);
    }

    #[test]
    fn test_tier_scaling_raises_min_and_max() {
        let mut rng = rng();
        let iterations = 20_000;
        let mut previous: Option<(u64, u64)> = None;
        for tier in 0..=MAX_SUB_TIER {
            let samples = run_analysis(&profile(false, false, tier), iterations, &mut rng).unwrap();
            let bounds = (samples[0], samples[samples.len() - 1]);
            if let Some((prev_min, prev_max)) = previous {
                assert!(bounds.0 >= prev_min, "tier {tier} min regressed");
                assert!(bounds.1 >= prev_max, "tier {tier} max regressed");
            }
            previous = Some(bounds);
        }
    }

    #[test]
    fn test_zero_iterations_rejected_before_sampling() {
        let mut rng = rng();
        let err = run_analysis(&profile(false, false, 0), 0, &mut rng).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidIterations));
    }

    #[test]
    fn test_out_of_range_tier_rejected() {
        let mut rng = rng();
        let err = run_analysis(&profile(false, false, 4), 10, &mut rng).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidTier { tier: 4 }));
    }

    #[test]
    fn test_normalize_rounds_to_nearest_integer() {
        assert_eq!(normalize_sample(199.4), 199);
        assert_eq!(normalize_sample(199.5), 200);
        assert_eq!(normalize_sample(20_000.0), 20_000);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for value in [0.0, 1.0, 199.6, 20_000.0, 1.9e9] {
            let once = normalize_sample(value);
            assert_eq!(normalize_sample(once as f64), once);
        }
    }

    #[test]
    fn test_generator_without_slot_is_malformed() {
        let mut rng = rng();
        let generators = vec![
            FactorGenerator::new(Symbol::BASE, |_| 100),
            FactorGenerator::new(Symbol::CREDIT, |_| 2),
        ];
        // template omits the credit slot
        let expr = ScoreExpr::product([Symbol::BASE]);
        let err = sample_distribution(&expr, 10, &generators, &mut rng).unwrap_err();
        match err {
            ScoreError::MalformedExpression { detail, .. } => {
                assert!(detail.contains("`credit`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_symbol_binding_is_malformed() {
        let mut rng = rng();
        // the collision the five-slot design exists to rule out: two
        // generators contending for one placeholder
        let generators = vec![
            FactorGenerator::new(Symbol::BASE, |_| 100),
            FactorGenerator::new(Symbol::BASE, |_| 5),
        ];
        let expr = ScoreExpr::product([Symbol::BASE]);
        let err = sample_distribution(&expr, 10, &generators, &mut rng).unwrap_err();
        match err {
            ScoreError::MalformedExpression { detail, .. } => {
                assert!(detail.contains("more than one generator"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unbound_template_symbol_is_malformed() {
        let mut rng = rng();
        let generators = vec![FactorGenerator::new(Symbol::BASE, |_| 100)];
        let expr = ScoreExpr::product([Symbol::BASE, Symbol::VIP]);
        let err = sample_distribution(&expr, 10, &generators, &mut rng).unwrap_err();
        match err {
            ScoreError::MalformedExpression { detail, .. } => {
                assert!(detail.contains("no generator binds `vip`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scripted_draws_produce_exact_distribution() {
        let mut rng = rng();
        let base_values = RefCell::new(vec![100_u64, 5000, 9999]);
        let generators = vec![
            FactorGenerator::new(Symbol::BASE, move |_| base_values.borrow_mut().remove(0)),
            FactorGenerator::new(Symbol::FOLLOW, |_| 1),
            FactorGenerator::new(Symbol::VIP, |_| 1),
            FactorGenerator::new(Symbol::SUB, |_| 1),
            FactorGenerator::new(Symbol::CREDIT, |_| 2),
        ];
        let expr = ScoreExpr::product(generators.iter().map(|g| g.symbol));
        let samples = sample_distribution(&expr, 3, &generators, &mut rng).unwrap();
        assert_eq!(samples, vec![200, 10_000, 19_998]);
    }
}
