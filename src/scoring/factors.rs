use rand::{Rng, RngCore};
use std::fmt;

/// Placeholder naming one factor slot in the score expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(&'static str);

impl Symbol {
    pub const BASE: Symbol = Symbol("base");
    pub const FOLLOW: Symbol = Symbol("follow");
    pub const VIP: Symbol = Symbol("vip");
    pub const SUB: Symbol = Symbol("sub");
    pub const CREDIT: Symbol = Symbol("credit");

    pub const fn new(name: &'static str) -> Self {
        Symbol(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Viewer attributes that select which draw functions get attached to the
/// factor slots. Tier 0 means no subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerProfile {
    pub follower: bool,
    pub vip_or_mod: bool,
    pub sub_tier: u8,
}

/// One multiplicative contributor to the score: a symbol plus the stochastic
/// draw that fills it in per sample. Draws take an explicit RNG handle so
/// runs can be seeded.
pub struct FactorGenerator {
    pub symbol: Symbol,
    draw: Box<dyn Fn(&mut dyn RngCore) -> u64>,
}

impl FactorGenerator {
    pub fn new(symbol: Symbol, draw: impl Fn(&mut dyn RngCore) -> u64 + 'static) -> Self {
        Self {
            symbol,
            draw: Box::new(draw),
        }
    }

    /// Produce one fresh value for this factor. Independent per call.
    pub fn draw(&self, rng: &mut dyn RngCore) -> u64 {
        (self.draw)(rng)
    }
}

impl fmt::Debug for FactorGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorGenerator")
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

/// Assemble the five factor generators for a viewer profile.
///
/// Disabled flags become the multiplicative identity (a constant 1), and a
/// tier-0 sub factor is the empty product, so every profile still binds all
/// five slots.
pub fn build_generators(profile: &ViewerProfile) -> Vec<FactorGenerator> {
    let follower = profile.follower;
    let vip_or_mod = profile.vip_or_mod;
    let tier = u32::from(profile.sub_tier);

    vec![
        FactorGenerator::new(Symbol::BASE, |rng| rng.gen_range(10..=10_000)),
        FactorGenerator::new(Symbol::FOLLOW, move |rng| {
            if follower {
                rng.gen_range(2..=10)
            } else {
                1
            }
        }),
        FactorGenerator::new(Symbol::VIP, move |rng| {
            if vip_or_mod {
                rng.gen_range(2..=10)
            } else {
                1
            }
        }),
        FactorGenerator::new(Symbol::SUB, move |rng| {
            (0..tier).map(|_| rng.gen_range(2..=10)).product()
        }),
        FactorGenerator::new(Symbol::CREDIT, |_| 2),
    ]
}
