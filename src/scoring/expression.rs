use super::factors::Symbol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// The template and the generator set are inconsistent. This is a
    /// configuration bug, not a transient condition; the rendered expression
    /// is carried for diagnosis.
    #[error("score expression did not reduce to a single value ({detail}): `{expr}`")]
    MalformedExpression { expr: String, detail: String },

    #[error("iteration count must be at least 1")]
    InvalidIterations,

    #[error("subscription tier must be between 0 and 3, got {tier}")]
    InvalidTier { tier: u8 },
}

/// Immutable product template over factor symbols.
///
/// Evaluation substitutes a value for every term and reduces the product to
/// one scalar; the template itself is never mutated, so it can be reused
/// across any number of samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExpr {
    terms: Vec<Symbol>,
}

impl ScoreExpr {
    pub fn product(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            terms: symbols.into_iter().collect(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.terms
    }

    /// Substitute every term and reduce to a single scalar.
    ///
    /// The bindings must cover the template exactly. A term left unbound or a
    /// binding with no matching term means more (or less) than one residual
    /// atom would survive the reduction, which is fatal.
    pub fn evaluate(&self, bindings: &[(Symbol, u64)]) -> Result<f64, ScoreError> {
        let mut product = 1.0_f64;
        let mut unbound = Vec::new();
        for term in &self.terms {
            match bindings.iter().find(|(symbol, _)| symbol == term) {
                Some((_, value)) => product *= *value as f64,
                None => unbound.push(*term),
            }
        }

        let dangling: Vec<Symbol> = bindings
            .iter()
            .map(|(symbol, _)| *symbol)
            .filter(|symbol| !self.terms.contains(symbol))
            .collect();

        if !unbound.is_empty() || !dangling.is_empty() {
            return Err(ScoreError::MalformedExpression {
                expr: self.render(bindings),
                detail: residual_detail(&unbound, &dangling),
            });
        }

        Ok(product)
    }

    /// Render the template with bound values substituted in, leaving unbound
    /// terms symbolic. Used for error reporting.
    pub fn render(&self, bindings: &[(Symbol, u64)]) -> String {
        self.terms
            .iter()
            .map(|term| {
                match bindings.iter().find(|(symbol, _)| symbol == term) {
                    Some((_, value)) => value.to_string(),
                    None => term.name().to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" * ")
    }
}

fn residual_detail(unbound: &[Symbol], dangling: &[Symbol]) -> String {
    let mut parts = Vec::new();
    if !unbound.is_empty() {
        parts.push(format!("no binding for {}", join_symbols(unbound)));
    }
    if !dangling.is_empty() {
        parts.push(format!("no slot for binding {}", join_symbols(dangling)));
    }
    parts.join("; ")
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|symbol| format!("`{}`", symbol))
        .collect::<Vec<_>>()
        .join(", ")
}
