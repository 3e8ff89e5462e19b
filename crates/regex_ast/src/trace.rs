use crate::ast::Regex;

/// One entry of a derivation history log: source pattern, character derived
/// on, and the (already-simplified) result. Not part of the semantic
/// contract — purely a debugging aid, captured only when a caller opts in.
#[derive(Debug, Clone)]
pub struct DerivationStep {
    pub source: String,
    pub character: char,
    pub result: String,
}

/// Accumulates `DerivationStep`s for a single build/tokenize run. Kept
/// behind a `debug: bool` flag by callers (`DfaBuilder`, `Tokenizer`) so the
/// cost of formatting regex trees is never paid unless debugging is on.
#[derive(Debug, Clone, Default)]
pub struct DerivationTrace {
    steps: Vec<DerivationStep>,
}

impl DerivationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: &Regex, character: char, result: &Regex) {
        self.steps.push(DerivationStep {
            source: source.to_string(),
            character,
            result: result.to_string(),
        });
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }
}
