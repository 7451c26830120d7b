use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

/// Token usage with its estimated cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TokenUsage {
    pub tokens: TokenCount,
    pub cost_usd: f64,
}

impl TokenUsage {
    /// Fold another call's usage into this one (hybrid and consultation
    /// strategies issue multiple calls per request).
    pub fn accumulate(&mut self, other: TokenUsage) {
        self.tokens.input += other.tokens.input;
        self.tokens.output += other.tokens.output;
        self.cost_usd += other.cost_usd;
    }
}

/// Per-million-token pricing for a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn estimate_cost(&self, tokens: TokenCount) -> f64 {
        (tokens.input as f64 / 1_000_000.0) * self.input_per_million
            + (tokens.output as f64 / 1_000_000.0) * self.output_per_million
    }
}
