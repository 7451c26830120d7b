use sonara_ai::tokens::{calculate_cost, get_pricing};
use sonara_core::models::usage::{TokenCount, TokenUsage};

#[test]
fn opus_pricing_is_applied_per_million_tokens() {
    let pricing = get_pricing("us.anthropic.claude-opus-4-6").expect("opus should be priced");
    let usage = calculate_cost(
        TokenCount {
            input: 1_000_000,
            output: 1_000_000,
        },
        &pricing,
    );
    assert!((usage.cost_usd - 90.0).abs() < 1e-9);
}

#[test]
fn unknown_models_have_no_pricing() {
    assert!(get_pricing("some.other.model").is_none());
}

#[test]
fn usage_accumulates_across_calls() {
    let mut total = TokenUsage::default();
    total.accumulate(TokenUsage {
        tokens: TokenCount {
            input: 100,
            output: 50,
        },
        cost_usd: 0.02,
    });
    total.accumulate(TokenUsage {
        tokens: TokenCount {
            input: 300,
            output: 10,
        },
        cost_usd: 0.01,
    });

    assert_eq!(total.tokens.input, 400);
    assert_eq!(total.tokens.output, 60);
    assert!((total.cost_usd - 0.03).abs() < 1e-9);
}
