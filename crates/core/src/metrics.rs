//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - AI operations (query translation, recipe generation)
//! - LLM token usage
//! - Recipe store mutations

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// AI Metrics
// =============================================================================

/// AI operations total by operation and result.
pub static AI_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("recipebook_ai_requests_total", "Total AI operations"),
        &["operation", "result"], // operation: "translate", "generate"; result: "success", "error"
    )
    .unwrap()
});

/// AI operation duration in seconds.
pub static AI_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "recipebook_ai_request_duration_seconds",
            "Duration of AI operations",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["operation"],
    )
    .unwrap()
});

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("recipebook_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Recipe Metrics
// =============================================================================

/// Recipe mutations by operation.
pub static RECIPE_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("recipebook_recipe_mutations_total", "Total recipe mutations"),
        &["operation"], // "create", "update", "delete", "generate"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record one finished AI operation.
pub fn record_ai_request(operation: &str, success: bool, elapsed_secs: f64) {
    let result = if success { "success" } else { "error" };
    AI_REQUESTS.with_label_values(&[operation, result]).inc();
    AI_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(elapsed_secs);
}

/// Record token usage reported by an LLM provider.
pub fn record_llm_tokens(provider: &str, input: u32, output: u32) {
    LLM_TOKENS
        .with_label_values(&[provider, "input"])
        .inc_by(u64::from(input));
    LLM_TOKENS
        .with_label_values(&[provider, "output"])
        .inc_by(u64::from(output));
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(AI_REQUESTS.clone()),
        Box::new(AI_REQUEST_DURATION.clone()),
        Box::new(LLM_TOKENS.clone()),
        Box::new(RECIPE_MUTATIONS.clone()),
    ]
}
