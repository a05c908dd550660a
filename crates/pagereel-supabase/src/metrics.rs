//! Supabase metrics collection.
//!
//! Standardized metrics for monitoring remote-store operations:
//! - Request counters by operation and status
//! - Latency histograms

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total Supabase requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "supabase_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "supabase_latency_seconds";

    /// Rows returned by list operations, by table.
    pub const ROWS_LISTED_TOTAL: &str = "supabase_rows_listed_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed Supabase request.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    let status_str = status.to_string();

    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status_str
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

// =============================================================================
// Tests
// =============================================================================
