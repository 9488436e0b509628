use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Document store calls by collection, operation and outcome (ok/error).
    pub static ref STORE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fitness_store_operations_total",
        "Document store operations segmented by collection, operation and result",
        &["collection", "operation", "result"]
    )
    .expect("failed to register fitness_store_operations_total");
}

pub fn record_store_operation(collection: &str, operation: &str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[collection, operation, result])
        .inc();
}
