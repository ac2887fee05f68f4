#![doc(test(attr(deny(warnings))))]

//! Finance Core offers the ledger store, derived-metrics engine, and
//! persistence primitives that power a personal finance tracker UI.

pub mod errors;
pub mod export;
pub mod ledger;
pub mod metrics;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
