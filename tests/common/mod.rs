//! Shared helpers for the integration tests
#![allow(dead_code)]

use senml::{Pack, Record};

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pack(records: impl IntoIterator<Item = Record>) -> Pack {
    records.into_iter().collect()
}

pub fn value(name: &str, v: f64) -> Record {
    Record::with_value(name, v)
}
