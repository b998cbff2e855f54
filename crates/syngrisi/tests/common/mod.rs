// Shared test helpers

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes tracing once per test binary; controlled by RUST_LOG.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
