//! Quiet tracing for test binaries; set `TEST_LOG=debug` to watch a game play out.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the subscriber once per process; later calls are no-ops.
pub fn init() {
    INSTALLED.get_or_init(|| {
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .compact()
            .without_time()
            .try_init();
    });
}
