//! Test logging for the engine's unit and integration test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Directive used when neither `TEST_LOG` nor `RUST_LOG` is set.
const DEFAULT_DIRECTIVE: &str = "warn";

fn directive() -> String {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Install a compact subscriber that writes through the test harness, so
/// output is captured per test. Runs once per binary.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter =
            EnvFilter::try_new(directive()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be installed; keep it.
        let _ = fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
