pub mod paths;
pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber, filtered by `RUST_LOG` on top of `bookkeeping_core=info`.
///
/// Leaves an already installed subscriber in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        let filter = match "bookkeeping_core=info".parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        };

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
