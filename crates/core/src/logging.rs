use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a global fmt subscriber filtered by `RUST_LOG`,
/// with `trackinggt_core=info` as the baseline. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "trackinggt_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
