//! Tracing initialization for hosts embedding the library.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global `tracing` subscriber writing human-readable lines.
///
/// The log level is read from `RUST_LOG` and defaults to `info`. Search
/// progress is logged at `debug`; per-node events from
/// [`crate::TracingObserver`] appear at `trace`.
///
/// # Panics
///
/// Panics when a global subscriber is already installed. Use
/// [`try_init_tracing`] where that can happen, for example in tests.
pub fn init_tracing() {
    registry_with_filter().init();
}

/// Like [`init_tracing`] but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_init_tracing() -> bool {
    registry_with_filter().try_init().is_ok()
}

fn registry_with_filter() -> impl SubscriberInitExt {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}
