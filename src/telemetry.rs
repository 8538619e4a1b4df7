use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the JSON log subscriber. Safe to call more than once; only the
/// first call installs anything.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

/// Test logging: `TEST_LOG` first, then `RUST_LOG`, then `warn`.
pub fn init_test_tracing() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_owned());

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .without_time()
        .try_init();
}
