use tracing_subscriber::EnvFilter;

/// Configure tracing once at application startup for the entire process.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with the debug
/// flag on and `info` without it.
///
/// ```bash
/// RUST_LOG=debug user_store_service
/// RUST_LOG=user_store_service=debug,tower_http=info user_store_service
/// ```
pub fn setup_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
