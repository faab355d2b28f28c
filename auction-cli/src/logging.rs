use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostics go to stderr so card output on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let default_filter = if verbose {
        "info,auction_client=debug,auction_cli=debug"
    } else {
        "warn,auction_client=info"
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    tracing::debug!("Logging initialized");
}
