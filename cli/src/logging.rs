use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr. `RUST_LOG` wins over `verbose`, which raises the default
/// level from `warn` to `debug`.
pub fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
