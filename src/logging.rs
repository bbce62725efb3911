use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The default level is `INFO`; `RUST_LOG` overrides it. Output goes to
/// stderr so stdout stays free for the terminal UI and result lines.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
