use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "DTR_LOG";

/// Logs go to stderr so tables and JSON on stdout stay clean.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "dtr_core=debug,dtr=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
