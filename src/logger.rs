use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LEVEL: &str = "warn";

/// Filter directive: `RUST_LOG` wins, then the command line, then the config
pub fn filter_directive(rust_log: Option<&str>, cli_level: Option<&str>, config_level: Option<&str>) -> String {
    [rust_log, cli_level, config_level]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber, writing to stderr so logs never mix with
/// command output
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init(cli_level: Option<&str>, config_level: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), cli_level, config_level);

    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {:?} ({}), using {}", directive, e, DEFAULT_LEVEL);
        EnvFilter::new(DEFAULT_LEVEL)
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
