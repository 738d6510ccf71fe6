use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Where log lines go. Progress normally shares stdout with the final summary;
/// when stdout carries machine-readable output, logs move to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

impl LogTarget {
    pub fn for_output(json_on_stdout: bool) -> Self {
        if json_on_stdout {
            LogTarget::Stderr
        } else {
            LogTarget::Stdout
        }
    }
}

/// Sets up the global tracing subscriber with a fmt formatter and env filter.
///
/// The caller provides a fallback filter string that is used when `RUST_LOG` is
/// not set.
pub fn init_tracing(default_filter: &str, target: LogTarget) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .compact();
    let res = match target {
        LogTarget::Stdout => builder.try_init(),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    res.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
