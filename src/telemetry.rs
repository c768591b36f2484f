use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the stderr subscriber used by the binaries.
///
/// `RUST_LOG` overrides the default `warn` filter. Output goes to stderr so
/// stdout carries only the exporters' own progress lines.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();
}
