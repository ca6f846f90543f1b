use std::{
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, Layer};

static IS_TRACING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Crates whose events are shown when `TRACE` is unset or a plain level such as `TRACE=info`.
const DEFAULT_TARGETS: &[&str] =
    &["lock_export", "lock_export_converter", "lock_export_lockfile", "lock_export_workspace"];

/// Install a global subscriber according to the `TRACE` environment variable.
///
/// `TRACE` is either a level (`debug`, `info`, ...) applied to this project's targets,
/// or a full [`EnvFilter`] directive. Without `TRACE`, warnings of this project are still
/// printed to stderr.
pub fn enable_tracing_by_env() {
    if IS_TRACING_ENABLED.swap(true, Ordering::SeqCst) {
        return;
    }

    use tracing_subscriber::{fmt, prelude::*};

    let Ok(trace_var) = std::env::var("TRACE") else {
        tracing_subscriber::registry()
            .with(default_targets(Level::WARN))
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).without_time())
            .init();
        return;
    };

    tracing_subscriber::registry()
        .with(filter_layer(&trace_var))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .init();
    tracing::trace!("enable_tracing_by_env");
}

fn default_targets(level: Level) -> tracing_subscriber::filter::Targets {
    tracing_subscriber::filter::Targets::new()
        .with_targets(DEFAULT_TARGETS.iter().map(|target| (*target, level)))
}

fn filter_layer(trace_var: &str) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync> {
    if let Ok(default_level) = Level::from_str(trace_var) {
        default_targets(default_level).boxed()
    } else {
        EnvFilter::builder()
            .with_regex(true)
            .parse(trace_var)
            .expect("Parse tracing directive syntax failed, for details about the directive syntax you could refer https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives")
            .boxed()
    }
}
