use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Default filter applied on top of `RUST_LOG`.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "finance_tracker=info";

/// Initializes the global tracing subscriber. Logs go to stderr so they never
/// interleave with menu output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_TRACING_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by an embedding program.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}
