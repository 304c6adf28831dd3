use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{prelude::*, registry::Registry, EnvFilter};

const DEFAULT_FILTER: &str = "OFF,snake_world=INFO";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling it more than once is a no-op.
pub fn init() {
    if LogTracer::init().is_err() {
        return;
    }

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::Layer::default();
    let subscriber = Registry::default().with(filter_layer).with(fmt_layer);

    if let Err(err) = set_global_default(subscriber) {
        eprintln!("Unable to install tracing subscriber: {}", err);
    }
}
