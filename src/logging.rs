use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Our crate at info, everything else at warn. `RUST_LOG` directives are appended.
const DEFAULT_FILTER: &str = "warn,lands_mock=info";

/// Installs a compact stdout `tracing` subscriber. Accepts ecosystem-standard
/// `RUST_LOG` env filters on top of the default.
pub fn init_logging() -> anyhow::Result<()> {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let subscriber = Registry::default()
        .with(EnvFilter::try_new(filter)?)
        .with(fmt::layer().compact().with_target(false));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
