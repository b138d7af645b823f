// print_shop/src/telemetry.rs

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "info,print_shop=debug";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_target(true);

  match format {
    LogFormat::Json => builder.json().try_init(),
    LogFormat::Pretty => builder.try_init(),
  }
  .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
