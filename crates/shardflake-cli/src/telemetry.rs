//! Console logging for the CLI.
//!
//! Logs go to stderr so that stdout carries nothing but minted IDs. The level
//! defaults to `info` and can be changed with `RUST_LOG`, e.g.
//! `RUST_LOG=shardflake=trace` to see every generated ID.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_file(true),
        )
        .try_init()?;

    Ok(())
}
