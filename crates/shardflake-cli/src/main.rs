mod config;
mod telemetry;

use std::io::{self, BufWriter, Write};
use std::sync::Mutex;
use std::thread::scope;

use clap::Parser;
use config::{CliArgs, MintConfig};
use shardflake::{Generator, MonotonicClock};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = MintConfig::try_from(args)?;

    init_telemetry()?;

    let generator = Generator::with_time_source(
        config.shard,
        config.epoch,
        &config.options,
        MonotonicClock::new(),
    )?;
    log_startup_info(&generator, &config);

    let ids = mint(&generator, config.count, config.threads);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for id in ids {
        if config.decode {
            writeln!(
                out,
                "{id}\t{}\tunix_ms={}",
                generator.decode(id),
                generator.timestamp_of(id).as_millis()
            )?;
        } else {
            writeln!(out, "{id}")?;
        }
    }
    out.flush()?;

    tracing::info!(count = config.count, "done");
    Ok(())
}

fn log_startup_info(generator: &Generator, config: &MintConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Minting with full config: {:#?}", config);
    }
    let layout = generator.layout();
    tracing::info!(
        shard = generator.shard(),
        sequence_bits = layout.sequence_bits(),
        shard_bits = layout.shard_bits(),
        timestamp_unit = ?layout.timestamp_unit(),
        lifetime_days = layout.lifetime().as_secs() / 86_400,
        "Minting {} IDs on {} thread(s)",
        config.count,
        config.threads
    );
    if config.count as u64 > layout.max_sequence() {
        tracing::warn!(
            max_sequence = layout.max_sequence(),
            "more IDs requested than fit in one timestamp unit; IDs repeat if minted faster than the clock advances"
        );
    }
}

/// Mints `count` IDs split across `threads` callers, sorted ascending.
fn mint(generator: &Generator, count: usize, threads: usize) -> Vec<i64> {
    let ids = Mutex::new(Vec::with_capacity(count));

    scope(|s| {
        for worker in 0..threads {
            let share = count / threads + usize::from(worker < count % threads);
            let ids = &ids;
            s.spawn(move || {
                let local: Vec<i64> = (0..share).map(|_| generator.next_id()).collect();
                ids.lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .extend(local);
            });
        }
    });

    let mut ids = ids.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardflake::{DEFAULT_EPOCH, GeneratorOption};

    #[test]
    fn mint_splits_work_across_threads() {
        let generator = Generator::with_options(
            1,
            DEFAULT_EPOCH,
            [GeneratorOption::SequenceBits(16), GeneratorOption::ShardBits(2)],
        )
        .unwrap();

        let ids = mint(&generator, 1_001, 4);
        assert_eq!(ids.len(), 1_001);
        assert!(ids.windows(2).all(|w| w[0] <= w[1]));
        assert!(ids.iter().all(|&id| generator.decode(id).shard == 1));
    }
}
