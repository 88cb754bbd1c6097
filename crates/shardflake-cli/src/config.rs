use core::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use shardflake::{DEFAULT_EPOCH, GeneratorOptions};

/// Runtime configuration for the `shardflake` binary.
///
/// Every value can come from a CLI flag or an environment variable (a `.env`
/// file in the working directory is loaded first). Layout values are passed
/// to the library unchecked; it reports invalid combinations itself.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shardflake",
    version,
    about = "Mint sortable 64-bit Snowflake-style IDs"
)]
pub struct CliArgs {
    /// Producer id, unique among concurrently running producers.
    ///
    /// Values wider than the shard field wrap; negative values are rejected.
    ///
    /// Environment variable: `SHARD`
    #[arg(long, env = "SHARD", default_value_t = 0, allow_negative_numbers = true)]
    pub shard: i64,

    /// Epoch in milliseconds since 1970-01-01 UTC.
    ///
    /// Defaults to 2023-08-27 15:04:05 UTC.
    ///
    /// Environment variable: `EPOCH_MS`
    #[arg(long, env = "EPOCH_MS", default_value_t = DEFAULT_EPOCH.as_millis() as u64)]
    pub epoch_ms: u64,

    /// Width of the sequence field, in `[1, 16]`.
    ///
    /// Environment variable: `SEQUENCE_BITS`
    #[arg(long, env = "SEQUENCE_BITS")]
    pub sequence_bits: Option<u8>,

    /// Width of the shard field, in `[0, 8]`.
    ///
    /// Environment variable: `SHARD_BITS`
    #[arg(long, env = "SHARD_BITS")]
    pub shard_bits: Option<u8>,

    /// Timestamp granularity in microseconds, in `[1, 1_000_000]`.
    ///
    /// Environment variable: `TIMESTAMP_UNIT_US`
    #[arg(long, env = "TIMESTAMP_UNIT_US")]
    pub timestamp_unit_us: Option<u64>,

    /// JSON file with generator options; flags override its values.
    ///
    /// Example: `{"sequence_bits": 10, "timestamp_unit": {"secs": 0, "nanos": 100000}}`
    ///
    /// Environment variable: `LAYOUT_FILE`
    #[arg(long, env = "LAYOUT_FILE")]
    pub layout_file: Option<String>,

    /// Number of IDs to mint.
    ///
    /// Environment variable: `COUNT`
    #[arg(short = 'n', long, env = "COUNT", default_value_t = 1)]
    pub count: usize,

    /// Number of threads minting concurrently from one generator.
    ///
    /// Environment variable: `THREADS`
    #[arg(long, env = "THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Print each ID with its decoded fields.
    #[arg(short, long, default_value_t = false)]
    pub decode: bool,
}

#[derive(Debug, Clone)]
pub struct MintConfig {
    pub shard: i64,
    pub epoch: Duration,
    pub options: GeneratorOptions,
    pub count: usize,
    pub threads: usize,
    pub decode: bool,
}

impl TryFrom<CliArgs> for MintConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.threads == 0 {
            bail!("THREADS must be greater than 0");
        }

        if args.threads > args.count.max(1) {
            bail!(
                "THREADS ({}) exceeds the number of IDs to mint ({})",
                args.threads,
                args.count
            );
        }

        let mut options = match &args.layout_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read layout file `{path}`"))?;
                serde_json::from_str::<GeneratorOptions>(&raw)
                    .with_context(|| format!("invalid layout file `{path}`"))?
            }
            None => GeneratorOptions::default(),
        };

        if let Some(bits) = args.sequence_bits {
            options.sequence_bits = bits;
        }
        if let Some(bits) = args.shard_bits {
            options.shard_bits = bits;
        }
        if let Some(us) = args.timestamp_unit_us {
            options.timestamp_unit = Duration::from_micros(us);
        }

        Ok(Self {
            shard: args.shard,
            epoch: Duration::from_millis(args.epoch_ms),
            options,
            count: args.count,
            threads: args.threads,
            decode: args.decode,
        })
    }
}
