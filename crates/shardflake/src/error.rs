use core::time::Duration;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A configuration was rejected while building a generator.
///
/// This is the only error `shardflake` produces. Once a [`Generator`] exists,
/// generating IDs is infallible, so every variant here surfaces from
/// construction only. Retrying with the same inputs will fail the same way.
///
/// Out-of-range shard ids are *not* an error: they are wrapped into the shard
/// field. Only negative shard ids are rejected.
///
/// [`Generator`]: crate::Generator
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The sequence field width is outside `[1, 16]`.
    #[error("invalid options: sequence bits ({bits}) must be in range [{min}, {max}]", min = crate::MIN_SEQUENCE_BITS, max = crate::MAX_SEQUENCE_BITS)]
    InvalidSequenceBits { bits: u8 },

    /// The timestamp granularity is outside `[1µs, 1s]`.
    #[error("invalid options: timestamp unit ({unit:?}) must be in range [{min:?}, {max:?}]", min = crate::MIN_TIMESTAMP_UNIT, max = crate::MAX_TIMESTAMP_UNIT)]
    InvalidTimestampUnit { unit: Duration },

    /// The shard field width is outside `[0, 8]`.
    #[error("invalid options: shard bits ({bits}) must be in range [0, {max}]", max = crate::MAX_SHARD_BITS)]
    InvalidShardBits { bits: u8 },

    /// The shard id is negative.
    #[error("shard ({shard}) cannot be negative")]
    NegativeShard { shard: i64 },

    /// Shard and sequence fields together leave fewer than 44 timestamp bits.
    #[error("invalid options: shard bits ({shard_bits}) + sequence bits ({sequence_bits}) must be less than {limit}", limit = crate::MAX_LOW_BITS)]
    LayoutTooWide { shard_bits: u8, sequence_bits: u8 },

    /// The epoch lies after the clock's current reading.
    #[error("epoch ({epoch:?} since UNIX epoch) is later than the current time ({now:?})")]
    EpochInFuture { epoch: Duration, now: Duration },
}
