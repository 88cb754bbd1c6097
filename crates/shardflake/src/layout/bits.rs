use core::time::Duration;

use crate::{Error, GeneratorOptions, IdParts, Result};

/// Smallest allowed sequence field width.
pub const MIN_SEQUENCE_BITS: u8 = 1;

/// Largest allowed sequence field width.
pub const MAX_SEQUENCE_BITS: u8 = 16;

/// Largest allowed shard field width. Zero removes the field entirely.
pub const MAX_SHARD_BITS: u8 = 8;

/// Finest allowed timestamp granularity.
pub const MIN_TIMESTAMP_UNIT: Duration = Duration::from_micros(1);

/// Coarsest allowed timestamp granularity.
pub const MAX_TIMESTAMP_UNIT: Duration = Duration::from_secs(1);

/// `shard_bits + sequence_bits` must stay strictly below this, which reserves
/// at least 44 bits for the timestamp.
pub const MAX_LOW_BITS: u8 = 20;

/// Bits available below the sign bit of an `i64`.
const ID_BITS: u8 = 63;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A validated partition of a 64-bit ID into timestamp, shard and sequence.
///
/// ```text
/// bit 63   62 ..................... shift  shift-1 .. seq  seq-1 .. 0
/// [  0  |        timestamp         |      shard       |   sequence  ]
/// ```
///
/// The sign bit is never set, so every ID is a non-negative `i64`. When
/// `shard_bits` is zero the timestamp directly adjoins the sequence.
///
/// A `BitLayout` can only be obtained through validation and is immutable
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitLayout {
    sequence_bits: u8,
    shard_bits: u8,
    timestamp_unit: Duration,
}

impl BitLayout {
    /// Validates `options` together with a caller-assigned `shard`.
    ///
    /// Checks run in this order and the first violation is returned:
    ///
    /// 1. `sequence_bits` in `[1, 16]`
    /// 2. `timestamp_unit` in `[1µs, 1s]`
    /// 3. `shard_bits` in `[0, 8]`
    /// 4. `shard` not negative
    /// 5. `shard_bits + sequence_bits < 20`
    ///
    /// On success, returns the layout and the shard wrapped into the shard
    /// field (`shard mod 2^shard_bits`).
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] variant matching the first failed check.
    ///
    /// # Example
    ///
    /// ```
    /// use shardflake::{BitLayout, GeneratorOptions};
    ///
    /// let (layout, shard) = BitLayout::resolve(&GeneratorOptions::default(), 67).unwrap();
    /// assert_eq!(layout.max_sequence(), 256);
    /// assert_eq!(shard, 3); // 67 mod 64
    /// ```
    pub fn resolve(options: &GeneratorOptions, shard: i64) -> Result<(Self, u64)> {
        let checked = Self::check(options, shard);

        #[cfg(feature = "tracing")]
        if let Err(ref err) = checked {
            tracing::warn!(?options, shard, %err, "rejected generator configuration");
        }

        let layout = checked?;
        let shard = layout.normalize_shard(shard);
        Ok((layout, shard))
    }

    fn check(options: &GeneratorOptions, shard: i64) -> Result<Self> {
        let GeneratorOptions {
            sequence_bits,
            shard_bits,
            timestamp_unit,
        } = *options;

        if !(MIN_SEQUENCE_BITS..=MAX_SEQUENCE_BITS).contains(&sequence_bits) {
            return Err(Error::InvalidSequenceBits {
                bits: sequence_bits,
            });
        }
        if !(MIN_TIMESTAMP_UNIT..=MAX_TIMESTAMP_UNIT).contains(&timestamp_unit) {
            return Err(Error::InvalidTimestampUnit {
                unit: timestamp_unit,
            });
        }
        if shard_bits > MAX_SHARD_BITS {
            return Err(Error::InvalidShardBits { bits: shard_bits });
        }
        if shard < 0 {
            return Err(Error::NegativeShard { shard });
        }
        if shard_bits + sequence_bits >= MAX_LOW_BITS {
            return Err(Error::LayoutTooWide {
                shard_bits,
                sequence_bits,
            });
        }

        Ok(Self {
            sequence_bits,
            shard_bits,
            timestamp_unit,
        })
    }

    /// Width of the sequence field.
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Width of the shard field.
    pub const fn shard_bits(&self) -> u8 {
        self.shard_bits
    }

    /// Duration of one timestamp increment.
    pub const fn timestamp_unit(&self) -> Duration {
        self.timestamp_unit
    }

    /// The sequence modulus, `2^sequence_bits`.
    ///
    /// This is the number of distinct sequence values per timestamp unit, not
    /// a ceiling: the counter wraps modulo this value instead of blocking.
    pub const fn max_sequence(&self) -> u64 {
        1 << self.sequence_bits
    }

    /// Largest shard value the shard field can hold.
    pub const fn max_shard(&self) -> u64 {
        (1 << self.shard_bits) - 1
    }

    /// Position of the lowest timestamp bit.
    pub const fn timestamp_shift(&self) -> u8 {
        self.sequence_bits + self.shard_bits
    }

    /// Width of the timestamp field. Always at least 44.
    pub const fn timestamp_bits(&self) -> u8 {
        ID_BITS - self.timestamp_shift()
    }

    /// Largest timestamp the field can hold before it wraps.
    pub const fn max_timestamp(&self) -> u64 {
        (1 << self.timestamp_bits()) - 1
    }

    /// How long the timestamp field lasts before it wraps, counted from the
    /// epoch.
    pub fn lifetime(&self) -> Duration {
        self.duration_of(self.max_timestamp())
    }

    /// Converts a timestamp field value back into the time elapsed since the
    /// epoch. Saturates at [`Duration::MAX`].
    pub fn duration_of(&self, ticks: u64) -> Duration {
        let nanos = u128::from(ticks) * self.timestamp_unit.as_nanos();
        match u64::try_from(nanos / NANOS_PER_SEC) {
            Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
            Err(_) => Duration::MAX,
        }
    }

    /// Wraps `shard` into the shard field. Negative values map to their
    /// Euclidean remainder.
    pub const fn normalize_shard(&self, shard: i64) -> u64 {
        shard.rem_euclid(1 << self.shard_bits) as u64
    }

    /// Number of whole timestamp units in `elapsed`, truncated toward zero.
    ///
    /// The result is not masked; [`BitLayout::encode`] does that.
    pub fn ticks(&self, elapsed: Duration) -> u64 {
        let ticks = elapsed.as_nanos() / self.timestamp_unit.as_nanos();
        // Truncation only happens far past `lifetime()`, where `encode` masks
        // these bits off anyway.
        ticks as u64
    }

    /// Packs `parts` into an ID.
    ///
    /// Every field is masked to its width first, so oversized inputs wrap
    /// rather than bleed into a neighbouring field.
    pub const fn encode(&self, parts: IdParts) -> i64 {
        let timestamp = parts.timestamp & self.max_timestamp();
        let shard = parts.shard & self.max_shard();
        let sequence = parts.sequence & (self.max_sequence() - 1);

        let raw = (timestamp << self.timestamp_shift()) | (shard << self.sequence_bits) | sequence;
        raw as i64
    }

    /// Splits an ID back into its fields.
    ///
    /// Bits above the layout (including the sign bit) are ignored.
    ///
    /// ```
    /// use shardflake::{BitLayout, GeneratorOptions, IdParts};
    ///
    /// let (layout, _) = BitLayout::resolve(&GeneratorOptions::default(), 0).unwrap();
    /// let parts = IdParts { timestamp: 10, shard: 3, sequence: 1 };
    /// assert_eq!(layout.decode(layout.encode(parts)), parts);
    /// ```
    pub const fn decode(&self, id: i64) -> IdParts {
        let raw = id as u64;
        IdParts {
            timestamp: (raw >> self.timestamp_shift()) & self.max_timestamp(),
            shard: (raw >> self.sequence_bits) & self.max_shard(),
            sequence: raw & (self.max_sequence() - 1),
        }
    }
}

impl TryFrom<GeneratorOptions> for BitLayout {
    type Error = Error;

    /// Validates `options` alone, as if the shard were `0`.
    fn try_from(options: GeneratorOptions) -> Result<Self> {
        Self::resolve(&options, 0).map(|(layout, _)| layout)
    }
}

impl Default for BitLayout {
    /// The default layout: 8 sequence bits, 6 shard bits, 1ms units.
    fn default() -> Self {
        let options = GeneratorOptions::default();
        Self {
            sequence_bits: options.sequence_bits,
            shard_bits: options.shard_bits,
            timestamp_unit: options.timestamp_unit,
        }
    }
}
