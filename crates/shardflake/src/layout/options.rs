use core::time::Duration;

/// Default sequence field width: 256 IDs per timestamp unit.
pub const DEFAULT_SEQUENCE_BITS: u8 = 8;

/// Default shard field width: 64 producers.
pub const DEFAULT_SHARD_BITS: u8 = 6;

/// Default timestamp granularity.
pub const DEFAULT_TIMESTAMP_UNIT: Duration = Duration::from_millis(1);

/// A single override applied on top of [`GeneratorOptions`].
///
/// Directives are applied in the order supplied, so a later directive for the
/// same field wins. Values are not checked here; validation happens once
/// when the layout is resolved.
///
/// ```
/// use core::time::Duration;
/// use shardflake::{GeneratorOption, GeneratorOptions};
///
/// let options: GeneratorOptions = [
///     GeneratorOption::SequenceBits(4),
///     GeneratorOption::TimestampUnit(Duration::from_secs(1)),
///     GeneratorOption::SequenceBits(10),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(options.sequence_bits, 10);
/// assert_eq!(options.shard_bits, 6);
/// assert_eq!(options.timestamp_unit, Duration::from_secs(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorOption {
    /// Overrides the width of the sequence field.
    SequenceBits(u8),
    /// Overrides the width of the shard field.
    ShardBits(u8),
    /// Overrides the duration of one timestamp increment.
    TimestampUnit(Duration),
}

/// Unvalidated tuning parameters for a generator's bit layout.
///
/// Starts from the defaults (`sequence_bits = 8`, `shard_bits = 6`,
/// `timestamp_unit = 1ms`). With the `serde` feature enabled, missing fields
/// deserialize to these defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorOptions {
    /// Width in bits of the per-interval counter field.
    pub sequence_bits: u8,
    /// Width in bits of the producer field.
    pub shard_bits: u8,
    /// Duration represented by one increment of the timestamp field.
    pub timestamp_unit: Duration,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            shard_bits: DEFAULT_SHARD_BITS,
            timestamp_unit: DEFAULT_TIMESTAMP_UNIT,
        }
    }
}

impl GeneratorOptions {
    /// Applies one override in place.
    pub fn apply(&mut self, option: GeneratorOption) {
        match option {
            GeneratorOption::SequenceBits(bits) => self.sequence_bits = bits,
            GeneratorOption::ShardBits(bits) => self.shard_bits = bits,
            GeneratorOption::TimestampUnit(unit) => self.timestamp_unit = unit,
        }
    }

    /// Returns a copy with `option` applied.
    #[must_use]
    pub fn with(mut self, option: GeneratorOption) -> Self {
        self.apply(option);
        self
    }
}

impl Extend<GeneratorOption> for GeneratorOptions {
    fn extend<I: IntoIterator<Item = GeneratorOption>>(&mut self, iter: I) {
        for option in iter {
            self.apply(option);
        }
    }
}

impl FromIterator<GeneratorOption> for GeneratorOptions {
    fn from_iter<I: IntoIterator<Item = GeneratorOption>>(iter: I) -> Self {
        let mut options = Self::default();
        options.extend(iter);
        options
    }
}
