use core::time::Duration;

use crate::{Generator, GeneratorOption, GeneratorOptions, MonotonicClock, Result, TimeSource};

/// Step-by-step construction of a [`Generator`].
///
/// Setters only record values; everything is validated in
/// [`GeneratorBuilder::build`]. Setting the same field twice keeps the last
/// value.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use shardflake::{GeneratorBuilder, TWITTER_EPOCH};
///
/// let generator = GeneratorBuilder::new()
///     .sequence_bits(10)
///     .shard_bits(4)
///     .timestamp_unit(Duration::from_millis(10))
///     .build(9, TWITTER_EPOCH)
///     .unwrap();
///
/// assert_eq!(generator.layout().timestamp_shift(), 14);
/// assert_eq!(generator.shard(), 9);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct GeneratorBuilder<T = MonotonicClock> {
    options: GeneratorOptions,
    time: T,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorBuilder {
    /// Starts from the default options and a freshly anchored
    /// [`MonotonicClock`].
    pub fn new() -> Self {
        Self {
            options: GeneratorOptions::default(),
            time: MonotonicClock::new(),
        }
    }
}

impl<T> GeneratorBuilder<T> {
    /// Sets the width of the sequence field.
    pub fn sequence_bits(mut self, bits: u8) -> Self {
        self.options.sequence_bits = bits;
        self
    }

    /// Sets the width of the shard field.
    pub fn shard_bits(mut self, bits: u8) -> Self {
        self.options.shard_bits = bits;
        self
    }

    /// Sets the duration of one timestamp increment.
    pub fn timestamp_unit(mut self, unit: Duration) -> Self {
        self.options.timestamp_unit = unit;
        self
    }

    /// Applies a single override.
    pub fn option(mut self, option: GeneratorOption) -> Self {
        self.options.apply(option);
        self
    }

    /// Applies overrides in order.
    pub fn options(mut self, options: impl IntoIterator<Item = GeneratorOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Replaces all options at once, e.g. with values loaded from a config
    /// file.
    pub fn with_generator_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Stamps IDs with `time` instead of the default clock.
    pub fn time_source<U>(self, time: U) -> GeneratorBuilder<U> {
        GeneratorBuilder {
            options: self.options,
            time,
        }
    }

    /// The options recorded so far.
    pub const fn generator_options(&self) -> &GeneratorOptions {
        &self.options
    }
}

impl<T> GeneratorBuilder<T>
where
    T: TimeSource,
{
    /// Validates the options and builds the generator.
    ///
    /// # Errors
    ///
    /// See [`Generator::with_time_source`].
    pub fn build(self, shard: i64, epoch: Duration) -> Result<Generator<T>> {
        Generator::with_time_source(shard, epoch, &self.options, self.time)
    }
}
