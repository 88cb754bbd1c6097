use core::time::Duration;

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BitLayout, Error, GeneratorBuilder, GeneratorOption, GeneratorOptions, IdGenerator, IdParts,
    MonotonicClock, Result, TimeSource,
};

/// A lock-free Snowflake-style ID generator for one shard.
///
/// Each ID is `[ timestamp | shard | sequence ]`, where the timestamp counts
/// whole [`timestamp_unit`]s since the epoch and the sequence is the low bits
/// of a counter shared by every caller. The counter lives in an
/// [`AtomicU64`]; a single `fetch_add` is the only synchronization, so
/// [`Generator::next_id`] can be called from any number of threads through a
/// shared reference and never blocks.
///
/// ## Guarantees
/// - IDs from calls at least one timestamp unit apart are increasing, as long
///   as fewer than [`max_sequence`] calls happened in between.
/// - Up to [`max_sequence`] calls within one timestamp unit yield distinct
///   IDs.
/// - Generators with different shards never collide at the same timestamp
///   and sequence.
///
/// ## Caveats
/// The counter is never reset and never blocks callers. More than
/// [`max_sequence`] calls within one timestamp unit wrap the sequence field
/// and repeat IDs. Pick `sequence_bits` generously for the expected
/// throughput.
///
/// ## See Also
/// - [`GeneratorBuilder`]
/// - [`SharedGenerator`]
///
/// [`timestamp_unit`]: BitLayout::timestamp_unit
/// [`max_sequence`]: BitLayout::max_sequence
/// [`SharedGenerator`]: crate::SharedGenerator
#[derive(Debug)]
pub struct Generator<T = MonotonicClock> {
    layout: BitLayout,
    epoch: Duration,
    shard: u64,
    #[cfg(feature = "cache-padded")]
    sequence: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    sequence: AtomicU64,
    time: T,
}

impl Generator<MonotonicClock> {
    /// Creates a generator with the default layout (8 sequence bits, 6 shard
    /// bits, 1ms units) on a fresh [`MonotonicClock`].
    ///
    /// # Parameters
    ///
    /// - `shard`: A caller-assigned producer id, unique among concurrently
    ///   running generators. Values wider than the shard field wrap.
    /// - `epoch`: The zero point of the timestamp field, as a [`Duration`]
    ///   since the UNIX epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeShard`] for a negative `shard`, and
    /// [`Error::EpochInFuture`] if `epoch` is later than now.
    ///
    /// # Example
    ///
    /// ```
    /// use shardflake::{Generator, DEFAULT_EPOCH};
    ///
    /// let generator = Generator::new(1, DEFAULT_EPOCH).unwrap();
    /// let id = generator.next_id();
    /// assert!(id > 0);
    /// ```
    pub fn new(shard: i64, epoch: Duration) -> Result<Self> {
        Self::with_time_source(
            shard,
            epoch,
            &GeneratorOptions::default(),
            MonotonicClock::new(),
        )
    }

    /// Creates a generator after applying `options` over the defaults, in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; see [`BitLayout::resolve`].
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use shardflake::{Generator, GeneratorOption, DEFAULT_EPOCH};
    ///
    /// let generator = Generator::with_options(
    ///     0,
    ///     DEFAULT_EPOCH,
    ///     [
    ///         GeneratorOption::SequenceBits(12),
    ///         GeneratorOption::TimestampUnit(Duration::from_micros(100)),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(generator.layout().max_sequence(), 4096);
    /// ```
    pub fn with_options(
        shard: i64,
        epoch: Duration,
        options: impl IntoIterator<Item = GeneratorOption>,
    ) -> Result<Self> {
        let options: GeneratorOptions = options.into_iter().collect();
        Self::with_time_source(shard, epoch, &options, MonotonicClock::new())
    }

    /// Returns a builder for setting options one by one.
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Creates a generator that reads the time from `time`.
    ///
    /// The layout is validated first, then the clock is read once to make sure
    /// `epoch` is not in the future. The sequence counter starts at zero and is
    /// incremented before use, so the first ID carries sequence `1`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of [`BitLayout::resolve`], or
    /// [`Error::EpochInFuture`].
    pub fn with_time_source(
        shard: i64,
        epoch: Duration,
        options: &GeneratorOptions,
        time: T,
    ) -> Result<Self> {
        let (layout, shard) = BitLayout::resolve(options, shard)?;

        let now = time.now();
        if epoch > now {
            #[cfg(feature = "tracing")]
            tracing::warn!(?epoch, ?now, "rejected generator epoch in the future");
            return Err(Error::EpochInFuture { epoch, now });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sequence_bits = layout.sequence_bits(),
            shard_bits = layout.shard_bits(),
            timestamp_unit = ?layout.timestamp_unit(),
            shard,
            ?epoch,
            "built generator"
        );

        Ok(Self {
            layout,
            epoch,
            shard,
            #[cfg(feature = "cache-padded")]
            sequence: crossbeam_utils::CachePadded::new(AtomicU64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            sequence: AtomicU64::new(0),
            time,
        })
    }

    /// Produces the next ID.
    ///
    /// Reads the clock, then takes the next counter value with one atomic
    /// increment. No two calls observe the same counter value. The sequence
    /// field holds that value modulo [`BitLayout::max_sequence`].
    ///
    /// If the clock reads earlier than the epoch, the timestamp field is `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use shardflake::{Generator, DEFAULT_EPOCH};
    ///
    /// let generator = Generator::new(7, DEFAULT_EPOCH).unwrap();
    /// let a = generator.next_id();
    /// let b = generator.next_id();
    /// assert_ne!(a, b);
    /// assert_eq!(generator.decode(b).shard, 7);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> i64 {
        let elapsed = self.time.now().saturating_sub(self.epoch);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed).wrapping_add(1);

        self.layout.encode(IdParts {
            timestamp: self.layout.ticks(elapsed),
            shard: self.shard,
            sequence,
        })
    }

    /// The validated layout this generator packs IDs with.
    pub const fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// The zero point of the timestamp field, since the UNIX epoch.
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    /// The shard after wrapping into the shard field.
    pub const fn shard(&self) -> u64 {
        self.shard
    }

    /// The time source IDs are stamped with.
    pub const fn time_source(&self) -> &T {
        &self.time
    }

    /// Splits `id` into its fields using this generator's layout.
    pub const fn decode(&self, id: i64) -> IdParts {
        self.layout.decode(id)
    }

    /// The start of the timestamp unit `id` was minted in, as a [`Duration`]
    /// since the UNIX epoch.
    pub fn timestamp_of(&self, id: i64) -> Duration {
        let elapsed = self.layout.duration_of(self.decode(id).timestamp);
        self.epoch.saturating_add(elapsed)
    }
}

impl<T> IdGenerator for Generator<T>
where
    T: TimeSource,
{
    fn next_id(&self) -> i64 {
        self.next_id()
    }
}
