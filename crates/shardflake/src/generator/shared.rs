use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{DEFAULT_EPOCH, Generator, GeneratorOption, IdGenerator, MonotonicClock, Result, TimeSource};

/// Sequence width of the convenience generator built by
/// [`SharedGenerator::try_default`].
pub const SHARED_DEFAULT_SEQUENCE_BITS: u8 = 6;

/// A swappable handle to one [`Generator`], shared by several call sites.
///
/// Hand the handle (by reference or inside an [`Arc`]) to every component
/// that mints IDs; the application's composition root owns it. The current
/// generator can be replaced at any time with [`SharedGenerator::replace`],
/// and callers pick up the new one on their next call.
///
/// Reads go through an [`ArcSwap`], so [`SharedGenerator::next_id`] stays
/// lock-free.
///
/// # Example
///
/// ```
/// use shardflake::{Generator, SharedGenerator, DEFAULT_EPOCH};
///
/// let shared = SharedGenerator::try_default().unwrap();
/// let before = shared.next_id();
/// assert_eq!(shared.current().shard(), 0);
///
/// shared.replace(Generator::new(5, DEFAULT_EPOCH).unwrap());
/// let after = shared.next_id();
/// assert_eq!(shared.current().decode(after).shard, 5);
/// assert_ne!(before, after);
/// ```
#[derive(Debug)]
pub struct SharedGenerator<T = MonotonicClock> {
    current: ArcSwap<Generator<T>>,
}

impl SharedGenerator<MonotonicClock> {
    /// Builds the convenience generator: shard `0`, [`DEFAULT_EPOCH`], and
    /// [`SHARED_DEFAULT_SEQUENCE_BITS`] sequence bits over the other defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EpochInFuture`] if the system clock reads earlier
    /// than [`DEFAULT_EPOCH`].
    ///
    /// [`Error::EpochInFuture`]: crate::Error::EpochInFuture
    pub fn try_default() -> Result<Self> {
        let generator = Generator::with_options(
            0,
            DEFAULT_EPOCH,
            [GeneratorOption::SequenceBits(SHARED_DEFAULT_SEQUENCE_BITS)],
        )?;
        Ok(Self::new(generator))
    }
}

impl<T> SharedGenerator<T>
where
    T: TimeSource,
{
    /// Wraps `generator` in a shared handle.
    pub fn new(generator: Generator<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(generator),
        }
    }

    /// Produces the next ID from the current generator.
    pub fn next_id(&self) -> i64 {
        self.current.load().next_id()
    }

    /// Returns the generator currently in use.
    pub fn current(&self) -> Arc<Generator<T>> {
        self.current.load_full()
    }

    /// Swaps in `generator` and returns the one it replaces.
    ///
    /// Calls already in flight finish on the old generator.
    pub fn replace(&self, generator: Generator<T>) -> Arc<Generator<T>> {
        let previous = self.current.swap(Arc::new(generator));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            previous_shard = previous.shard(),
            shard = self.current.load().shard(),
            "replaced shared generator"
        );

        previous
    }
}

impl<T> From<Generator<T>> for SharedGenerator<T>
where
    T: TimeSource,
{
    fn from(generator: Generator<T>) -> Self {
        Self::new(generator)
    }
}

impl<T> IdGenerator for SharedGenerator<T>
where
    T: TimeSource,
{
    fn next_id(&self) -> i64 {
        self.next_id()
    }
}
