use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Sunday, August 27, 2023 15:04:05 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_secs(1_693_148_645);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH: Duration = Duration::from_millis(1_293_840_000_000);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_ORIGIN: Duration = Duration::ZERO;

/// A source of the current time.
///
/// Epochs in this crate are absolute points expressed as a [`Duration`] since
/// the UNIX epoch, so a time source reports "now" the same way. The generator
/// subtracts its epoch and divides by its timestamp unit.
///
/// Implementations must be cheap: the generator calls [`TimeSource::now`] once
/// per ID.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use shardflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Duration {
///         Duration::from_millis(1234)
///     }
/// }
///
/// assert_eq!(FixedTime.now(), Duration::from_millis(1234));
/// ```
pub trait TimeSource {
    /// Returns the current time as a duration since the UNIX epoch.
    fn now(&self) -> Duration;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// The wall clock, read with [`SystemTime::now`] on every call.
///
/// Wall-clock adjustments (NTP slews, manual changes) show up directly in the
/// generated IDs. Prefer [`MonotonicClock`] unless timestamps must track the
/// system clock exactly.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        // A clock set before 1970 reads as the UNIX epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}
