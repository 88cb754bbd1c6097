//! Coordination-free, sortable 64-bit identifiers in the Snowflake style.
//!
//! Every ID packs three fields, high to low bits:
//!
//! ```text
//! [ 0 | timestamp | shard | sequence ]
//! ```
//!
//! - `timestamp`: whole [`timestamp_unit`]s elapsed since a fixed epoch
//! - `shard`: the producer identity, `shard_bits` wide (may be absent)
//! - `sequence`: a lock-free per-generator counter, `sequence_bits` wide
//!
//! All validation happens once when a [`Generator`] is built. Producing an ID
//! afterwards never fails and never blocks.
//!
//! ```
//! use shardflake::{Generator, GeneratorOption, DEFAULT_EPOCH};
//!
//! let generator = Generator::with_options(
//!     3,
//!     DEFAULT_EPOCH,
//!     [GeneratorOption::SequenceBits(10)],
//! )
//! .unwrap();
//!
//! let a = generator.next_id();
//! let b = generator.next_id();
//! assert_ne!(a, b);
//! assert_eq!(generator.decode(a).shard, 3);
//! ```
//!
//! [`timestamp_unit`]: BitLayout::timestamp_unit
mod error;
mod generator;
mod id;
mod layout;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::time::*;
