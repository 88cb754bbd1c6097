use std::sync::Arc;

/// A minimal interface for producing IDs.
///
/// Lets call sites stay generic over an owned [`Generator`], a
/// [`SharedGenerator`] handle, or a test double.
///
/// [`Generator`]: crate::Generator
/// [`SharedGenerator`]: crate::SharedGenerator
pub trait IdGenerator {
    /// Produces the next ID. Never fails and never blocks.
    fn next_id(&self) -> i64;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> i64 {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn next_id(&self) -> i64 {
        (**self).next_id()
    }
}
