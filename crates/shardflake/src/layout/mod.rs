mod bits;
mod options;
#[cfg(test)]
mod tests;

pub use bits::*;
pub use options::*;
