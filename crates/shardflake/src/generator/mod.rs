mod atomic;
mod builder;
mod interface;
mod shared;

pub use atomic::*;
pub use builder::*;
pub use interface::*;
pub use shared::*;
