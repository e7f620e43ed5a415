pub mod error;
pub mod mask;

pub use mask::{Bitmask, decode_mask};
