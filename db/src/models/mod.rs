pub mod host;
pub mod timestamp;

pub use host::*;
