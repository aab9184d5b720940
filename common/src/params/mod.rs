//! Input parameters for the various functions within hostwatch.

mod host;
pub use host::*;
