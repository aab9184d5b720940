//! Persistence for hostwatch.
//!
//! [`storage::Storage`] is the seam the API talks to; [`storage::mongodb`]
//! provides the MongoDB-backed implementation together with the lazily
//! initialised, process-wide connection it runs on.

pub mod models;
pub mod storage;
