//! Wire types shared between the hostwatch API and its storage layer.

pub mod params;
pub mod views;
