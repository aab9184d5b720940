//! Hostwatch API service.
//!
//! Serves the `hosts` resource: clients register hosts with `POST /api/hosts`
//! and read them back with `GET /api/hosts`. Hosts that have not been written
//! to within the staleness window (see [`config::HostwatchApiConfig`]) are
//! left out of listings and removed from the store on a best-effort basis.

pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;
