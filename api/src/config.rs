use chrono::TimeDelta;
use clap::Parser;
use std::net::SocketAddr;

#[derive(Clone, Debug, Parser)]
pub struct HostwatchApiConfig {
    #[clap(
        short,
        long,
        env = "HOSTWATCH_API_BIND_ADDR",
        default_value = "0.0.0.0:4000"
    )]
    pub bind_addr: SocketAddr,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    #[clap(
        long,
        env = "HOSTWATCH_API_MONGODB_URI",
        default_value = "mongodb://localhost:27017/hostwatch"
    )]
    pub mongodb_uri: String,

    /// Database to use when `mongodb_uri` does not name one.
    #[clap(
        long,
        env = "HOSTWATCH_API_MONGODB_DATABASE",
        default_value = "hostwatch"
    )]
    pub mongodb_database: String,

    /// How long, in milliseconds, a host may go without a write before it is
    /// considered stale.
    ///
    /// Stale hosts are excluded from `GET /api/hosts` and deleted in the
    /// background while serving that request.
    #[clap(
        long,
        env = "HOSTWATCH_API_STALE_AFTER_MS",
        default_value_t = 432_000,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub stale_after_ms: i64,
}

impl HostwatchApiConfig {
    /// The staleness window as a duration.
    pub fn stale_after(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.stale_after_ms)
    }
}
