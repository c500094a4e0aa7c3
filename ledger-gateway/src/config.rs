//! Ledger gateway CLI configuration.

use std::net::SocketAddr;

use clap::Parser;

/// HTTP front-end for `protocol::ledger::Ledger`.
#[derive(Parser, Debug, Clone)]
#[command(name = "ledger-gateway")]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8092)]
    pub port: u16,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
