//! Issuer gateway CLI configuration.

use std::net::SocketAddr;

use clap::Parser;

/// HTTP front-end for `protocol::issuer::Issuer`.
#[derive(Parser, Debug, Clone)]
#[command(name = "issuer-gateway")]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8090)]
    pub port: u16,

    /// Attribute-slot count the issuer is configured for.
    #[arg(short = 'n', long = "attributes", default_value_t = 3)]
    pub n: usize,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
