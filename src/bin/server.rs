//! RPS Server Binary
//!
//! Serves the rock-paper-scissors tournament to VNC viewers.

use clap::Parser;
use roshambo::rfb::Config;
use roshambo::rfb::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roshambo::log()?;
    roshambo::kys();
    Server::run(Config::parse()).await
}
