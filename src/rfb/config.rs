use crate::MAX_FPS;
use crate::PICKING_SECS;
use crate::REVIEW_SECS;
use crate::session::Rules;
use clap::Parser;
use std::time::Duration;

/// Server options; each can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Rock-paper-scissors tournament over VNC", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5900")]
    pub bind: String,
    /// Framebuffer updates per second per connection
    #[arg(long, env = "MAX_FPS", default_value_t = MAX_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
    /// Seconds allowed for picking a move
    #[arg(long, env = "PICKING_SECS", default_value_t = PICKING_SECS)]
    pub picking: u64,
    /// Seconds the results stay up before the next round
    #[arg(long, env = "REVIEW_SECS", default_value_t = REVIEW_SECS)]
    pub review: u64,
}

impl Config {
    pub fn rules(&self) -> Rules {
        Rules {
            picking: Duration::from_secs(self.picking),
            review: Duration::from_secs(self.review),
        }
    }
    pub fn frame(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
