//! RFB 3.3 transport.
//!
//! Speaks just enough of the remote framebuffer protocol for a stock VNC
//! viewer to play: handshake, raw-encoded framebuffer updates, pointer
//! input. Each connection owns a [`Screen`](crate::ui::Screen) and never
//! touches session state except through it.
mod config;
mod connection;
mod handshake;
mod message;
mod pixel;
mod server;

pub use config::*;
pub use connection::*;
pub use handshake::*;
pub use message::*;
pub use pixel::*;
pub use server::*;
