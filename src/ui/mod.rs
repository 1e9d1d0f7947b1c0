//! Per-connection presentation layer.
//!
//! Reads a [`PlayerView`](crate::session::PlayerView) every frame and
//! draws it; turns completed button clicks into move submissions.
//! Holds nothing but its own handle and button state.
mod button;
mod canvas;
mod screen;

pub use button::*;
pub use canvas::*;
pub use screen::*;
