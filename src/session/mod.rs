//! Authoritative tournament state.
//!
//! A single [`Session`] owns the player registry, the current round's
//! matchups and the phase timer. Every operation takes one lock for its
//! whole duration and pumps the phase clock before doing anything else,
//! so there is no background timer racing the callers.
//!
//! ## Core Types
//!
//! - [`Session`]: locked aggregate exposing join, leave, submit and view
//! - [`Table`]: the unlocked state machine behind the lock
//! - [`Matchup`]: one pairing of the current round and its judging
//! - [`PlayerView`]: immutable per-player snapshot for presentation
//! - [`Clock`]: injectable time source ([`SystemClock`], [`ManualClock`])
mod clock;
mod error;
mod handle;
mod matchup;
mod moves;
mod phase;
mod player;
mod session;
mod table;
mod view;

pub use clock::*;
pub use error::*;
pub use handle::*;
pub use matchup::*;
pub use moves::*;
pub use phase::*;
pub use player::*;
pub use session::*;
pub use table::*;
pub use view::*;
