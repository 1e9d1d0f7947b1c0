use super::Move;
use super::Phase;
use super::PlayerHandle;
use super::PlayerRecord;
use std::time::Duration;

/// Point-in-time snapshot of the tournament from one player's seat.
/// Every field is an owned copy; holding a view never pins session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerRecord,
    pub phase: Phase,
    pub time_left: Duration,
    pub own_move: Option<Move>,
    /// Absent while waiting or sitting out.
    pub opponent: Option<PlayerRecord>,
    pub opponent_move: Option<Move>,
    pub winner: Option<PlayerHandle>,
    /// Descending wins, ties broken by ascending handle.
    pub rankings: Vec<PlayerRecord>,
}

impl PlayerView {
    pub fn is_sitting_out(&self) -> bool {
        self.phase != Phase::Waiting && self.opponent.is_none()
    }
    pub fn won(&self) -> bool {
        self.winner == Some(self.player.handle())
    }
    pub fn lost(&self) -> bool {
        self.winner.is_some()
            && self.winner == self.opponent.as_ref().map(PlayerRecord::handle)
    }
}
