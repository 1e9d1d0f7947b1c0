use super::Move;
use super::PlayerHandle;

/// How a matchup was settled at the end of the Picking phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both sides moved and one beat the other.
    Win(PlayerHandle),
    /// Only one side had a usable move.
    Forfeit(PlayerHandle),
    /// Identical moves, or nobody usable.
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<PlayerHandle> {
        match self {
            Self::Win(h) | Self::Forfeit(h) => Some(*h),
            Self::Draw => None,
        }
    }
}

/// One pairing of the current round.
/// Participants are fixed at construction; each side's move is write-once
/// and the winner is computed exactly once by [`Matchup::judge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    players: [PlayerHandle; 2],
    moves: [Option<Move>; 2],
    outcome: Option<Outcome>,
}

impl From<(PlayerHandle, PlayerHandle)> for Matchup {
    fn from((a, b): (PlayerHandle, PlayerHandle)) -> Self {
        Self {
            players: [a, b],
            moves: [None, None],
            outcome: None,
        }
    }
}

impl Matchup {
    pub fn players(&self) -> [PlayerHandle; 2] {
        self.players
    }
    pub fn winner(&self) -> Option<PlayerHandle> {
        self.outcome.and_then(|o| o.winner())
    }
    pub fn contains(&self, handle: PlayerHandle) -> bool {
        self.side(handle).is_some()
    }
    /// Other participant, if `handle` is in this matchup.
    pub fn opponent(&self, handle: PlayerHandle) -> Option<PlayerHandle> {
        self.side(handle).map(|i| self.players[1 - i])
    }
    /// Move submitted by `handle`, if any.
    pub fn move_of(&self, handle: PlayerHandle) -> Option<Move> {
        self.side(handle).and_then(|i| self.moves[i])
    }
    /// Records a move for `handle`. First submission wins.
    /// Returns whether the move was recorded.
    pub fn pick(&mut self, handle: PlayerHandle, choice: Move) -> bool {
        match self.side(handle) {
            Some(i) if self.moves[i].is_none() && self.outcome.is_none() => {
                self.moves[i] = Some(choice);
                true
            }
            _ => false,
        }
    }
    /// Settles the matchup. `present` answers whether a handle is still in
    /// the registry. Idempotent: a judged matchup keeps its first outcome.
    ///
    /// A forfeit is credited without consulting the absent side's standing.
    pub fn judge<F>(&mut self, present: F) -> Outcome
    where
        F: Fn(PlayerHandle) -> bool,
    {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let [a, b] = self.players;
        let usable = |i: usize| self.moves[i].filter(|_| present(self.players[i]));
        let outcome = match (usable(0), usable(1)) {
            (Some(x), Some(y)) if x.beats(&y) => Outcome::Win(a),
            (Some(x), Some(y)) if y.beats(&x) => Outcome::Win(b),
            (Some(_), Some(_)) => Outcome::Draw,
            (Some(_), None) => Outcome::Forfeit(a),
            (None, Some(_)) => Outcome::Forfeit(b),
            (None, None) => Outcome::Draw,
        };
        self.outcome = Some(outcome);
        outcome
    }
    fn side(&self, handle: PlayerHandle) -> Option<usize> {
        self.players.iter().position(|p| *p == handle)
    }
}
