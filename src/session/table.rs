use super::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

/// Unlocked tournament state machine.
/// Combines the player registry, the round's matchups and the phase timer.
/// Phase transitions happen only inside [`Table::advance`], which callers
/// invoke with the current instant before every read or mutation.
///
/// Invariants:
/// - matchups are non-empty only in Picking/Review
/// - a deadline exists iff the phase is not Waiting
/// - a handle appears in at most one matchup per round
/// - registry entries referenced by a matchup are only removed at the
///   Review → next-round edge
#[derive(Debug)]
pub struct Table {
    rules: Rules,
    rng: SmallRng,
    next: u64,
    players: BTreeMap<PlayerHandle, PlayerRecord>,
    matchups: Vec<Matchup>,
    phase: Phase,
    deadline: Option<Instant>,
}

impl Table {
    pub fn new(rules: Rules, rng: SmallRng) -> Self {
        Self {
            rules,
            rng,
            next: 1,
            players: BTreeMap::new(),
            matchups: Vec::new(),
            phase: Phase::Waiting,
            deadline: None,
        }
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }
    pub fn contains(&self, handle: PlayerHandle) -> bool {
        self.players.contains_key(&handle)
    }
    /// (connected, total) registry sizes.
    pub fn counts(&self) -> (usize, usize) {
        let total = self.players.len();
        let active = self.eligible().count();
        (active, total)
    }
    /// All registered players, most wins first, earlier joiners first on ties.
    pub fn rankings(&self) -> Vec<PlayerRecord> {
        let mut rankings = self.players.values().cloned().collect::<Vec<_>>();
        rankings.sort_by(|a, b| {
            b.wins()
                .cmp(&a.wins())
                .then_with(|| a.handle().cmp(&b.handle()))
        });
        rankings
    }
}

impl Table {
    /// Applies whatever phase transition the clock reading calls for.
    /// Each transition sets a deadline strictly after `now`,
    /// so a single step always leaves a non-negative time remaining.
    pub fn advance(&mut self, now: Instant) {
        if !self.deadline.is_some_and(|d| now >= d) {
            return;
        }
        match self.phase {
            Phase::Waiting => {}
            Phase::Picking => self.review(now),
            Phase::Review => {
                self.purge();
                if self.eligible().count() >= 2 {
                    self.start(now);
                } else {
                    self.wait();
                }
            }
        }
    }
    /// Registers a new player. Starts a round if this brings a waiting
    /// table to two eligible players. Joiners arriving mid-round sit out.
    pub fn join(&mut self, name: Option<String>, now: Instant) -> PlayerHandle {
        let handle = PlayerHandle::from(self.next);
        self.next += 1;
        let name = name.unwrap_or_else(|| format!("P{}", handle));
        self.players.insert(handle, PlayerRecord::new(handle, name));
        if self.phase == Phase::Waiting && self.eligible().count() >= 2 {
            self.start(now);
        }
        handle
    }
    /// Deletes the player outright while waiting; otherwise marks them
    /// disconnected so the current round can still reference them.
    /// Returns false if nothing changed.
    pub fn leave(&mut self, handle: PlayerHandle) -> bool {
        match self.phase {
            Phase::Waiting => self.players.remove(&handle).is_some(),
            Phase::Picking | Phase::Review => self
                .players
                .get_mut(&handle)
                .filter(|p| !p.is_disconnected())
                .map(PlayerRecord::disconnect)
                .is_some(),
        }
    }
    /// Records a move. Inert (Ok(false)) when not picking, when sitting
    /// out, or when this player already picked this round.
    pub fn pick(&mut self, handle: PlayerHandle, choice: Move) -> Result<bool, SessionError> {
        if !self.contains(handle) {
            return Err(SessionError::UnknownPlayer(handle));
        }
        if self.phase != Phase::Picking {
            return Ok(false);
        }
        Ok(self
            .matchups
            .iter_mut()
            .find(|m| m.contains(handle))
            .is_some_and(|m| m.pick(handle, choice)))
    }
    /// Builds the snapshot for one player. Assumes `advance(now)` ran first.
    pub fn view(&self, handle: PlayerHandle, now: Instant) -> Result<PlayerView, SessionError> {
        let player = self
            .players
            .get(&handle)
            .cloned()
            .ok_or(SessionError::UnknownPlayer(handle))?;
        let time_left = match self.phase {
            Phase::Waiting => Duration::ZERO,
            Phase::Picking | Phase::Review => self
                .deadline
                .map_or(Duration::ZERO, |d| d.saturating_duration_since(now)),
        };
        let matchup = self.matchups.iter().find(|m| m.contains(handle));
        let opponent = matchup
            .and_then(|m| m.opponent(handle))
            .and_then(|h| {
                self.players
                    .get(&h)
                    .cloned()
                    .or_else(|| {
                        log::warn!("[session] P{} is in a matchup but not the registry", h);
                        None
                    })
            });
        let opponent_move = opponent
            .as_ref()
            .and_then(|o| matchup.and_then(|m| m.move_of(o.handle())));
        Ok(PlayerView {
            player,
            phase: self.phase,
            time_left,
            own_move: matchup.and_then(|m| m.move_of(handle)),
            opponent,
            opponent_move,
            winner: matchup.and_then(Matchup::winner),
            rankings: self.rankings(),
        })
    }
}

impl Table {
    fn eligible(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.values().filter(|p| !p.is_disconnected())
    }
    /// Waiting/Review → Picking: shuffle and pair, odd one out sits.
    fn start(&mut self, now: Instant) {
        let mut handles = self.eligible().map(PlayerRecord::handle).collect::<Vec<_>>();
        handles.shuffle(&mut self.rng);
        self.matchups = handles
            .chunks_exact(2)
            .map(|pair| Matchup::from((pair[0], pair[1])))
            .collect();
        self.phase = Phase::Picking;
        self.deadline = Some(now + self.rules.picking);
        log::info!(
            "[session] round started: {} matchups, {} sitting out",
            self.matchups.len(),
            handles.len() % 2
        );
    }
    /// Picking → Review: judge every matchup and credit winners.
    fn review(&mut self, now: Instant) {
        let players = &mut self.players;
        for matchup in self.matchups.iter_mut() {
            let [a, b] = matchup.players();
            let outcome = matchup.judge(|h| players.contains_key(&h));
            log::debug!("[session] P{} vs P{}: {:?}", a, b, outcome);
            if let Some(player) = outcome.winner().and_then(|w| players.get_mut(&w)) {
                player.credit();
            }
        }
        self.phase = Phase::Review;
        self.deadline = Some(now + self.rules.review);
        log::info!("[session] reviewing {} matchups", self.matchups.len());
    }
    /// Review → Waiting.
    fn wait(&mut self) {
        self.matchups.clear();
        self.phase = Phase::Waiting;
        self.deadline = None;
        log::info!("[session] waiting for players");
    }
    fn purge(&mut self) {
        self.players.retain(|h, p| {
            if p.is_disconnected() {
                log::debug!("[session] purging P{}", h);
            }
            !p.is_disconnected()
        });
    }
}
