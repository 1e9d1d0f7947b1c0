use super::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Instant;

/// The one shared tournament.
/// Every operation holds the lock for its whole duration and pumps the
/// phase clock first, so transitions never interleave with reads and a
/// deadline crossing fires exactly once. Nothing inside the lock awaits.
pub struct Session {
    clock: Box<dyn Clock>,
    table: Mutex<Table>,
}

impl Session {
    pub fn new<C>(clock: C) -> Self
    where
        C: Clock + 'static,
    {
        Self::with_rules(clock, Rules::default())
    }
    pub fn with_rules<C>(clock: C, rules: Rules) -> Self
    where
        C: Clock + 'static,
    {
        Self::from_parts(clock, Table::new(rules, SmallRng::from_os_rng()))
    }
    /// Deterministic pairing order, for tests and replays.
    pub fn seeded<C>(clock: C, rules: Rules, seed: u64) -> Self
    where
        C: Clock + 'static,
    {
        Self::from_parts(clock, Table::new(rules, SmallRng::seed_from_u64(seed)))
    }
    fn from_parts<C>(clock: C, table: Table) -> Self
    where
        C: Clock + 'static,
    {
        Self {
            clock: Box::new(clock),
            table: Mutex::new(table),
        }
    }
}

impl Session {
    pub fn join(&self, name: impl Into<String>) -> PlayerHandle {
        self.enter(Some(name.into()))
    }
    /// Joins under the default name `P<handle>`.
    pub fn join_anonymous(&self) -> PlayerHandle {
        self.enter(None)
    }
    /// Idempotent. Mid-round departures stay visible until the round ends.
    pub fn leave(&self, handle: PlayerHandle) {
        let (mut table, _) = self.lock();
        if !table.leave(handle) {
            log::debug!("[session] P{} already gone", handle);
            return;
        }
        let (active, total) = table.counts();
        log::info!(
            "[session] P{} disconnected ({} players active, {} total)",
            handle,
            active,
            total
        );
    }
    /// Fire-and-forget move submission. Late, duplicate and sitting-out
    /// picks are silently ignored; only an unknown handle is an error.
    pub fn submit(&self, handle: PlayerHandle, choice: Move) -> Result<(), SessionError> {
        let (mut table, _) = self.lock();
        if table.pick(handle, choice)? {
            log::debug!("[session] P{} picked {}", handle, choice);
        }
        Ok(())
    }
    pub fn view(&self, handle: PlayerHandle) -> Result<PlayerView, SessionError> {
        let (table, now) = self.lock();
        table.view(handle, now)
    }
}

impl Session {
    fn enter(&self, name: Option<String>) -> PlayerHandle {
        let (mut table, now) = self.lock();
        let handle = table.join(name, now);
        let (active, total) = table.counts();
        log::info!(
            "[session] P{} connected ({} players active, {} total)",
            handle,
            active,
            total
        );
        handle
    }
    /// Acquires the table and brings its phase up to date.
    /// The clock is read under the lock so readings are ordered with it.
    fn lock(&self) -> (MutexGuard<'_, Table>, Instant) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let now = self.clock.now();
        table.advance(now);
        (table, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn session() -> (ManualClock, Session) {
        let clock = ManualClock::default();
        let session = Session::seeded(clock.clone(), Rules::default(), 7);
        (clock, session)
    }
    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn two_player_round() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        assert_eq!(s.view(p1).unwrap().phase, Phase::Waiting);
        assert_eq!(s.view(p1).unwrap().time_left, Duration::ZERO);

        let p2 = s.join_anonymous();
        let state = s.view(p2).unwrap();
        assert_eq!(state.phase, Phase::Picking);
        assert_eq!(state.time_left, secs(10));
        assert_eq!(state.opponent.as_ref().map(PlayerRecord::handle), Some(p1));
        assert_eq!(state.opponent_move, None);
        let state = s.view(p1).unwrap();
        assert_eq!(state.opponent.as_ref().map(PlayerRecord::handle), Some(p2));

        s.submit(p1, Move::Rock).unwrap();
        s.submit(p2, Move::Scissors).unwrap();
        clock.advance(secs(11));

        let state = s.view(p1).unwrap();
        assert_eq!(state.player.handle(), p1);
        assert_eq!(state.phase, Phase::Review);
        assert_eq!(state.time_left, secs(5));
        assert_eq!(state.winner, Some(p1));
        assert_eq!(state.own_move, Some(Move::Rock));
        assert_eq!(state.opponent_move, Some(Move::Scissors));
        assert!(state.won());
        assert_eq!(state.player.wins(), 1);
        assert_eq!(state.rankings[0].handle(), p1);

        clock.advance(secs(1));
        let state = s.view(p2).unwrap();
        assert_eq!(state.time_left, secs(4));
        assert_eq!(state.opponent_move, Some(Move::Rock));
        assert!(state.lost());

        // Two connected players remain, so the next round starts immediately.
        clock.advance(secs(4));
        let state = s.view(p1).unwrap();
        assert_eq!(state.phase, Phase::Picking);
        assert_eq!(state.time_left, secs(10));
        assert_eq!(state.own_move, None);
        assert_eq!(state.winner, None);
        assert_eq!(state.opponent.as_ref().map(PlayerRecord::handle), Some(p2));
        assert_eq!(state.player.wins(), 1);
    }
    #[test]
    fn odd_player_sits_out() {
        let (clock, s) = session();
        let players = [s.join("a"), s.join("b"), s.join("c")];
        let views = players.map(|p| s.view(p).unwrap());
        let sitting = views.iter().filter(|v| v.is_sitting_out()).collect::<Vec<_>>();
        assert_eq!(sitting.len(), 1);
        let idle = sitting[0].player.handle();
        assert_eq!(s.submit(idle, Move::Paper), Ok(()));
        players
            .iter()
            .for_each(|p| s.submit(*p, Move::Rock).unwrap());
        clock.advance(secs(10));
        let view = s.view(idle).unwrap();
        assert_eq!(view.phase, Phase::Review);
        assert_eq!(view.own_move, None);
        assert_eq!(view.winner, None);
        assert!(view.rankings.iter().all(|p| p.wins() == 0));
    }
    #[test]
    fn duplicate_pick_keeps_first() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join_anonymous();
        s.submit(p1, Move::Paper).unwrap();
        s.submit(p1, Move::Scissors).unwrap();
        s.submit(p2, Move::Rock).unwrap();
        clock.advance(secs(10));
        let state = s.view(p2).unwrap();
        assert_eq!(state.opponent_move, Some(Move::Paper));
        assert_eq!(state.winner, Some(p1));
    }
    #[test]
    fn draw_credits_nobody() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join_anonymous();
        s.submit(p1, Move::Rock).unwrap();
        s.submit(p2, Move::Rock).unwrap();
        clock.advance(secs(10));
        let state = s.view(p1).unwrap();
        assert_eq!(state.phase, Phase::Review);
        assert_eq!(state.winner, None);
        assert!(state.rankings.iter().all(|p| p.wins() == 0));
    }
    #[test]
    fn silent_opponent_forfeits() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join_anonymous();
        s.submit(p2, Move::Scissors).unwrap();
        clock.advance(secs(10));
        let state = s.view(p1).unwrap();
        assert_eq!(state.winner, Some(p2));
        assert_eq!(state.rankings[0].handle(), p2);
        assert_eq!(state.rankings[0].wins(), 1);
    }
    #[test]
    fn late_pick_is_inert() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join_anonymous();
        s.submit(p1, Move::Rock).unwrap();
        clock.advance(secs(10));
        s.submit(p2, Move::Paper).unwrap();
        let state = s.view(p2).unwrap();
        assert_eq!(state.own_move, None);
        assert_eq!(state.winner, Some(p1));
    }
    #[test]
    fn disconnect_mid_round() {
        let (clock, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join_anonymous();
        s.leave(p2);
        let state = s.view(p1).unwrap();
        assert_eq!(state.phase, Phase::Picking);
        let opponent = state.opponent.expect("opponent still visible");
        assert_eq!(opponent.handle(), p2);
        assert!(opponent.is_disconnected());
        assert_eq!(state.rankings.len(), 2);

        clock.advance(secs(10));
        let state = s.view(p1).unwrap();
        assert_eq!(state.phase, Phase::Review);
        assert_eq!(state.opponent.map(|o| o.handle()), Some(p2));

        clock.advance(secs(5));
        let state = s.view(p1).unwrap();
        assert_eq!(state.phase, Phase::Waiting);
        assert_eq!(state.opponent, None);
        assert_eq!(state.time_left, Duration::ZERO);
        assert_eq!(state.rankings.len(), 1);
        assert_eq!(s.view(p2), Err(SessionError::UnknownPlayer(p2)));
        assert_eq!(s.submit(p2, Move::Rock), Err(SessionError::UnknownPlayer(p2)));
    }
    #[test]
    fn survivors_reshuffle_after_purge() {
        let (clock, s) = session();
        let gone = s.join("a");
        let b = s.join("b");
        let c = s.join("c");
        s.leave(gone);
        assert_eq!(s.view(b).unwrap().rankings.len(), 3);

        clock.advance(secs(10));
        assert_eq!(s.view(b).unwrap().phase, Phase::Review);

        clock.advance(secs(5));
        let state = s.view(b).unwrap();
        assert_eq!(state.phase, Phase::Picking);
        assert_eq!(state.time_left, secs(10));
        assert_eq!(state.opponent.as_ref().map(PlayerRecord::handle), Some(c));
        assert_eq!(state.rankings.len(), 2);
        let state = s.view(c).unwrap();
        assert_eq!(state.opponent.as_ref().map(PlayerRecord::handle), Some(b));
        assert_eq!(s.view(gone), Err(SessionError::UnknownPlayer(gone)));
    }
    #[test]
    fn leave_while_waiting_is_immediate() {
        let (_, s) = session();
        let p1 = s.join_anonymous();
        s.leave(p1);
        s.leave(p1);
        assert_eq!(s.view(p1), Err(SessionError::UnknownPlayer(p1)));
        let p2 = s.join_anonymous();
        assert_ne!(p1, p2);
        let state = s.view(p2).unwrap();
        assert_eq!(state.phase, Phase::Waiting);
        assert_eq!(state.rankings.len(), 1);
    }
    #[test]
    fn default_names() {
        let (_, s) = session();
        let p1 = s.join_anonymous();
        let p2 = s.join("alice");
        let state = s.view(p1).unwrap();
        assert_eq!(state.player.name(), format!("P{}", p1));
        assert_eq!(state.opponent.unwrap().name(), "alice");
        assert_eq!(s.view(p2).unwrap().player.name(), "alice");
    }
    #[test]
    fn concurrent_callers_share_one_round() {
        let (clock, s) = session();
        let s = Arc::new(s);
        let handles = (0..8)
            .map(|_| {
                let s = s.clone();
                std::thread::spawn(move || {
                    let p = s.join_anonymous();
                    s.submit(p, Move::Rock).unwrap();
                    p
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|t| t.join().expect("thread"))
            .collect::<Vec<_>>();
        clock.advance(secs(10));
        let reviews = handles
            .iter()
            .map(|p| s.view(*p).unwrap())
            .collect::<Vec<_>>();
        assert!(reviews.iter().all(|v| v.phase == Phase::Review));
        assert!(reviews.iter().all(|v| v.time_left == secs(5)));
    }
}
