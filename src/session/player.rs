use super::PlayerHandle;

/// Registry entry for one connected (or recently departed) player.
/// Handed out by value only; nothing outside the session can mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    handle: PlayerHandle,
    name: String,
    disconnected: bool,
    wins: u32,
}

impl PlayerRecord {
    pub fn new(handle: PlayerHandle, name: String) -> Self {
        Self {
            handle,
            name,
            disconnected: false,
            wins: 0,
        }
    }
    pub fn handle(&self) -> PlayerHandle {
        self.handle
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn wins(&self) -> u32 {
        self.wins
    }
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
    pub(crate) fn disconnect(&mut self) {
        self.disconnected = true;
    }
    pub(crate) fn credit(&mut self) {
        self.wins += 1;
    }
}
