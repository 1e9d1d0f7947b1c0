use super::PlayerHandle;

/// The only recoverable failure the session reports.
/// Callers treat it as "tear down this connection's view", never as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("could not find player with id {0}")]
    UnknownPlayer(PlayerHandle),
}
