/// Opaque per-connection player identifier.
/// Allocated in increasing order and never reused within a process,
/// so ordering by handle is ordering by join time.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlayerHandle(u64);

impl From<u64> for PlayerHandle {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
