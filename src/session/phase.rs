use std::time::Duration;

/// Tournament phase. Cycles Waiting → Picking → Review → (Picking | Waiting).
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Waiting,
    Picking,
    Review,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Picking => write!(f, "picking"),
            Self::Review => write!(f, "review"),
        }
    }
}

/// Phase durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub picking: Duration,
    pub review: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            picking: Duration::from_secs(crate::PICKING_SECS),
            review: Duration::from_secs(crate::REVIEW_SECS),
        }
    }
}
