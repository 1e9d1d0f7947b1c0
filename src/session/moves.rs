/// A weapon choice. Only the pairwise beats-relation matters.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub fn beats(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }
    pub fn all() -> [Self; 3] {
        [Self::Rock, Self::Paper, Self::Scissors]
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rock => write!(f, "ROCK"),
            Self::Paper => write!(f, "PAPER"),
            Self::Scissors => write!(f, "SCISSORS"),
        }
    }
}
