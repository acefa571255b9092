//! Competitor (team or player) and its strength indicator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competitor (used in matches, slots and lookups).
pub type CompetitorId = Uuid;

/// What a competitor's strength is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrengthIndicator {
    /// Team win/loss history.
    Record { wins: u32, losses: u32 },
    /// Player UTR; `None` for unrated players.
    Rating { utr: Option<f64> },
}

/// A team or a player entered in a tournament. Read-only once a bracket is generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    /// School or club the competitor represents.
    pub school: String,
    pub strength: StrengthIndicator,
    /// Manual seed (1 = top seed). Only used when every competitor has one.
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Competitor {
    /// Create a team with the given win/loss record.
    pub fn team(name: impl Into<String>, school: impl Into<String>, wins: u32, losses: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            school: school.into(),
            strength: StrengthIndicator::Record { wins, losses },
            seed: None,
        }
    }

    /// Create a player with an optional UTR.
    pub fn player(name: impl Into<String>, school: impl Into<String>, utr: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            school: school.into(),
            strength: StrengthIndicator::Rating { utr },
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Player rating, if this is a rated player.
    pub fn rating(&self) -> Option<f64> {
        match self.strength {
            StrengthIndicator::Rating { utr } => utr.filter(|r| r.is_finite()),
            StrengthIndicator::Record { .. } => None,
        }
    }

    /// Games in the win/loss record (0 for players).
    pub fn games_played(&self) -> u32 {
        match self.strength {
            StrengthIndicator::Record { wins, losses } => wins + losses,
            StrengthIndicator::Rating { .. } => 0,
        }
    }

    /// Case-insensitive school comparison.
    pub fn same_school(&self, school: &str) -> bool {
        self.school.trim().eq_ignore_ascii_case(school.trim())
    }
}
