//! Match, MatchStatus, PoolSide and BracketFormat.

use crate::models::competitor::CompetitorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// One occupant, winner set at creation.
    Bye,
}

impl MatchStatus {
    /// Completed or bye: the match has a final winner.
    pub fn is_decided(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Bye)
    }
}

/// Half of a player-mode bracket.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolSide {
    A,
    B,
}

impl PoolSide {
    pub const BOTH: [PoolSide; 2] = [PoolSide::A, PoolSide::B];

    pub fn other(self) -> Self {
        match self {
            PoolSide::A => PoolSide::B,
            PoolSide::B => PoolSide::A,
        }
    }
}

/// Team-level bracket format.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketFormat {
    SingleElimination,
    RoundRobin,
    Swiss { rounds: u32 },
}

/// A single match between up to two competitors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based round number.
    pub round: u32,
    /// 1-based position within the round (and pool).
    pub match_number: u32,
    /// Player mode only.
    pub pool: Option<PoolSide>,
    pub slot_1: Option<CompetitorId>,
    pub slot_2: Option<CompetitorId>,
    /// None until decided.
    pub winner: Option<CompetitorId>,
    /// Free-text score summary, e.g. "6-4 3-6 10-7".
    pub score: Option<String>,
    pub status: MatchStatus,
    /// Elimination only: the match this one's winner feeds.
    pub next_match_id: Option<MatchId>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(
        round: u32,
        match_number: u32,
        slot_1: Option<CompetitorId>,
        slot_2: Option<CompetitorId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            pool: None,
            slot_1,
            slot_2,
            winner: None,
            score: None,
            status: MatchStatus::Pending,
            next_match_id: None,
            completed_at: None,
        }
    }

    /// A bye: `occupant` advances without playing.
    pub fn bye(round: u32, match_number: u32, occupant: CompetitorId) -> Self {
        Self {
            winner: Some(occupant),
            status: MatchStatus::Bye,
            completed_at: Some(Utc::now()),
            ..Self::new(round, match_number, Some(occupant), None)
        }
    }

    pub fn in_pool(mut self, pool: PoolSide) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn has_competitor(&self, id: CompetitorId) -> bool {
        self.slot_1 == Some(id) || self.slot_2 == Some(id)
    }

    pub fn occupied_slots(&self) -> usize {
        usize::from(self.slot_1.is_some()) + usize::from(self.slot_2.is_some())
    }

    pub fn competitors(&self) -> impl Iterator<Item = CompetitorId> + '_ {
        self.slot_1.iter().chain(self.slot_2.iter()).copied()
    }

    pub fn is_decided(&self) -> bool {
        self.status.is_decided()
    }

    /// The other competitor of a decided two-sided match.
    pub fn loser(&self) -> Option<CompetitorId> {
        let winner = self.winner?;
        self.competitors().find(|&c| c != winner)
    }

    /// Put `id` in slot 1 if empty, else slot 2. Returns false when both are taken.
    pub fn fill_first_empty_slot(&mut self, id: CompetitorId) -> bool {
        if self.slot_1.is_none() {
            self.slot_1 = Some(id);
        } else if self.slot_2.is_none() {
            self.slot_2 = Some(id);
        } else {
            return false;
        }
        true
    }

    /// Swap `from` for `to` in whichever slot holds it.
    pub fn replace_competitor(&mut self, from: CompetitorId, to: CompetitorId) -> bool {
        if self.slot_1 == Some(from) {
            self.slot_1 = Some(to);
        } else if self.slot_2 == Some(from) {
            self.slot_2 = Some(to);
        } else {
            return false;
        }
        true
    }
}
