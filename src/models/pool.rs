//! Player-mode structures: school groups, the two pools, slots and the pool bracket.

use crate::models::competitor::{Competitor, CompetitorId};
use crate::models::game::{GameMatch, MatchId, PoolSide};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket slot.
pub type SlotId = Uuid;

/// A school and its entrants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchoolGroup {
    pub school: String,
    pub players: Vec<Competitor>,
    /// Mean UTR over rated entrants; 0.0 when nobody is rated.
    pub average_rating: f64,
}

/// Pool A and Pool B entrants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pools {
    pub pool_a: Vec<Competitor>,
    pub pool_b: Vec<Competitor>,
}

impl Pools {
    pub fn pool(&self, side: PoolSide) -> &[Competitor] {
        match side {
            PoolSide::A => &self.pool_a,
            PoolSide::B => &self.pool_b,
        }
    }

    pub fn pool_mut(&mut self, side: PoolSide) -> &mut Vec<Competitor> {
        match side {
            PoolSide::A => &mut self.pool_a,
            PoolSide::B => &mut self.pool_b,
        }
    }

    pub fn len(&self) -> usize {
        self.pool_a.len() + self.pool_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entrants from `school` in one pool.
    pub fn school_count(&self, side: PoolSide, school: &str) -> usize {
        self.pool(side).iter().filter(|p| p.same_school(school)).count()
    }
}

/// Competitor details copied into a slot so the bracket renders without lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotOccupant {
    pub id: CompetitorId,
    pub name: String,
    pub school: String,
    pub rating: Option<f64>,
}

impl From<&Competitor> for SlotOccupant {
    fn from(c: &Competitor) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            school: c.school.clone(),
            rating: c.rating(),
        }
    }
}

/// A placeholder for one competitor in a pool round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub id: SlotId,
    pub round: u32,
    pub pool: PoolSide,
    /// 0-based; slots 2k and 2k+1 meet in the same match.
    pub position: u32,
    pub occupant: Option<SlotOccupant>,
    /// The match this slot plays in, once one exists.
    pub match_id: Option<MatchId>,
    pub locked: bool,
}

impl BracketSlot {
    pub fn empty(round: u32, pool: PoolSide, position: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            pool,
            position,
            occupant: None,
            match_id: None,
            locked: false,
        }
    }

    pub fn occupied(round: u32, pool: PoolSide, position: u32, occupant: SlotOccupant) -> Self {
        Self {
            occupant: Some(occupant),
            ..Self::empty(round, pool, position)
        }
    }

    pub fn occupant_id(&self) -> Option<CompetitorId> {
        self.occupant.as_ref().map(|o| o.id)
    }
}

/// Slots and matches of a two-pool player bracket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolBracket {
    pub slots: Vec<BracketSlot>,
    pub matches: Vec<GameMatch>,
}

impl PoolBracket {
    pub fn slot(&self, id: SlotId) -> Option<&BracketSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn game(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Slots of one pool round, ordered by position.
    pub fn round_slots(&self, pool: PoolSide, round: u32) -> Vec<&BracketSlot> {
        let mut slots: Vec<_> = self
            .slots
            .iter()
            .filter(|s| s.pool == pool && s.round == round)
            .collect();
        slots.sort_by_key(|s| s.position);
        slots
    }

    /// Highest round number that has slots in `pool` (0 if the pool is empty).
    pub fn last_round(&self, pool: PoolSide) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.pool == pool)
            .map(|s| s.round)
            .max()
            .unwrap_or(0)
    }

    /// Occupant of the pool's final single slot, once filled.
    pub fn pool_champion(&self, pool: PoolSide) -> Option<&SlotOccupant> {
        let last_round = self.last_round(pool);
        let mut slots = self
            .slots
            .iter()
            .filter(|s| s.pool == pool && s.round == last_round);
        match (slots.next(), slots.next()) {
            (Some(only), None) => only.occupant.as_ref(),
            _ => None,
        }
    }
}
