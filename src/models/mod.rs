//! Data structures for the bracket engine: competitors, matches, pools, tournaments.

mod competitor;
mod error;
mod game;
mod pool;
mod team_match;
mod tournament;

pub use competitor::{Competitor, CompetitorId, StrengthIndicator};
pub use error::{BracketError, BracketResult};
pub use game::{BracketFormat, GameMatch, MatchId, MatchStatus, PoolSide};
pub use pool::{BracketSlot, PoolBracket, Pools, SchoolGroup, SlotId, SlotOccupant};
pub use team_match::{LinePosition, LineResult, Side, TeamMatch, TeamMatchId, TeamMatchOutcome};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentMode, TournamentState};
