//! Errors returned by the bracket engine.

use crate::models::competitor::CompetitorId;
use crate::models::game::MatchId;
use crate::models::pool::SlotId;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    #[error("Competitor {0} appears more than once")]
    DuplicateCompetitor(CompetitorId),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("Competitor {winner} is not playing in match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: CompetitorId },

    #[error("Match {0} is already decided")]
    MatchDecided(MatchId),

    #[error("Match {0} does not have two competitors yet")]
    MatchNotReady(MatchId),

    #[error("Cannot change the result: the next match {0} is already decided")]
    DownstreamMatchCompleted(MatchId),

    #[error("Cannot change the result: the next match {0} is already being played")]
    DownstreamMatchStarted(MatchId),

    #[error("Slot {0} not found")]
    SlotNotFound(SlotId),

    #[error("Slot {0} is locked")]
    SlotLocked(SlotId),

    #[error("Competitor {competitor} occupies more than one slot in round {round}")]
    DuplicateSlotAssignment { competitor: CompetitorId, round: u32 },

    #[error("Round {0} has matches without a result")]
    SwissRoundIncomplete(u32),

    #[error("All {0} Swiss rounds have been generated")]
    SwissRoundsExhausted(u32),
}

pub type BracketResult<T> = Result<T, BracketError>;
