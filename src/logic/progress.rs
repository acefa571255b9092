//! In-progress phase: results, Swiss rounds, slot edits and derived views for a tournament.
//!
//! Every mutation checks the caller's `expected_version` first and bumps the version on
//! success, so two writers working from the same snapshot cannot both apply.

use crate::logic::bracket::{get_bracket_summary, BracketSummary};
use crate::logic::elimination::{start_match, update_match_result};
use crate::logic::pool_bracket::{assign_slot, lock_slots, progress_winner};
use crate::logic::standings::{calculate_standings, Standing};
use crate::logic::swiss::next_swiss_round;
use crate::logic::validation::{validate_slot_change, SlotWarning};
use crate::models::{
    BracketFormat, CompetitorId, MatchId, PoolBracket, PoolSide, SlotId, Tournament,
    TournamentError, TournamentMode, TournamentState,
};

fn require_in_progress(tournament: &Tournament, expected_version: u64) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    tournament.check_version(expected_version)
}

fn pool_bracket(tournament: &Tournament) -> Result<&PoolBracket, TournamentError> {
    tournament
        .pool_bracket
        .as_ref()
        .ok_or(TournamentError::InvalidState)
}

/// Record a match result and advance the winner, then refresh the tournament state.
pub fn submit_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: CompetitorId,
    score: &str,
    expected_version: u64,
) -> Result<(), TournamentError> {
    require_in_progress(tournament, expected_version)?;
    tournament.require_competitor(winner)?;
    match tournament.mode {
        TournamentMode::Team { .. } => {
            tournament.matches = update_match_result(&tournament.matches, match_id, winner, score)?;
        }
        TournamentMode::Player { .. } => {
            let updated = progress_winner(pool_bracket(tournament)?, match_id, winner, score)?;
            tournament.pool_bracket = Some(updated);
        }
    }
    tournament.version += 1;
    refresh_state(tournament);
    Ok(())
}

/// Mark a match as being played.
pub fn start_tournament_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    expected_version: u64,
) -> Result<(), TournamentError> {
    require_in_progress(tournament, expected_version)?;
    match tournament.mode {
        TournamentMode::Team { .. } => {
            tournament.matches = start_match(&tournament.matches, match_id)?;
        }
        TournamentMode::Player { .. } => {
            let mut bracket = pool_bracket(tournament)?.clone();
            bracket.matches = start_match(&bracket.matches, match_id)?;
            tournament.pool_bracket = Some(bracket);
        }
    }
    tournament.version += 1;
    Ok(())
}

/// Pair the next Swiss round (Swiss team tournaments only).
pub fn advance_swiss_round(tournament: &mut Tournament, expected_version: u64) -> Result<(), TournamentError> {
    require_in_progress(tournament, expected_version)?;
    let TournamentMode::Team {
        format: BracketFormat::Swiss { rounds },
    } = tournament.mode
    else {
        return Err(TournamentError::InvalidState);
    };
    tournament.matches = next_swiss_round(&tournament.matches, &tournament.competitors, rounds)?;
    tournament.version += 1;
    Ok(())
}

/// Advisory warnings for moving a competitor into a slot (player mode).
pub fn validate_tournament_slot(
    tournament: &Tournament,
    slot_id: SlotId,
    competitor_id: CompetitorId,
) -> Result<Vec<SlotWarning>, TournamentError> {
    let candidate = tournament.require_competitor(competitor_id)?;
    Ok(validate_slot_change(pool_bracket(tournament)?, slot_id, candidate)?)
}

/// Reassign a slot before locking (player mode).
pub fn assign_tournament_slot(
    tournament: &mut Tournament,
    slot_id: SlotId,
    competitor_id: CompetitorId,
    expected_version: u64,
) -> Result<(), TournamentError> {
    require_in_progress(tournament, expected_version)?;
    let candidate = tournament.require_competitor(competitor_id)?;
    let updated = assign_slot(pool_bracket(tournament)?, slot_id, candidate)?;
    tournament.pool_bracket = Some(updated);
    tournament.version += 1;
    Ok(())
}

/// Lock every slot of the player bracket.
pub fn lock_tournament_slots(tournament: &mut Tournament, expected_version: u64) -> Result<(), TournamentError> {
    require_in_progress(tournament, expected_version)?;
    let locked = lock_slots(pool_bracket(tournament)?)?;
    tournament.pool_bracket = Some(locked);
    tournament.version += 1;
    Ok(())
}

pub fn tournament_summary(tournament: &Tournament) -> BracketSummary {
    get_bracket_summary(tournament.bracket_matches())
}

pub fn tournament_standings(tournament: &Tournament) -> Vec<Standing> {
    calculate_standings(tournament.bracket_matches(), &tournament.competitors)
}

fn refresh_state(tournament: &mut Tournament) {
    let summary = tournament_summary(tournament);
    let finished = summary.is_complete
        && match (tournament.mode, &tournament.pool_bracket) {
            (TournamentMode::Team { format: BracketFormat::Swiss { rounds } }, _) => {
                summary.round_count >= rounds
            }
            (TournamentMode::Team { .. }, _) => true,
            (TournamentMode::Player { .. }, Some(bracket)) => PoolSide::BOTH.iter().all(|&side| {
                bracket.last_round(side) == 0 || bracket.pool_champion(side).is_some()
            }),
            (TournamentMode::Player { .. }, None) => false,
        };
    if finished {
        tournament.state = TournamentState::Completed;
        log::info!("tournament {} completed", tournament.id);
    }
}
