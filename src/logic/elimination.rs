//! Single elimination: first-round pairing with byes, round linking and winner progression.

use crate::models::{BracketError, Competitor, CompetitorId, GameMatch, MatchId, MatchStatus};
use chrono::Utc;
use std::collections::HashMap;

/// Build every round of a single-elimination bracket from seeded competitors.
///
/// 1. `bracket_size = 2^ceil(log2(n))`, `byes = bracket_size - n`.
/// 2. Round 1 has `bracket_size / 2` matches; the first `byes` of them each take the next
///    seed alone (so the top seeds get the byes), the rest pair the next two seeds.
/// 3. Later rounds are created empty, halving each round, then linked.
/// 4. Bye winners are pushed into their round-2 match.
///
/// Fewer than two competitors yield no matches.
pub fn generate_single_elimination(seeded: &[Competitor]) -> Vec<GameMatch> {
    let n = seeded.len();
    if n < 2 {
        return Vec::new();
    }
    let bracket_size = n.next_power_of_two();
    let byes = bracket_size - n;
    let rounds = bracket_size.trailing_zeros();
    log::debug!(
        "single elimination: {} entrants, bracket of {}, {} byes, {} rounds",
        n,
        bracket_size,
        byes,
        rounds
    );

    let mut entrants = seeded.iter().map(|c| c.id);
    let mut matches = Vec::with_capacity(bracket_size - 1);
    for index in 0..bracket_size / 2 {
        let match_number = index as u32 + 1;
        let first = entrants.next();
        let second = if index < byes { None } else { entrants.next() };
        let game = match (first, second) {
            (Some(a), Some(b)) => GameMatch::new(1, match_number, Some(a), Some(b)),
            (Some(a), None) => GameMatch::bye(1, match_number, a),
            (None, _) => GameMatch::new(1, match_number, None, None),
        };
        matches.push(game);
    }

    let mut round_matches = bracket_size / 4;
    for round in 2..=rounds {
        for index in 0..round_matches {
            matches.push(GameMatch::new(round, index as u32 + 1, None, None));
        }
        round_matches /= 2;
    }

    link_elimination_rounds(&mut matches);
    advance_byes(&mut matches);
    matches
}

/// Point each match at the one it feeds: round r index i feeds round r+1 index i/2.
pub fn link_elimination_rounds(matches: &mut [GameMatch]) {
    let by_position: HashMap<(u32, u32), MatchId> = matches
        .iter()
        .map(|m| ((m.round, m.match_number), m.id))
        .collect();
    for m in matches.iter_mut() {
        let index = m.match_number - 1;
        m.next_match_id = by_position.get(&(m.round + 1, index / 2 + 1)).copied();
    }
}

fn advance_byes(matches: &mut [GameMatch]) {
    let byes: Vec<(CompetitorId, MatchId)> = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .filter_map(|m| Some((m.winner?, m.next_match_id?)))
        .collect();
    for (winner, next_id) in byes {
        if let Some(next) = matches.iter_mut().find(|m| m.id == next_id) {
            next.fill_first_empty_slot(winner);
        }
    }
}

/// Record a result and advance the winner into the linked match.
///
/// Returns a new match list; the input is untouched. Both slots must be filled and byes
/// cannot be rescored. The winner fills the next match's first empty slot. Submitting the
/// same winner again does not place them twice, and changing the winner swaps them in the
/// next match as long as it has not started.
pub fn update_match_result(
    matches: &[GameMatch],
    match_id: MatchId,
    winner: CompetitorId,
    score: impl Into<String>,
) -> Result<Vec<GameMatch>, BracketError> {
    let index = matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let target = &matches[index];
    if !target.has_competitor(winner) {
        return Err(BracketError::WinnerNotInMatch { match_id, winner });
    }
    if target.status == MatchStatus::Bye {
        return Err(BracketError::MatchDecided(match_id));
    }
    if target.occupied_slots() < 2 {
        return Err(BracketError::MatchNotReady(match_id));
    }
    let previous_winner = target.winner.filter(|&w| w != winner);
    let next_match_id = target.next_match_id;

    let mut updated = matches.to_vec();
    if let Some(next_id) = next_match_id {
        match updated.iter_mut().find(|m| m.id == next_id) {
            Some(next) => advance_winner(next, winner, previous_winner)?,
            None => log::warn!("match {} links to missing match {}", match_id, next_id),
        }
    }

    let game = &mut updated[index];
    game.winner = Some(winner);
    game.score = Some(score.into());
    game.status = MatchStatus::Completed;
    game.completed_at = Some(Utc::now());
    log::debug!(
        "match {} (round {}) won by {}",
        game.id,
        game.round,
        winner
    );
    Ok(updated)
}

fn advance_winner(
    next: &mut GameMatch,
    winner: CompetitorId,
    previous_winner: Option<CompetitorId>,
) -> Result<(), BracketError> {
    if next.has_competitor(winner) {
        return Ok(());
    }
    if next.is_decided() {
        return Err(BracketError::DownstreamMatchCompleted(next.id));
    }
    match previous_winner.filter(|&p| next.has_competitor(p)) {
        Some(_) if next.status == MatchStatus::InProgress => {
            return Err(BracketError::DownstreamMatchStarted(next.id));
        }
        Some(previous) => {
            next.replace_competitor(previous, winner);
        }
        None => {
            if !next.fill_first_empty_slot(winner) {
                log::warn!("match {} has no empty slot for {}", next.id, winner);
            }
        }
    }
    Ok(())
}

/// Mark a pending match with both competitors as in progress.
pub fn start_match(matches: &[GameMatch], match_id: MatchId) -> Result<Vec<GameMatch>, BracketError> {
    let index = matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let target = &matches[index];
    if target.is_decided() {
        return Err(BracketError::MatchDecided(match_id));
    }
    if target.occupied_slots() < 2 {
        return Err(BracketError::MatchNotReady(match_id));
    }
    let mut updated = matches.to_vec();
    updated[index].status = MatchStatus::InProgress;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(n: usize) -> Vec<Competitor> {
        (0..n)
            .map(|i| Competitor::team(format!("T{i}"), "School", 0, 0))
            .collect()
    }

    #[test]
    fn final_has_no_next_match() {
        let matches = generate_single_elimination(&teams(4));
        let last = matches.iter().max_by_key(|m| m.round).unwrap();
        assert_eq!(last.round, 2);
        assert!(last.next_match_id.is_none());
    }

    #[test]
    fn one_competitor_has_no_matches() {
        assert!(generate_single_elimination(&teams(1)).is_empty());
    }
}
