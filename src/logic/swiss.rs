//! Swiss system: each round pairs competitors with similar running scores.

use crate::logic::seeding::{ensure_unique_ids, seed_competitors};
use crate::models::{BracketError, Competitor, CompetitorId, GameMatch, MatchStatus};

/// Wins divided by games played in completed (non-bye) matches; 0 before any game.
pub fn swiss_score(matches: &[GameMatch], competitor: CompetitorId) -> f64 {
    let (wins, games) = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed && m.has_competitor(competitor))
        .fold((0u32, 0u32), |(wins, games), m| {
            let won = m.winner == Some(competitor);
            (wins + u32::from(won), games + 1)
        });
    if games == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(games)
    }
}

/// Pair one Swiss round: sort by score (stable over seed order), pair neighbours.
/// An odd competitor out sits the round without a match.
pub fn pair_swiss_round(played: &[GameMatch], seeded: &[Competitor], round: u32) -> Vec<GameMatch> {
    let mut standings: Vec<(CompetitorId, f64)> = seeded
        .iter()
        .map(|c| (c.id, swiss_score(played, c.id)))
        .collect();
    standings.sort_by(|a, b| b.1.total_cmp(&a.1));

    let pairs = standings.chunks_exact(2);
    if let [(sitting_out, _)] = pairs.remainder() {
        log::debug!("swiss round {}: {} is unpaired", round, sitting_out);
    }
    pairs
        .enumerate()
        .map(|(i, pair)| GameMatch::new(round, i as u32 + 1, Some(pair[0].0), Some(pair[1].0)))
        .collect()
}

/// Append the next Swiss round once the current one is fully decided.
pub fn next_swiss_round(
    matches: &[GameMatch],
    competitors: &[Competitor],
    total_rounds: u32,
) -> Result<Vec<GameMatch>, BracketError> {
    ensure_unique_ids(competitors)?;
    let current = matches.iter().map(|m| m.round).max().unwrap_or(0);
    if current >= total_rounds {
        return Err(BracketError::SwissRoundsExhausted(total_rounds));
    }
    if matches.iter().any(|m| m.round == current && !m.is_decided()) {
        return Err(BracketError::SwissRoundIncomplete(current));
    }
    let seeded = seed_competitors(competitors);
    let mut updated = matches.to_vec();
    updated.extend(pair_swiss_round(matches, &seeded, current + 1));
    log::info!("swiss round {} of {} paired", current + 1, total_rounds);
    Ok(updated)
}
