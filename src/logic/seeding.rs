//! Strength scores and seed ordering.

use crate::models::{BracketError, Competitor, StrengthIndicator};
use std::collections::HashSet;

/// Games after which a team record counts at full weight.
pub const RELIABILITY_GAMES: f64 = 10.0;

/// Comparable strength for a competitor.
///
/// Teams: `win_pct * min(games / 10, 1)`, so a 1-0 team does not outrank a 15-3 team.
/// Players: raw UTR, with unrated players at 0.
pub fn strength_score(competitor: &Competitor) -> f64 {
    match competitor.strength {
        StrengthIndicator::Record { wins, losses } => {
            let games = wins + losses;
            if games == 0 {
                return 0.0;
            }
            let games = f64::from(games);
            let win_pct = f64::from(wins) / games;
            let reliability = (games / RELIABILITY_GAMES).min(1.0);
            win_pct * reliability
        }
        StrengthIndicator::Rating { .. } => competitor.rating().unwrap_or(0.0),
    }
}

/// Unrated players rank below every rated competitor, whatever the rating.
fn is_unrated(competitor: &Competitor) -> bool {
    matches!(competitor.strength, StrengthIndicator::Rating { .. }) && competitor.rating().is_none()
}

/// Order competitors for pairing, strongest first.
///
/// When every competitor has an explicit seed, seeds win (ascending) and strength is
/// ignored. Unrated players come after rated ones. Ties keep input order.
pub fn seed_competitors(competitors: &[Competitor]) -> Vec<Competitor> {
    let mut seeded = competitors.to_vec();
    let all_seeded = !seeded.is_empty() && seeded.iter().all(|c| c.seed.is_some());
    if all_seeded {
        seeded.sort_by_key(|c| c.seed);
    } else {
        seeded.sort_by(|a, b| {
            is_unrated(a)
                .cmp(&is_unrated(b))
                .then_with(|| strength_score(b).total_cmp(&strength_score(a)))
        });
    }
    seeded
}

/// Reject competitor lists that contain the same id twice.
pub fn ensure_unique_ids(competitors: &[Competitor]) -> Result<(), BracketError> {
    let mut seen = HashSet::with_capacity(competitors.len());
    for c in competitors {
        if !seen.insert(c.id) {
            return Err(BracketError::DuplicateCompetitor(c.id));
        }
    }
    Ok(())
}
