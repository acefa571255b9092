//! Format dispatch and bracket snapshots.

use crate::logic::elimination::generate_single_elimination;
use crate::logic::round_robin::generate_round_robin;
use crate::logic::seeding::{ensure_unique_ids, seed_competitors};
use crate::logic::swiss::pair_swiss_round;
use crate::models::{BracketError, BracketFormat, Competitor, CompetitorId, GameMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seed the competitors and build the matches for `format`.
///
/// Swiss brackets get their first round only; see [`crate::next_swiss_round`].
pub fn generate_bracket(
    format: BracketFormat,
    competitors: &[Competitor],
) -> Result<Vec<GameMatch>, BracketError> {
    ensure_unique_ids(competitors)?;
    let seeded = seed_competitors(competitors);
    let matches = match format {
        BracketFormat::SingleElimination => generate_single_elimination(&seeded),
        BracketFormat::RoundRobin => generate_round_robin(&seeded),
        BracketFormat::Swiss { rounds: 0 } => Vec::new(),
        BracketFormat::Swiss { .. } if seeded.len() < 2 => Vec::new(),
        BracketFormat::Swiss { .. } => pair_swiss_round(&[], &seeded, 1),
    };
    log::info!(
        "generated {:?} bracket: {} competitors, {} matches",
        format,
        competitors.len(),
        matches.len()
    );
    Ok(matches)
}

/// One round of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub number: u32,
    pub matches: Vec<GameMatch>,
}

/// Aggregate view of a match list, always rebuilt from scratch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub rounds: Vec<BracketRound>,
    pub round_count: u32,
    pub total_matches: usize,
    pub completed_matches: usize,
    /// Lowest round that still has an undecided match.
    pub current_round: Option<u32>,
    pub is_complete: bool,
    /// Winner of the final when the bracket is complete and ends in a single match.
    pub winner: Option<CompetitorId>,
}

pub fn get_bracket_summary(matches: &[GameMatch]) -> BracketSummary {
    let mut by_round: BTreeMap<u32, Vec<GameMatch>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round).or_default().push(m.clone());
    }
    let rounds: Vec<BracketRound> = by_round
        .into_iter()
        .map(|(number, mut matches)| {
            matches.sort_by_key(|m| (m.pool, m.match_number));
            BracketRound { number, matches }
        })
        .collect();

    let total_matches = matches.len();
    let completed_matches = matches.iter().filter(|m| m.is_decided()).count();
    let current_round = matches
        .iter()
        .filter(|m| !m.is_decided())
        .map(|m| m.round)
        .min();
    let is_complete = total_matches > 0 && completed_matches == total_matches;
    let winner = match rounds.last() {
        Some(last) if is_complete && last.matches.len() == 1 => last.matches[0].winner,
        _ => None,
    };

    BracketSummary {
        round_count: rounds.len() as u32,
        rounds,
        total_matches,
        completed_matches,
        current_round,
        is_complete,
        winner,
    }
}
