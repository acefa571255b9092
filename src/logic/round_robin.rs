//! Round robin: every competitor meets every other once.

use crate::models::{Competitor, GameMatch};

/// All `n(n-1)/2` pairings in a single round, numbered in seed order. No byes, no links.
pub fn generate_round_robin(seeded: &[Competitor]) -> Vec<GameMatch> {
    let n = seeded.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, home) in seeded.iter().enumerate() {
        for away in &seeded[i + 1..] {
            let match_number = matches.len() as u32 + 1;
            matches.push(GameMatch::new(1, match_number, Some(home.id), Some(away.id)));
        }
    }
    log::debug!("round robin: {} entrants, {} matches", n, matches.len());
    matches
}
