//! Player mode: group entrants by school and split the schools over two pools.

use crate::logic::seeding::ensure_unique_ids;
use crate::models::{BracketError, Competitor, PoolSide, Pools, SchoolGroup};

/// Group players by school, in order of first appearance.
///
/// The average rating only counts rated players; unrated players are still grouped.
pub fn group_by_school(players: &[Competitor]) -> Vec<SchoolGroup> {
    let mut groups: Vec<SchoolGroup> = Vec::new();
    for p in players {
        match groups.iter_mut().find(|g| p.same_school(&g.school)) {
            Some(group) => group.players.push(p.clone()),
            None => groups.push(SchoolGroup {
                school: p.school.trim().to_string(),
                players: vec![p.clone()],
                average_rating: 0.0,
            }),
        }
    }
    for group in &mut groups {
        let ratings: Vec<f64> = group.players.iter().filter_map(Competitor::rating).collect();
        if !ratings.is_empty() {
            group.average_rating = ratings.iter().sum::<f64>() / ratings.len() as f64;
        }
    }
    groups
}

/// Split schools across Pool A and Pool B.
///
/// Schools are sorted by average rating (strongest first) and dealt alternately, even
/// index to A and odd to B, so strong and weak schools interleave. Whole schools stay
/// together. This is a heuristic, not an optimal balance.
pub fn build_two_pools(players: &[Competitor]) -> Result<Pools, BracketError> {
    ensure_unique_ids(players)?;
    let mut groups = group_by_school(players);
    groups.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));

    let mut pools = Pools::default();
    for (i, group) in groups.into_iter().enumerate() {
        let side = if i % 2 == 0 { PoolSide::A } else { PoolSide::B };
        log::debug!(
            "school {} (avg {:.2}, {} players) -> pool {:?}",
            group.school,
            group.average_rating,
            group.players.len(),
            side
        );
        pools.pool_mut(side).extend(group.players);
    }
    log::info!(
        "built pools: {} in A, {} in B",
        pools.pool_a.len(),
        pools.pool_b.len()
    );
    Ok(pools)
}

/// Move one player per school that is split across both pools.
///
/// For each such school, if one pool holds strictly more of its players (and more than
/// one), the last of them moves to the other pool. A single pass; some overlap may remain.
pub fn resolve_same_school_conflicts(pools: &Pools) -> Pools {
    let mut resolved = pools.clone();
    let mut schools: Vec<String> = Vec::new();
    for p in pools.pool_a.iter().chain(pools.pool_b.iter()) {
        if !schools.iter().any(|s| p.same_school(s)) {
            schools.push(p.school.clone());
        }
    }

    for school in &schools {
        let in_a = resolved.school_count(PoolSide::A, school);
        let in_b = resolved.school_count(PoolSide::B, school);
        if in_a == 0 || in_b == 0 {
            continue;
        }
        let from = if in_a > in_b && in_a > 1 {
            PoolSide::A
        } else if in_b > in_a && in_b > 1 {
            PoolSide::B
        } else {
            continue;
        };
        let source = resolved.pool_mut(from);
        if let Some(index) = source.iter().rposition(|p| p.same_school(school)) {
            let moved = source.remove(index);
            log::debug!(
                "moving {} ({}) from pool {:?} to pool {:?}",
                moved.name,
                school,
                from,
                from.other()
            );
            resolved.pool_mut(from.other()).push(moved);
        }
    }
    resolved
}
