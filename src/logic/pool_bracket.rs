//! Player mode: two-pool bracket generation, winner progression and slot edits.

use crate::models::{
    BracketError, BracketSlot, Competitor, CompetitorId, GameMatch, MatchId, MatchStatus,
    PoolBracket, PoolSide, Pools, SlotId, SlotOccupant,
};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Build round 1 of both pools and the empty slots of every later round.
///
/// Each pool is shuffled (Fisher-Yates, with the caller's random source) and paired in
/// order; an odd player out gets a bye. `avoid_same_school` does not reject same-school
/// pairs: they are created as normal pending matches and left to
/// [`crate::validate_slot_change`] and manual correction.
pub fn generate_initial_bracket<R: Rng + ?Sized>(
    pools: &Pools,
    avoid_same_school: bool,
    rng: &mut R,
) -> PoolBracket {
    let mut bracket = PoolBracket::default();
    for side in PoolSide::BOTH {
        let mut entrants = pools.pool(side).to_vec();
        entrants.shuffle(rng);
        add_first_round(&mut bracket, side, &entrants, avoid_same_school);
    }

    let byes: Vec<(PoolSide, u32, CompetitorId)> = bracket
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .filter_map(|m| Some((m.pool?, m.round, m.winner?)))
        .collect();
    for (side, round, winner) in byes {
        advance_into_next_round(&mut bracket, side, round, winner);
    }
    bracket
}

fn add_first_round(
    bracket: &mut PoolBracket,
    side: PoolSide,
    entrants: &[Competitor],
    avoid_same_school: bool,
) {
    if entrants.is_empty() {
        return;
    }
    for (k, pair) in entrants.chunks(2).enumerate() {
        let match_number = k as u32 + 1;
        let position = 2 * k as u32;
        let game = match pair {
            [a, b] => {
                if avoid_same_school && a.same_school(&b.school) {
                    log::debug!(
                        "pool {:?} match {}: {} and {} share school {}",
                        side,
                        match_number,
                        a.name,
                        b.name,
                        a.school
                    );
                }
                GameMatch::new(1, match_number, Some(a.id), Some(b.id))
            }
            [a] => GameMatch::bye(1, match_number, a.id),
            _ => continue,
        }
        .in_pool(side);
        for (offset, entrant) in pair.iter().enumerate() {
            let mut slot =
                BracketSlot::occupied(1, side, position + offset as u32, SlotOccupant::from(entrant));
            slot.match_id = Some(game.id);
            bracket.slots.push(slot);
        }
        bracket.matches.push(game);
    }

    // One slot per match of the previous round, down to the pool champion slot.
    let mut slots_in_round = entrants.len().div_ceil(2) as u32;
    let mut round = 2;
    loop {
        for position in 0..slots_in_round {
            bracket.slots.push(BracketSlot::empty(round, side, position));
        }
        if slots_in_round <= 1 {
            break;
        }
        slots_in_round = slots_in_round.div_ceil(2);
        round += 1;
    }
}

/// Fill the first empty slot of `side`'s round `round + 1` with `winner`, then create any
/// next-round match that became playable. No empty slot means nothing to do.
fn advance_into_next_round(bracket: &mut PoolBracket, side: PoolSide, round: u32, winner: CompetitorId) {
    let next_round = round + 1;
    let already_there = bracket
        .slots
        .iter()
        .any(|s| s.pool == side && s.round == next_round && s.occupant_id() == Some(winner));
    if already_there {
        return;
    }
    let Some(occupant) = bracket
        .slots
        .iter()
        .find(|s| s.pool == side && s.round == round && s.occupant_id() == Some(winner))
        .and_then(|s| s.occupant.clone())
    else {
        log::warn!("no round {} slot in pool {:?} holds {}", round, side, winner);
        return;
    };

    let target = bracket
        .round_slots(side, next_round)
        .into_iter()
        .find(|s| s.occupant.is_none())
        .map(|s| s.id);
    match target {
        Some(slot_id) => {
            if let Some(slot) = bracket.slots.iter_mut().find(|s| s.id == slot_id) {
                slot.occupant = Some(occupant);
            }
            create_playable_matches(bracket, side, next_round);
        }
        None => log::debug!("pool {:?} round {} has no empty slot", side, next_round),
    }
}

/// Create matches for adjacent filled slots (2k, 2k+1) of one pool round. The last slot of
/// an odd-sized round gets a bye once every feeder match is decided.
fn create_playable_matches(bracket: &mut PoolBracket, side: PoolSide, round: u32) {
    let slots: Vec<(SlotId, Option<CompetitorId>, Option<MatchId>)> = bracket
        .round_slots(side, round)
        .into_iter()
        .map(|s| (s.id, s.occupant_id(), s.match_id))
        .collect();
    if slots.len() <= 1 {
        return;
    }
    let feeders_decided = bracket
        .matches
        .iter()
        .filter(|m| m.pool == Some(side) && m.round == round - 1)
        .all(GameMatch::is_decided);

    let mut created = Vec::new();
    for (k, pair) in slots.chunks(2).enumerate() {
        let match_number = k as u32 + 1;
        let game = match pair {
            [(a_slot, Some(a), None), (b_slot, Some(b), None)] => {
                (GameMatch::new(round, match_number, Some(*a), Some(*b)), vec![*a_slot, *b_slot])
            }
            [(slot, Some(a), None)] if feeders_decided => {
                (GameMatch::bye(round, match_number, *a), vec![*slot])
            }
            _ => continue,
        };
        created.push(game);
    }

    for (game, slot_ids) in created {
        let game = game.in_pool(side);
        for slot in bracket.slots.iter_mut().filter(|s| slot_ids.contains(&s.id)) {
            slot.match_id = Some(game.id);
        }
        log::debug!("pool {:?} round {} match {} ready", side, round, game.match_number);
        let bye_winner = (game.status == MatchStatus::Bye).then_some(game.winner).flatten();
        bracket.matches.push(game);
        if let Some(winner) = bye_winner {
            advance_into_next_round(bracket, side, round, winner);
        }
    }
}

/// Record a pool match result and move the winner into the next round of the same pool.
pub fn progress_winner(
    bracket: &PoolBracket,
    match_id: MatchId,
    winner: CompetitorId,
    score: impl Into<String>,
) -> Result<PoolBracket, BracketError> {
    let game = bracket
        .game(match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    if !game.has_competitor(winner) {
        return Err(BracketError::WinnerNotInMatch { match_id, winner });
    }
    if game.status == MatchStatus::Bye || (game.is_decided() && game.winner != Some(winner)) {
        return Err(BracketError::MatchDecided(match_id));
    }
    let (round, side) = (game.round, game.pool);

    let mut updated = bracket.clone();
    if let Some(game) = updated.matches.iter_mut().find(|m| m.id == match_id) {
        game.winner = Some(winner);
        game.score = Some(score.into());
        game.status = MatchStatus::Completed;
        game.completed_at = Some(Utc::now());
    }
    match side {
        Some(side) => {
            advance_into_next_round(&mut updated, side, round, winner);
            // A finished feeder may release a bye in the next round.
            create_playable_matches(&mut updated, side, round + 1);
        }
        None => log::warn!("match {} has no pool side", match_id),
    }
    Ok(updated)
}

/// Put `competitor` in a slot before the bracket is locked.
///
/// A slot that already plays in a match also updates that match, which must still be
/// undecided.
pub fn assign_slot(
    bracket: &PoolBracket,
    slot_id: SlotId,
    competitor: &Competitor,
) -> Result<PoolBracket, BracketError> {
    let slot = bracket
        .slot(slot_id)
        .ok_or(BracketError::SlotNotFound(slot_id))?;
    if slot.locked {
        return Err(BracketError::SlotLocked(slot_id));
    }
    let previous = slot.occupant_id();
    let match_id = slot.match_id;

    let mut updated = bracket.clone();
    if let Some(match_id) = match_id {
        let game = updated
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        if game.is_decided() {
            return Err(BracketError::MatchDecided(match_id));
        }
        let replaced = previous.is_some_and(|p| game.replace_competitor(p, competitor.id));
        if !replaced {
            game.fill_first_empty_slot(competitor.id);
        }
    }
    if let Some(slot) = updated.slots.iter_mut().find(|s| s.id == slot_id) {
        slot.occupant = Some(SlotOccupant::from(competitor));
    }
    log::info!("slot {} reassigned to {}", slot_id, competitor.name);
    Ok(updated)
}

/// Lock every slot against edits, after checking nobody sits in two slots of one round.
pub fn lock_slots(bracket: &PoolBracket) -> Result<PoolBracket, BracketError> {
    let mut seen = HashSet::new();
    for slot in &bracket.slots {
        if let Some(id) = slot.occupant_id() {
            if !seen.insert((slot.round, id)) {
                return Err(BracketError::DuplicateSlotAssignment {
                    competitor: id,
                    round: slot.round,
                });
            }
        }
    }
    let mut locked = bracket.clone();
    for slot in &mut locked.slots {
        slot.locked = true;
    }
    Ok(locked)
}
