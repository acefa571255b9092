//! Bracket business logic: seeding, generation, progression, pools, standings.

mod bracket;
mod elimination;
mod pool_bracket;
mod pools;
mod progress;
mod round_robin;
mod seeding;
mod setup;
mod standings;
mod swiss;
mod validation;

pub use bracket::{generate_bracket, get_bracket_summary, BracketRound, BracketSummary};
pub use elimination::{
    generate_single_elimination, link_elimination_rounds, start_match, update_match_result,
};
pub use pool_bracket::{assign_slot, generate_initial_bracket, lock_slots, progress_winner};
pub use pools::{build_two_pools, group_by_school, resolve_same_school_conflicts};
pub use progress::{
    advance_swiss_round, assign_tournament_slot, lock_tournament_slots, start_tournament_match,
    submit_match_result, tournament_standings, tournament_summary, validate_tournament_slot,
};
pub use round_robin::generate_round_robin;
pub use seeding::{ensure_unique_ids, seed_competitors, strength_score, RELIABILITY_GAMES};
pub use setup::{start_tournament, MIN_COMPETITORS};
pub use standings::{
    calculate_standings, calculate_team_standings, team_match_score, Standing, TeamMatchScore,
};
pub use swiss::{next_swiss_round, pair_swiss_round, swiss_score};
pub use validation::{
    validate_slot_change, Severity, SlotWarning, WarningKind, UTR_IMBALANCE_THRESHOLD,
};
