//! Tennis bracket engine: library with models and bracket logic.
//!
//! Everything in [`logic`] is a pure transformation over plain data; the `web` binary
//! hosts tournaments in memory and serializes writes per tournament.

pub mod config;
pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    advance_swiss_round, assign_slot, assign_tournament_slot, build_two_pools,
    calculate_standings, calculate_team_standings, ensure_unique_ids, generate_bracket,
    generate_initial_bracket, generate_round_robin, generate_single_elimination,
    get_bracket_summary, group_by_school, link_elimination_rounds, lock_slots,
    lock_tournament_slots, next_swiss_round, pair_swiss_round, progress_winner,
    resolve_same_school_conflicts, seed_competitors, start_match, start_tournament,
    start_tournament_match, strength_score, submit_match_result, swiss_score, team_match_score,
    tournament_standings, tournament_summary, update_match_result, validate_slot_change,
    validate_tournament_slot, BracketRound, BracketSummary, Severity, SlotWarning, Standing,
    TeamMatchScore, WarningKind, MIN_COMPETITORS, RELIABILITY_GAMES, UTR_IMBALANCE_THRESHOLD,
};
pub use models::{
    BracketError, BracketFormat, BracketResult, BracketSlot, Competitor, CompetitorId, GameMatch,
    LinePosition, LineResult, MatchId, MatchStatus, PoolBracket, PoolSide, Pools, SchoolGroup,
    Side, SlotId, SlotOccupant, StrengthIndicator, TeamMatch, TeamMatchId, TeamMatchOutcome,
    Tournament, TournamentError, TournamentId, TournamentMode, TournamentState,
};
pub use roster::{parse_roster_csv, RosterError, RosterKind};
