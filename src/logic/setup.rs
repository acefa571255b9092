//! Setup phase: start tournament (transition from Setup to InProgress).

use crate::logic::bracket::generate_bracket;
use crate::logic::pool_bracket::generate_initial_bracket;
use crate::logic::pools::{build_two_pools, resolve_same_school_conflicts};
use crate::models::{Tournament, TournamentError, TournamentMode, TournamentState};
use rand::Rng;

/// Competitors needed before a bracket can be generated.
pub const MIN_COMPETITORS: usize = 2;

/// Start the tournament: generate the bracket for its mode and move to InProgress.
///
/// Player mode builds the two school pools, applies the conflict pass, then draws round 1
/// with `rng`.
pub fn start_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.competitors.len() < MIN_COMPETITORS {
        return Err(TournamentError::NotEnoughCompetitors {
            required: MIN_COMPETITORS,
        });
    }
    match tournament.mode {
        TournamentMode::Team { format } => {
            tournament.matches = generate_bracket(format, &tournament.competitors)?;
            tournament.pool_bracket = None;
        }
        TournamentMode::Player { avoid_same_school } => {
            let pools = build_two_pools(&tournament.competitors)?;
            let pools = resolve_same_school_conflicts(&pools);
            tournament.pool_bracket = Some(generate_initial_bracket(&pools, avoid_same_school, rng));
            tournament.matches.clear();
        }
    }
    tournament.state = TournamentState::InProgress;
    tournament.version += 1;
    log::info!(
        "tournament {} started with {} competitors",
        tournament.id,
        tournament.competitors.len()
    );
    Ok(())
}
