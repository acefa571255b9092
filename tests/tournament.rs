//! Tournament lifecycle: setup, start, results with version checks, restart.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tennis_bracket::{
    advance_swiss_round, start_tournament, start_tournament_match, submit_match_result,
    tournament_standings, tournament_summary, BracketError, BracketFormat, Competitor,
    MatchStatus, PoolSide, Tournament, TournamentError, TournamentMode, TournamentState,
};

fn team_mode(format: BracketFormat) -> TournamentMode {
    TournamentMode::Team { format }
}

fn team_tournament(format: BracketFormat, n: usize) -> Tournament {
    let teams = (0..n)
        .map(|i| Competitor::team(format!("Team {i}"), "League", 10 - i as u32, i as u32))
        .collect();
    Tournament::with_competitors("Spring Duals", team_mode(format), teams)
}

/// Submit slot 1 as the winner of every playable match until none is left.
fn play_out(tournament: &mut Tournament) {
    loop {
        let playable = tournament
            .bracket_matches()
            .iter()
            .find(|m| !m.is_decided() && m.occupied_slots() == 2)
            .cloned();
        let Some(game) = playable else {
            break;
        };
        let version = tournament.version;
        submit_match_result(tournament, game.id, game.slot_1.unwrap(), "6-3 6-3", version)
            .unwrap();
    }
}

#[test]
fn competitor_names_are_trimmed_and_unique() {
    let mut t = Tournament::new("Open", TournamentMode::default());
    let id = t
        .add_competitor(Competitor::team("  Eagles ", "North", 0, 0))
        .unwrap();
    assert_eq!(t.competitor(id).unwrap().name, "Eagles");

    assert_eq!(
        t.add_competitor(Competitor::team("eagles", "South", 0, 0)),
        Err(TournamentError::DuplicateCompetitorName)
    );
    assert_eq!(
        t.add_competitor(Competitor::team("   ", "South", 0, 0)),
        Err(TournamentError::EmptyName)
    );

    t.remove_competitor(id).unwrap();
    assert!(t.competitors.is_empty());
    assert_eq!(
        t.remove_competitor(id),
        Err(TournamentError::CompetitorNotFound(id))
    );
}

#[test]
fn start_needs_two_competitors() {
    let mut t = team_tournament(BracketFormat::SingleElimination, 1);
    let err = start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert_eq!(err, TournamentError::NotEnoughCompetitors { required: 2 });
    assert_eq!(t.state, TournamentState::Setup);
    assert_eq!(t.version, 0);
}

#[test]
fn roster_is_frozen_once_started() {
    let mut t = team_tournament(BracketFormat::RoundRobin, 3);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(t.state, TournamentState::InProgress);
    assert_eq!(t.version, 1);
    assert_eq!(t.matches.len(), 3);

    assert_eq!(
        t.add_competitor(Competitor::team("Late", "League", 0, 0)),
        Err(TournamentError::InvalidState)
    );
    assert_eq!(
        start_tournament(&mut t, &mut StdRng::seed_from_u64(1)),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn stale_version_is_rejected() {
    let mut t = team_tournament(BracketFormat::SingleElimination, 4);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    let read_at = t.version;
    let first = t.matches[0].clone();

    submit_match_result(&mut t, first.id, first.slot_1.unwrap(), "6-0 6-0", read_at).unwrap();
    let second = t.matches[1].clone();
    let err = submit_match_result(&mut t, second.id, second.slot_1.unwrap(), "6-0 6-0", read_at)
        .unwrap_err();
    assert_eq!(
        err,
        TournamentError::StaleVersion {
            expected: read_at,
            actual: read_at + 1
        }
    );
    assert_eq!(t.matches[1].status, MatchStatus::Pending);

    assert_eq!(
        t.restart_tournament(read_at),
        Err(TournamentError::StaleVersion {
            expected: read_at,
            actual: read_at + 1
        })
    );
    assert_eq!(t.state, TournamentState::InProgress);
    assert_eq!(t.matches[0].status, MatchStatus::Completed);
}

#[test]
fn winner_must_be_a_known_competitor() {
    let mut t = team_tournament(BracketFormat::SingleElimination, 4);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    let stranger = Competitor::team("Stranger", "Elsewhere", 0, 0);
    let (game, version) = (t.matches[0].clone(), t.version);
    assert_eq!(
        submit_match_result(&mut t, game.id, stranger.id, "", version),
        Err(TournamentError::CompetitorNotFound(stranger.id))
    );
}

#[test]
fn elimination_tournament_completes_with_a_winner() {
    let mut t = team_tournament(BracketFormat::SingleElimination, 4);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();

    let opener = t.matches[0].clone();
    let version = t.version;
    start_tournament_match(&mut t, opener.id, version).unwrap();
    assert_eq!(t.matches[0].status, MatchStatus::InProgress);

    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    let summary = tournament_summary(&t);
    assert!(summary.is_complete);
    assert_eq!(summary.winner, Some(t.competitors[0].id));
    // start, start_match, three results
    assert_eq!(t.version, 5);
}

#[test]
fn swiss_tournament_runs_every_round() {
    let mut t = team_tournament(BracketFormat::Swiss { rounds: 2 }, 4);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    let version = t.version;
    assert_eq!(
        advance_swiss_round(&mut t, version),
        Err(TournamentError::Bracket(BracketError::SwissRoundIncomplete(1)))
    );

    play_out(&mut t);
    assert_eq!(t.state, TournamentState::InProgress);
    let version = t.version;
    advance_swiss_round(&mut t, version).unwrap();
    assert_eq!(t.matches.iter().filter(|m| m.round == 2).count(), 2);

    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    let standings = tournament_standings(&t);
    assert_eq!(standings[0].competitor_id, t.competitors[0].id);
    assert_eq!((standings[0].wins, standings[0].losses), (2, 0));
}

#[test]
fn swiss_advance_needs_a_swiss_tournament() {
    let mut t = team_tournament(BracketFormat::RoundRobin, 4);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    let version = t.version;
    assert_eq!(
        advance_swiss_round(&mut t, version),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn player_tournament_completes_when_both_pools_have_champions() {
    let players = vec![
        Competitor::player("Ana", "Lincoln", Some(10.0)),
        Competitor::player("Cal", "Roosevelt", Some(9.0)),
        Competitor::player("Eve", "Jefferson", Some(8.0)),
        Competitor::player("Gus", "Adams", Some(7.0)),
    ];
    let mode = TournamentMode::Player {
        avoid_same_school: true,
    };
    let mut t = Tournament::with_competitors("County Singles", mode, players);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(9)).unwrap();

    let bracket = t.pool_bracket.as_ref().unwrap();
    assert!(t.matches.is_empty());
    assert_eq!(bracket.matches.len(), 2);
    assert_eq!(bracket.round_slots(PoolSide::A, 1).len(), 2);
    assert_eq!(bracket.round_slots(PoolSide::B, 1).len(), 2);

    play_out(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    let bracket = t.pool_bracket.as_ref().unwrap();
    assert!(bracket.pool_champion(PoolSide::A).is_some());
    assert!(bracket.pool_champion(PoolSide::B).is_some());
}

#[test]
fn restart_clears_the_bracket_and_keeps_the_roster() {
    let mut t = team_tournament(BracketFormat::SingleElimination, 4);
    assert_eq!(t.restart_tournament(0), Err(TournamentError::InvalidState));

    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    play_out(&mut t);
    let version = t.version;

    t.restart_tournament(version).unwrap();
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.matches.is_empty());
    assert!(t.pool_bracket.is_none());
    assert_eq!(t.competitors.len(), 4);
    assert_eq!(t.version, version + 1);
}
