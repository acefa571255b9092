//! Integration tests for single elimination: pairing, byes, linking and progression.

use tennis_bracket::{
    generate_bracket, get_bracket_summary, start_match, update_match_result, BracketError,
    BracketFormat, Competitor, GameMatch, MatchStatus,
};

/// Teams with ten games each, strongest first.
fn ranked_teams(names: &[&str]) -> Vec<Competitor> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Competitor::team(*name, format!("{name} High"), 10 - i as u32, i as u32))
        .collect()
}

fn round(matches: &[GameMatch], round: u32) -> Vec<GameMatch> {
    let mut in_round: Vec<_> = matches.iter().filter(|m| m.round == round).cloned().collect();
    in_round.sort_by_key(|m| m.match_number);
    in_round
}

fn fed_match<'a>(matches: &'a [GameMatch], game: &GameMatch) -> &'a GameMatch {
    let next = game.next_match_id.expect("match should be linked");
    matches.iter().find(|m| m.id == next).unwrap()
}

#[test]
fn five_teams_give_top_three_seeds_byes() {
    let teams = ranked_teams(&["A", "B", "C", "D", "E"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();

    let first = round(&matches, 1);
    assert_eq!(first.len(), 4);
    for (game, team) in first.iter().take(3).zip(&teams) {
        assert_eq!(game.status, MatchStatus::Bye);
        assert_eq!(game.winner, Some(team.id));
        assert_eq!(game.occupied_slots(), 1);
    }
    assert_eq!(first[3].status, MatchStatus::Pending);
    assert_eq!(first[3].slot_1, Some(teams[3].id));
    assert_eq!(first[3].slot_2, Some(teams[4].id));

    let second = round(&matches, 2);
    assert_eq!(second.len(), 2);
    let filled: usize = second.iter().map(GameMatch::occupied_slots).sum();
    assert_eq!(filled, 3);
    assert_eq!(second[0].slot_1, Some(teams[0].id));
    assert_eq!(second[0].slot_2, Some(teams[1].id));
    assert_eq!(second[1].slot_1, Some(teams[2].id));

    let summary = get_bracket_summary(&matches);
    assert_eq!(summary.round_count, 3);
    assert_eq!(summary.total_matches, 7);
    assert_eq!(summary.completed_matches, 3);
    assert_eq!(summary.current_round, Some(1));
    assert!(!summary.is_complete);
    assert_eq!(summary.winner, None);
}

#[test]
fn rounds_are_linked_by_binary_merge() {
    let teams = ranked_teams(&["A", "B", "C", "D", "E", "F", "G", "H"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let first = round(&matches, 1);
    let second = round(&matches, 2);
    for (i, game) in first.iter().enumerate() {
        assert_eq!(game.next_match_id, Some(second[i / 2].id));
    }
    assert_eq!(round(&matches, 3)[0].next_match_id, None);
}

#[test]
fn completing_a_match_fills_the_fed_match() {
    let teams = ranked_teams(&["A", "B", "C", "D", "E"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let real = round(&matches, 1)[3].clone();
    let before = fed_match(&matches, &real).occupied_slots();

    let updated = update_match_result(&matches, real.id, teams[4].id, "6-4 6-3").unwrap();

    let game = updated.iter().find(|m| m.id == real.id).unwrap();
    assert_eq!(game.status, MatchStatus::Completed);
    assert_eq!(game.winner, Some(teams[4].id));
    assert_eq!(game.score.as_deref(), Some("6-4 6-3"));
    assert!(game.completed_at.is_some());
    let fed = fed_match(&updated, game);
    assert_eq!(fed.occupied_slots(), before + 1);
    assert_eq!(fed.slot_2, Some(teams[4].id));
    // The input list is untouched.
    assert_eq!(round(&matches, 1)[3].status, MatchStatus::Pending);
}

#[test]
fn repeating_a_result_changes_nothing_downstream() {
    let teams = ranked_teams(&["A", "B", "C", "D"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let opener = round(&matches, 1)[0].clone();

    let once = update_match_result(&matches, opener.id, teams[0].id, "6-0 6-0").unwrap();
    let twice = update_match_result(&once, opener.id, teams[0].id, "6-0 6-0").unwrap();

    let a = once.iter().find(|m| m.id == opener.id).unwrap();
    let b = twice.iter().find(|m| m.id == opener.id).unwrap();
    assert_eq!((a.winner, &a.score, a.status), (b.winner, &b.score, b.status));
    assert_eq!(fed_match(&once, a), fed_match(&twice, b));
    assert_eq!(fed_match(&twice, b).occupied_slots(), 1);
}

#[test]
fn correcting_a_result_swaps_the_advanced_competitor() {
    let teams = ranked_teams(&["A", "B", "C", "D"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let opener = round(&matches, 1)[0].clone();

    let wrong = update_match_result(&matches, opener.id, teams[1].id, "6-4 6-4").unwrap();
    let fixed = update_match_result(&wrong, opener.id, teams[0].id, "6-4 6-4").unwrap();

    let fed = fed_match(&fixed, &opener);
    assert_eq!(fed.slot_1, Some(teams[0].id));
    assert!(!fed.has_competitor(teams[1].id));
}

#[test]
fn correction_is_rejected_once_the_fed_match_is_decided() {
    let teams = ranked_teams(&["A", "B", "C", "D"]);
    let mut matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let first = round(&matches, 1);
    matches = update_match_result(&matches, first[0].id, teams[0].id, "6-1 6-1").unwrap();
    matches = update_match_result(&matches, first[1].id, teams[2].id, "6-1 6-1").unwrap();
    let final_id = round(&matches, 2)[0].id;
    matches = update_match_result(&matches, final_id, teams[0].id, "7-5 7-5").unwrap();

    let err = update_match_result(&matches, first[0].id, teams[1].id, "6-1 6-1").unwrap_err();
    assert_eq!(err, BracketError::DownstreamMatchCompleted(final_id));
}

#[test]
fn match_waiting_for_its_feeder_cannot_be_decided() {
    let teams = ranked_teams(&["A", "B", "C", "D", "E"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let waiting = round(&matches, 2)[1].clone();
    assert_eq!(waiting.occupied_slots(), 1);

    assert_eq!(
        update_match_result(&matches, waiting.id, teams[2].id, "6-0 6-0").unwrap_err(),
        BracketError::MatchNotReady(waiting.id)
    );

    let feeder = round(&matches, 1)[3].clone();
    let updated = update_match_result(&matches, feeder.id, teams[3].id, "6-4 6-4").unwrap();
    let fed = updated.iter().find(|m| m.id == waiting.id).unwrap();
    assert_eq!(fed.status, MatchStatus::Pending);
    assert_eq!(fed.winner, None);
    assert_eq!(fed.slot_2, Some(teams[3].id));
}

#[test]
fn byes_cannot_be_rescored() {
    let teams = ranked_teams(&["A", "B", "C"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let bye = round(&matches, 1)[0].clone();
    assert_eq!(bye.status, MatchStatus::Bye);
    assert_eq!(
        update_match_result(&matches, bye.id, teams[0].id, "6-0 6-0").unwrap_err(),
        BracketError::MatchDecided(bye.id)
    );
}

#[test]
fn correction_is_rejected_once_the_fed_match_has_started() {
    let teams = ranked_teams(&["A", "B", "C", "D"]);
    let mut matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let first = round(&matches, 1);
    matches = update_match_result(&matches, first[0].id, teams[1].id, "6-4 6-4").unwrap();
    matches = update_match_result(&matches, first[1].id, teams[2].id, "6-4 6-4").unwrap();
    let final_id = round(&matches, 2)[0].id;
    matches = start_match(&matches, final_id).unwrap();

    assert_eq!(
        update_match_result(&matches, first[0].id, teams[0].id, "6-4 6-4").unwrap_err(),
        BracketError::DownstreamMatchStarted(final_id)
    );
    let fin = matches.iter().find(|m| m.id == final_id).unwrap();
    assert!(fin.has_competitor(teams[1].id));
}

#[test]
fn unknown_match_and_foreign_winner_are_errors() {
    let teams = ranked_teams(&["A", "B", "C", "D"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        update_match_result(&matches, missing, teams[0].id, "").unwrap_err(),
        BracketError::MatchNotFound(missing)
    );

    let opener = round(&matches, 1)[0].clone();
    assert!(matches!(
        update_match_result(&matches, opener.id, teams[3].id, ""),
        Err(BracketError::WinnerNotInMatch { .. })
    ));
}

#[test]
fn playing_every_match_crowns_a_champion() {
    let teams = ranked_teams(&["A", "B", "C", "D", "E", "F"]);
    let mut matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    for r in 1..=3 {
        for game in round(&matches, r) {
            if game.is_decided() {
                continue;
            }
            let winner = game.slot_1.unwrap();
            matches = update_match_result(&matches, game.id, winner, "6-2 6-2").unwrap();
        }
    }
    let summary = get_bracket_summary(&matches);
    assert!(summary.is_complete);
    assert_eq!(summary.current_round, None);
    assert_eq!(summary.completed_matches, 7);
    assert_eq!(summary.winner, Some(teams[0].id));
}

#[test]
fn explicit_seeds_override_records() {
    let teams: Vec<Competitor> = ranked_teams(&["A", "B", "C", "D"])
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.with_seed(4 - i as u32))
        .collect();
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let opener = &round(&matches, 1)[0];
    assert_eq!(opener.slot_1, Some(teams[3].id));
    assert_eq!(opener.slot_2, Some(teams[2].id));
}

#[test]
fn start_match_requires_two_competitors() {
    let teams = ranked_teams(&["A", "B", "C"]);
    let matches = generate_bracket(BracketFormat::SingleElimination, &teams).unwrap();
    let first = round(&matches, 1);

    let started = start_match(&matches, first[1].id).unwrap();
    let game = started.iter().find(|m| m.id == first[1].id).unwrap();
    assert_eq!(game.status, MatchStatus::InProgress);

    assert_eq!(
        start_match(&matches, first[0].id).unwrap_err(),
        BracketError::MatchDecided(first[0].id)
    );
    let final_id = round(&matches, 2)[0].id;
    assert_eq!(
        start_match(&matches, final_id).unwrap_err(),
        BracketError::MatchNotReady(final_id)
    );
}

#[test]
fn duplicate_competitors_are_rejected() {
    let team = Competitor::team("A", "North", 3, 1);
    let err = generate_bracket(BracketFormat::SingleElimination, &[team.clone(), team.clone()])
        .unwrap_err();
    assert_eq!(err, BracketError::DuplicateCompetitor(team.id));
}

#[test]
fn fewer_than_two_competitors_make_no_matches() {
    let teams = ranked_teams(&["A"]);
    assert!(generate_bracket(BracketFormat::SingleElimination, &teams)
        .unwrap()
        .is_empty());
    assert!(generate_bracket(BracketFormat::RoundRobin, &[]).unwrap().is_empty());
}
