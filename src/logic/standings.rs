//! Standings: win/loss/tie tables derived from match lists, plus team-match scoring.

use crate::models::{
    Competitor, CompetitorId, GameMatch, MatchStatus, Side, TeamMatch, TeamMatchOutcome,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a standings table. Never stored; recompute from the matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub competitor_id: CompetitorId,
    pub name: String,
    /// Team-match mode only.
    pub level: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub games_played: u32,
    pub win_pct: f64,
}

impl Standing {
    fn new(competitor_id: CompetitorId, name: String, level: Option<String>) -> Self {
        Self {
            competitor_id,
            name,
            level,
            wins: 0,
            losses: 0,
            ties: 0,
            games_played: 0,
            win_pct: 0.0,
        }
    }

    fn add_win(&mut self) {
        self.wins += 1;
        self.refresh();
    }

    fn add_loss(&mut self) {
        self.losses += 1;
        self.refresh();
    }

    fn add_tie(&mut self) {
        self.ties += 1;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.games_played = self.wins + self.losses + self.ties;
        self.win_pct = f64::from(self.wins) / f64::from(self.games_played);
    }
}

/// Sort by win percentage, then raw wins; equal rows keep their order.
fn rank(standings: &mut [Standing]) {
    standings.sort_by(|a, b| {
        b.win_pct
            .total_cmp(&a.win_pct)
            .then_with(|| b.wins.cmp(&a.wins))
    });
}

/// Standings for a round-robin or Swiss bracket, from decided two-sided matches.
///
/// Byes are not counted. Every competitor gets a row, even without games.
pub fn calculate_standings(matches: &[GameMatch], competitors: &[Competitor]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = competitors
        .iter()
        .map(|c| Standing::new(c.id, c.name.clone(), None))
        .collect();
    let index: HashMap<CompetitorId, usize> = competitors
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
            continue;
        };
        if let Some(&i) = index.get(&winner) {
            standings[i].add_win();
        }
        if let Some(&i) = index.get(&loser) {
            standings[i].add_loss();
        }
    }

    rank(&mut standings);
    standings
}

/// Lines won per side of a team match, and its team-level result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchScore {
    pub home_lines: u32,
    pub away_lines: u32,
    /// Every line has a result.
    pub completed: bool,
    /// Majority of lines; `None` until completed.
    pub outcome: Option<TeamMatchOutcome>,
}

pub fn team_match_score(team_match: &TeamMatch) -> TeamMatchScore {
    let count = |side: Side| {
        team_match
            .lines
            .iter()
            .filter(|l| l.winner == Some(side))
            .count() as u32
    };
    let home_lines = count(Side::Home);
    let away_lines = count(Side::Away);
    let completed =
        !team_match.lines.is_empty() && team_match.lines.iter().all(|l| l.winner.is_some());
    let outcome = completed.then(|| match home_lines.cmp(&away_lines) {
        std::cmp::Ordering::Greater => TeamMatchOutcome::Home,
        std::cmp::Ordering::Less => TeamMatchOutcome::Away,
        std::cmp::Ordering::Equal => TeamMatchOutcome::Tie,
    });
    TeamMatchScore {
        home_lines,
        away_lines,
        completed,
        outcome,
    }
}

/// Standings per (team, level) from completed team matches.
///
/// Teams missing from `teams` are listed under their id.
pub fn calculate_team_standings(team_matches: &[TeamMatch], teams: &[Competitor]) -> Vec<Standing> {
    let names: HashMap<CompetitorId, &str> =
        teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let mut standings: Vec<Standing> = Vec::new();
    let mut index: HashMap<(CompetitorId, String), usize> = HashMap::new();

    for tm in team_matches {
        let Some(outcome) = team_match_score(tm).outcome else {
            continue;
        };
        let result = match outcome {
            TeamMatchOutcome::Home => Some(Side::Home),
            TeamMatchOutcome::Away => Some(Side::Away),
            TeamMatchOutcome::Tie => None,
        };
        for (team, side) in [(tm.home_team, Side::Home), (tm.away_team, Side::Away)] {
            let i = *index.entry((team, tm.level.clone())).or_insert_with(|| {
                let name = names
                    .get(&team)
                    .map_or_else(|| team.to_string(), |n| (*n).to_string());
                standings.push(Standing::new(team, name, Some(tm.level.clone())));
                standings.len() - 1
            });
            match result {
                Some(winner) if winner == side => standings[i].add_win(),
                Some(_) => standings[i].add_loss(),
                None => standings[i].add_tie(),
            }
        }
    }

    rank(&mut standings);
    standings
}
