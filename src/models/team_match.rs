//! Team dual matches made of singles and doubles lines.

use crate::models::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team match.
pub type TeamMatchId = Uuid;

/// Which side of a team match won a line.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// A lineup position, e.g. `Singles(1)` or `Doubles(2)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "number", rename_all = "snake_case")]
pub enum LinePosition {
    Singles(u8),
    Doubles(u8),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    pub position: LinePosition,
    /// None until the line has been played.
    pub winner: Option<Side>,
}

/// Team-level result of a completed team match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMatchOutcome {
    Home,
    Away,
    Tie,
}

/// A team match between two teams at one level.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub id: TeamMatchId,
    pub home_team: CompetitorId,
    pub away_team: CompetitorId,
    /// Squad tier, e.g. "Varsity" or "JV".
    pub level: String,
    pub lines: Vec<LineResult>,
}

impl TeamMatch {
    /// A team match with the given lineup positions, none played yet.
    pub fn new(
        home_team: CompetitorId,
        away_team: CompetitorId,
        level: impl Into<String>,
        positions: impl IntoIterator<Item = LinePosition>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team,
            away_team,
            level: level.into(),
            lines: positions
                .into_iter()
                .map(|position| LineResult { position, winner: None })
                .collect(),
        }
    }

    /// Record the winner of one line. Returns false if the position is not in the lineup.
    pub fn set_line_winner(&mut self, position: LinePosition, winner: Side) -> bool {
        match self.lines.iter_mut().find(|l| l.position == position) {
            Some(line) => {
                line.winner = Some(winner);
                true
            }
            None => false,
        }
    }
}
