//! Tournament, TournamentMode and TournamentState.

use crate::models::competitor::{Competitor, CompetitorId};
use crate::models::error::BracketError;
use crate::models::game::{BracketFormat, GameMatch};
use crate::models::pool::PoolBracket;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Invalid state for this action")]
    InvalidState,

    #[error("Need at least {required} competitors to start")]
    NotEnoughCompetitors { required: usize },

    #[error("Competitor {0} not found")]
    CompetitorNotFound(CompetitorId),

    #[error("A competitor with this name already exists")]
    DuplicateCompetitorName,

    #[error("Competitor name is empty")]
    EmptyName,

    #[error("Tournament changed since version {expected} (now {actual}); reload and retry")]
    StaleVersion { expected: u64, actual: u64 },

    #[error(transparent)]
    Bracket(#[from] BracketError),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Team tournaments use a bracket format; player tournaments use the two-pool bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentMode {
    Team { format: BracketFormat },
    Player { avoid_same_school: bool },
}

impl Default for TournamentMode {
    fn default() -> Self {
        TournamentMode::Team {
            format: BracketFormat::SingleElimination,
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding competitors; no bracket yet.
    #[default]
    Setup,
    /// Bracket generated; results being entered.
    InProgress,
    /// Every match decided.
    Completed,
}

/// Full tournament state: competitors, generated bracket and a version stamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub mode: TournamentMode,
    pub competitors: Vec<Competitor>,
    /// Team mode bracket.
    pub matches: Vec<GameMatch>,
    /// Player mode bracket.
    pub pool_bracket: Option<PoolBracket>,
    pub state: TournamentState,
    /// Bumped on every bracket mutation; writers must present the version they read.
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no competitors.
    pub fn new(name: impl Into<String>, mode: TournamentMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
            competitors: Vec::new(),
            matches: Vec::new(),
            pool_bracket: None,
            state: TournamentState::Setup,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with initial competitors. Still in Setup until started.
    pub fn with_competitors(
        name: impl Into<String>,
        mode: TournamentMode,
        competitors: Vec<Competitor>,
    ) -> Self {
        Self {
            competitors,
            ..Self::new(name, mode)
        }
    }

    pub fn competitor(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }

    /// Look up a competitor or fail with `CompetitorNotFound`.
    pub fn require_competitor(&self, id: CompetitorId) -> Result<&Competitor, TournamentError> {
        self.competitor(id)
            .ok_or(TournamentError::CompetitorNotFound(id))
    }

    /// Add a competitor (Setup only). Names are unique, case-insensitive.
    pub fn add_competitor(&mut self, mut competitor: Competitor) -> Result<CompetitorId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = competitor.name.trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let is_duplicate = self
            .competitors
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&name));
        if is_duplicate {
            return Err(TournamentError::DuplicateCompetitorName);
        }
        if self.competitors.iter().any(|c| c.id == competitor.id) {
            return Err(BracketError::DuplicateCompetitor(competitor.id).into());
        }
        competitor.name = name;
        let id = competitor.id;
        self.competitors.push(competitor);
        Ok(id)
    }

    /// Remove a competitor by id (Setup only).
    pub fn remove_competitor(&mut self, id: CompetitorId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))?;
        self.competitors.remove(idx);
        Ok(())
    }

    /// Reject writes based on an outdated read.
    pub fn check_version(&self, expected: u64) -> Result<(), TournamentError> {
        if expected != self.version {
            return Err(TournamentError::StaleVersion {
                expected,
                actual: self.version,
            });
        }
        Ok(())
    }

    /// Matches of whichever bracket this tournament uses.
    pub fn bracket_matches(&self) -> &[GameMatch] {
        match &self.pool_bracket {
            Some(bracket) => &bracket.matches,
            None => &self.matches,
        }
    }

    /// Restart: back to Setup with the same competitors. Clears the bracket.
    pub fn restart_tournament(&mut self, expected_version: u64) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.check_version(expected_version)?;
        self.matches.clear();
        self.pool_bracket = None;
        self.state = TournamentState::Setup;
        self.version += 1;
        Ok(())
    }
}
