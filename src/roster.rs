//! Roster import: competitors from CSV.
//!
//! Expected header: `name,school,wins,losses,utr,seed`. Every column except `name` may be
//! missing or empty.

use crate::models::Competitor;
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {line}: name is empty")]
    MissingName { line: usize },

    #[error("Row {line}: UTR {utr} is not a valid rating")]
    InvalidRating { line: usize, utr: f64 },
}

/// Whether rows describe teams (win/loss record) or players (UTR).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RosterKind {
    Teams,
    Players,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    school: Option<String>,
    #[serde(default)]
    wins: Option<u32>,
    #[serde(default)]
    losses: Option<u32>,
    #[serde(default)]
    utr: Option<f64>,
    #[serde(default)]
    seed: Option<u32>,
}

pub fn parse_roster_csv<R: Read>(reader: R, kind: RosterKind) -> Result<Vec<Competitor>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut competitors = Vec::new();
    for (i, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = row?;
        if row.name.is_empty() {
            return Err(RosterError::MissingName { line });
        }
        let school = row.school.unwrap_or_default();
        let competitor = match kind {
            RosterKind::Teams => Competitor::team(
                row.name,
                school,
                row.wins.unwrap_or(0),
                row.losses.unwrap_or(0),
            ),
            RosterKind::Players => {
                if let Some(utr) = row.utr.filter(|u| !u.is_finite() || *u < 0.0) {
                    return Err(RosterError::InvalidRating { line, utr });
                }
                Competitor::player(row.name, school, row.utr)
            }
        };
        competitors.push(match row.seed {
            Some(seed) => competitor.with_seed(seed),
            None => competitor,
        });
    }
    log::info!("imported {} competitors from roster", competitors.len());
    Ok(competitors)
}
