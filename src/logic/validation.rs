//! Advisory checks for placing a player in a slot. Warnings never block anything.

use crate::models::{BracketError, Competitor, PoolBracket, SlotId};
use serde::{Deserialize, Serialize};

/// UTR distance from the pool round average above which a placement is flagged.
pub const UTR_IMBALANCE_THRESHOLD: f64 = 3.0;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    SameSchoolRound1,
    UtrImbalance,
}

/// `Error` asks the caller to confirm; `Warning` is informational.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
}

/// Check a proposed placement of `candidate` into `slot_id`.
pub fn validate_slot_change(
    bracket: &PoolBracket,
    slot_id: SlotId,
    candidate: &Competitor,
) -> Result<Vec<SlotWarning>, BracketError> {
    let slot = bracket
        .slot(slot_id)
        .ok_or(BracketError::SlotNotFound(slot_id))?;
    let peers = bracket.round_slots(slot.pool, slot.round);
    let mut warnings = Vec::new();

    if slot.round == 1 {
        let opponent = peers
            .iter()
            .find(|s| s.position == slot.position ^ 1)
            .and_then(|s| s.occupant.as_ref())
            .filter(|o| o.id != candidate.id);
        if let Some(opponent) = opponent.filter(|o| candidate.same_school(&o.school)) {
            warnings.push(SlotWarning {
                kind: WarningKind::SameSchoolRound1,
                severity: Severity::Error,
                message: format!(
                    "{} and {} are both from {} and would meet in round 1",
                    candidate.name, opponent.name, opponent.school
                ),
            });
        }
    }

    let ratings: Vec<f64> = peers
        .iter()
        .filter(|s| s.id != slot_id)
        .filter_map(|s| s.occupant.as_ref())
        .filter(|o| o.id != candidate.id)
        .filter_map(|o| o.rating)
        .collect();
    if let (Some(rating), false) = (candidate.rating(), ratings.is_empty()) {
        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        if (rating - average).abs() > UTR_IMBALANCE_THRESHOLD {
            warnings.push(SlotWarning {
                kind: WarningKind::UtrImbalance,
                severity: Severity::Warning,
                message: format!(
                    "{} (UTR {:.2}) is {:.2} away from the pool {:?} round {} average of {:.2}",
                    candidate.name,
                    rating,
                    (rating - average).abs(),
                    slot.pool,
                    slot.round,
                    average
                ),
            });
        }
    }

    Ok(warnings)
}
