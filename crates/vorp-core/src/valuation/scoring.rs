// Candidate scoring: VORP weighted by the user's roster need.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::replacement::Replacement;
use crate::config::NeedWeights;
use crate::draft::position::Position;
use crate::draft::roster::NeedState;
use crate::pool::Player;

/// One row of the ranked candidate table.
///
/// `vorp` and `adj_score` are `None` when the player's position has no
/// replacement bar; such rows rank below every row that has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub player: String,
    pub position: Position,
    pub proj_points: f64,
    pub vorp: Option<f64>,
    pub need_state: NeedState,
    pub adj_score: Option<f64>,
}

/// Descending order on optional scores, missing values last.
fn desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Score and rank every available row.
///
/// Ordering is adj_score desc, then vorp desc, then proj_points desc. The
/// sort is stable, so rows that tie on all three keep their pool order.
pub fn candidate_scores(
    available: &[&Player],
    replacement: &BTreeMap<Position, Replacement>,
    needs: &BTreeMap<Position, NeedState>,
    weights: &NeedWeights,
) -> Vec<CandidateScore> {
    let mut rows: Vec<CandidateScore> = available
        .iter()
        .map(|p| {
            let repl = replacement
                .get(&p.position)
                .copied()
                .unwrap_or(Replacement::NoReplacement);
            let need_state = needs.get(&p.position).copied().unwrap_or(NeedState::Blocked);
            let vorp = repl.vorp(p.proj_points);
            let adj_score = vorp.map(|v| v * weights.weight(need_state));
            CandidateScore {
                player: p.name.clone(),
                position: p.position,
                proj_points: p.proj_points,
                vorp,
                need_state,
                adj_score,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        desc(a.adj_score, b.adj_score)
            .then_with(|| desc(a.vorp, b.vorp))
            .then_with(|| desc(Some(a.proj_points), Some(b.proj_points)))
    });
    rows
}
