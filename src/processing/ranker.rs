//! Ranking of scored job records

use crate::processing::record::{JobRecord, StudentProfile};
use crate::processing::scoring::{ScoreBreakdown, ScoringStrategy};
use serde::Serialize;

/// A job scored for one request. Borrows the shared record; the score lives here.
#[derive(Debug, Clone)]
pub struct ScoredJob<'a> {
    pub record: &'a JobRecord,
    pub breakdown: ScoreBreakdown,
}

impl<'a> ScoredJob<'a> {
    pub fn score(&self) -> f64 {
        self.breakdown.total
    }

    pub fn to_ranked(&self) -> RankedJob {
        RankedJob {
            record: self.record.clone(),
            score: self.breakdown.total,
            breakdown: self.breakdown.clone(),
        }
    }
}

/// Owned copy of a ranked job for results that outlive the request
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub record: JobRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score every job and sort by score descending.
///
/// The sort is stable: jobs with equal scores keep their source order.
pub fn rank<'a>(jobs: &'a [JobRecord], student: &StudentProfile, strategy: &dyn ScoringStrategy) -> Vec<ScoredJob<'a>> {
    let mut scored: Vec<ScoredJob<'a>> = jobs
        .iter()
        .map(|record| ScoredJob {
            record,
            breakdown: strategy.breakdown(student, record),
        })
        .collect();

    scored.sort_by(|a, b| b.score().total_cmp(&a.score()));
    scored
}

/// First `n` entries, or all of them when fewer exist
pub fn top<T>(mut ranked: Vec<T>, n: usize) -> Vec<T> {
    ranked.truncate(n);
    ranked
}
