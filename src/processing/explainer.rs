//! Matched and missing skills for a recommended job

use crate::processing::record::{JobRecord, StudentProfile};
use crate::processing::skills::{matched_skills, MatchMode};
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_MISSING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Explanation {
    pub matched: BTreeSet<String>,
    pub missing: Vec<String>,
}

pub struct Explainer {
    mode: MatchMode,
    missing_limit: usize,
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new(MatchMode::Substring, DEFAULT_MISSING_LIMIT)
    }
}

impl Explainer {
    pub fn new(mode: MatchMode, missing_limit: usize) -> Self {
        Self { mode, missing_limit }
    }

    /// Student skills found in the job, and the first job skills no student
    /// skill covers, in the job's skill order.
    ///
    /// In substring mode "sql" counts as matching the job token "mysql".
    pub fn explain(&self, student: &StudentProfile, job: &JobRecord) -> Explanation {
        let matched = matched_skills(&student.skills, &job.skills, self.mode);

        let missing = job
            .skills
            .iter()
            .filter(|token| !student.skills.iter().any(|skill| self.mode.matches(skill, token)))
            .take(self.missing_limit)
            .map(|token| token.to_string())
            .collect();

        Explanation { matched, missing }
    }
}

/// Explain with substring matching and at most five missing skills
pub fn explain(student: &StudentProfile, job: &JobRecord) -> Explanation {
    Explainer::default().explain(student, job)
}
