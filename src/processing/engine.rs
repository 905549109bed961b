//! Recommendation entry point: score, rank and explain across datasets

use crate::config::{ScoringConfig, WeightsConfig};
use crate::error::{RecommenderError, Result};
use crate::processing::dataset::Datasets;
use crate::processing::explainer::Explainer;
use crate::processing::ranker::{rank, top, RankedJob, ScoredJob};
use crate::processing::record::{Category, StudentProfile};
use crate::processing::scoring::{
    ScoringStrategy, SkillCountStrategy, SkillsAcademicStrategy, StrategyKind, WeightedFactorStrategy,
};
use crate::processing::skills::MatchMode;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Top record per category, absent when the category has no qualifying record
    pub best_per_category: BTreeMap<Category, Option<RankedJob>>,
    pub ranked_domestic: Vec<RankedJob>,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: Vec<String>,
    /// Category whose best match the skill explanation describes
    pub explained_category: Option<Category>,
}

impl MatchResult {
    pub fn best(&self, category: Category) -> Option<&RankedJob> {
        self.best_per_category.get(&category).and_then(|job| job.as_ref())
    }
}

pub struct RecommendationEngine {
    strategies: BTreeMap<Category, Box<dyn ScoringStrategy>>,
    explainer: Explainer,
    top_n: usize,
    min_score: f64,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default(), &WeightsConfig::default())
    }
}

impl RecommendationEngine {
    pub fn from_config(scoring: &ScoringConfig, weights: &WeightsConfig) -> Self {
        let strategies = Category::ALL
            .iter()
            .map(|category| {
                let kind = match category {
                    Category::Domestic => scoring.domestic_strategy,
                    Category::Foreign | Category::Market => StrategyKind::Weighted,
                };
                (*category, build_strategy(kind, *category, scoring, weights))
            })
            .collect();

        Self {
            strategies,
            explainer: Explainer::new(scoring.match_mode, scoring.missing_limit),
            top_n: scoring.top_n,
            min_score: scoring.min_score,
        }
    }

    pub fn with_strategy(mut self, category: Category, strategy: Box<dyn ScoringStrategy>) -> Self {
        self.strategies.insert(category, strategy);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn strategy(&self, category: Category) -> Option<&dyn ScoringStrategy> {
        self.strategies.get(&category).map(|s| s.as_ref())
    }

    /// Score every dataset for `student` and assemble the result.
    ///
    /// Output depends only on the student and the dataset snapshot. Fails only
    /// when the datasets hold no records at all.
    pub fn recommend(&self, student: &StudentProfile, datasets: &Datasets) -> Result<MatchResult> {
        if datasets.total_records() == 0 {
            return Err(RecommenderError::NoUsableRows {
                sources: datasets.len(),
            });
        }

        if student.skills.is_empty() {
            warn!("Student '{}' listed no skills; skill factors contribute nothing", student.name);
        }

        let mut best_per_category = BTreeMap::new();
        let mut ranked_domestic = Vec::new();

        for category in Category::ALL {
            let (Some(dataset), Some(strategy)) = (datasets.get(category), self.strategy(category)) else {
                best_per_category.insert(category, None);
                continue;
            };

            let ranked: Vec<ScoredJob<'_>> = rank(dataset.records(), student, strategy)
                .into_iter()
                .filter(|scored| scored.score() >= self.min_score)
                .collect();

            debug!(
                "{}: {} of {} records qualify with strategy '{}'",
                category,
                ranked.len(),
                dataset.records().len(),
                strategy.name()
            );

            best_per_category.insert(category, ranked.first().map(ScoredJob::to_ranked));

            if category == Category::Domestic {
                ranked_domestic = top(ranked, self.top_n).iter().map(ScoredJob::to_ranked).collect();
            }
        }

        let explained = Category::ALL.iter().find_map(|category| {
            best_per_category
                .get(category)
                .and_then(|job| job.as_ref())
                .map(|job| (*category, job))
        });

        let (explained_category, explanation) = match explained {
            Some((category, job)) => (Some(category), self.explainer.explain(student, &job.record)),
            None => (None, Default::default()),
        };

        info!(
            "Recommended {} domestic jobs for '{}' ({} matched skills)",
            ranked_domestic.len(),
            student.name,
            explanation.matched.len()
        );

        Ok(MatchResult {
            best_per_category,
            ranked_domestic,
            matched_skills: explanation.matched,
            missing_skills: explanation.missing,
            explained_category,
        })
    }
}

fn build_strategy(
    kind: StrategyKind,
    category: Category,
    scoring: &ScoringConfig,
    weights: &WeightsConfig,
) -> Box<dyn ScoringStrategy> {
    match kind {
        StrategyKind::Weighted => Box::new(
            WeightedFactorStrategy::new(category.as_str(), weights.for_category(category).clone())
                .with_cap(scoring.total_cap.into())
                .with_skill_match(MatchMode::Exact),
        ),
        StrategyKind::SkillsAcademic => Box::new(SkillsAcademicStrategy::new(
            scoring.skills_academic.clone(),
            scoring.match_mode,
        )),
        StrategyKind::SkillCount => Box::new(SkillCountStrategy::new(scoring.match_mode)),
    }
}

/// Recommend with the default weights, alias tables and strategy
pub fn recommend(student: &StudentProfile, datasets: &Datasets) -> Result<MatchResult> {
    RecommendationEngine::default().recommend(student, datasets)
}
