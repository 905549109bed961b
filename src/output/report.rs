//! Report structures wrapping a recommendation result for presentation

use crate::processing::columns::CanonicalField;
use crate::processing::dataset::{Dataset, Datasets};
use crate::processing::engine::MatchResult;
use crate::processing::record::{Category, StudentProfile};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recommendation result with the context needed to render it
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub metadata: ReportMetadata,
    pub student: StudentProfile,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    /// Strategy used for domestic listings
    pub strategy: String,
    pub datasets: Vec<DatasetSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub category: Category,
    pub source: String,
    pub records: usize,
    pub degraded_rows: usize,
    pub missing_fields: Vec<CanonicalField>,
}

impl From<&Dataset> for DatasetSummary {
    fn from(dataset: &Dataset) -> Self {
        Self {
            category: dataset.category(),
            source: dataset.source().to_string(),
            records: dataset.records().len(),
            degraded_rows: dataset.degraded_rows(),
            missing_fields: dataset.missing_fields().to_vec(),
        }
    }
}

impl RecommendationReport {
    pub fn new(
        student: StudentProfile,
        result: MatchResult,
        datasets: &Datasets,
        strategy: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                strategy: strategy.into(),
                datasets: datasets.iter().map(DatasetSummary::from).collect(),
            },
            student,
            result,
        }
    }
}
