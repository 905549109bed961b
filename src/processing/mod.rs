//! Normalization, scoring, ranking and explanation of job records

pub mod columns;
pub mod dataset;
pub mod engine;
pub mod explainer;
pub mod normalizer;
pub mod ranker;
pub mod record;
pub mod scoring;
pub mod skills;
