//! Job recommender library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{RecommenderError, Result};
pub use processing::dataset::{Dataset, Datasets, SharedDatasets};
pub use processing::engine::{recommend, MatchResult, RecommendationEngine};
pub use processing::record::{Category, JobRecord, StudentProfile};
