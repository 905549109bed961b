//! Configuration management for the job recommender

use crate::error::{RecommenderError, Result};
use crate::processing::columns::ColumnAliasTable;
use crate::processing::record::Category;
use crate::processing::scoring::{SkillsAcademicParams, StrategyKind, WeightTable};
use crate::processing::skills::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub columns: ColumnsConfig,
    pub weights: WeightsConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// Dataset file locations; an absent path disables that category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub domestic: Option<PathBuf>,
    pub foreign: Option<PathBuf>,
    pub market: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    pub domestic: ColumnAliasTable,
    pub foreign: ColumnAliasTable,
    pub market: ColumnAliasTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    pub domestic: WeightTable,
    pub foreign: WeightTable,
    pub market: WeightTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Strategy for domestic listings; foreign and market always use weighted factors
    pub domestic_strategy: StrategyKind,
    /// Ceiling for weighted totals, uncapped when absent
    pub total_cap: Option<f64>,
    /// Skill comparison for explanations and the skill-based strategies
    pub match_mode: MatchMode,
    pub top_n: usize,
    pub missing_limit: usize,
    pub min_score: f64,
    pub skills_academic: SkillsAcademicParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for DataConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            domestic: Some(data_dir.join("Indian_Fresher_Salary_Skills_2025.csv")),
            foreign: Some(data_dir.join("data_cleaned_2021.csv")),
            market: Some(data_dir.join("job_market2.csv")),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            domestic: ColumnAliasTable::domestic(),
            foreign: ColumnAliasTable::foreign(),
            market: ColumnAliasTable::market(),
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            domestic: WeightTable::domestic(),
            foreign: WeightTable::reduced(),
            market: WeightTable::reduced(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            domestic_strategy: StrategyKind::Weighted,
            total_cap: None,
            match_mode: MatchMode::Substring,
            top_n: 5,
            missing_limit: 5,
            min_score: 0.0,
            skills_academic: SkillsAcademicParams::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            columns: ColumnsConfig::default(),
            weights: WeightsConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DataConfig {
    pub fn path(&self, category: Category) -> Option<&PathBuf> {
        match category {
            Category::Domestic => self.domestic.as_ref(),
            Category::Foreign => self.foreign.as_ref(),
            Category::Market => self.market.as_ref(),
        }
    }

    pub fn set_path(&mut self, category: Category, path: PathBuf) {
        match category {
            Category::Domestic => self.domestic = Some(path),
            Category::Foreign => self.foreign = Some(path),
            Category::Market => self.market = Some(path),
        }
    }
}

impl ColumnsConfig {
    pub fn for_category(&self, category: Category) -> &ColumnAliasTable {
        match category {
            Category::Domestic => &self.domestic,
            Category::Foreign => &self.foreign,
            Category::Market => &self.market,
        }
    }
}

impl WeightsConfig {
    pub fn for_category(&self, category: Category) -> &WeightTable {
        match category {
            Category::Domestic => &self.domestic,
            Category::Foreign => &self.foreign,
            Category::Market => &self.market,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RecommenderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-recommender")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            self.weights.for_category(category).validate(category.as_str())?;
        }

        if self.scoring.top_n == 0 {
            return Err(RecommenderError::Configuration(
                "scoring.top_n must be at least 1".to_string(),
            ));
        }

        if self.scoring.total_cap.is_some_and(|cap| cap <= 0.0) {
            return Err(RecommenderError::Configuration(
                "scoring.total_cap must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
