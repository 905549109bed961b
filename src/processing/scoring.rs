//! Scoring strategies for student/job compatibility
//!
//! Every strategy produces a [`ScoreBreakdown`] so a ranked job can always
//! show which factors earned its points. Three strategies exist:
//!
//! - [`WeightedFactorStrategy`]: independent, additive factors whose maximum
//!   contribution comes from a [`WeightTable`]. The domestic table uses the
//!   full factor set; foreign and market tables use a reduced one
//!   (role, skill indicator columns, location).
//! - [`SkillsAcademicStrategy`]: skills and CGPA only.
//! - [`SkillCountStrategy`]: number of matched skills.

use crate::error::{RecommenderError, Result};
use crate::input::table::normalize_header;
use crate::processing::record::{JobRecord, StudentProfile};
use crate::processing::skills::{contains_ignore_case, overlap_count, MatchMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One independently scored dimension of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Degree,
    JobTitle,
    Skills,
    Location,
    Salary,
    SkillIndicator,
    Academic,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Degree => "degree",
            Factor::JobTitle => "job_title",
            Factor::Skills => "skills",
            Factor::Location => "location",
            Factor::Salary => "salary",
            Factor::SkillIndicator => "skill_indicator",
            Factor::Academic => "academic",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum points per factor for one category; absent factors are not scored.
///
/// `skill_indicator` is a bonus per matching indicator column, so it bounds a
/// single hit rather than the factor's total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_indicator: Option<f64>,
}

impl WeightTable {
    const FACTOR_ORDER: [Factor; 6] = [
        Factor::Degree,
        Factor::JobTitle,
        Factor::Skills,
        Factor::Location,
        Factor::Salary,
        Factor::SkillIndicator,
    ];

    /// Full factor set used for domestic listings
    pub fn domestic() -> Self {
        Self {
            degree: Some(20.0),
            job_title: Some(20.0),
            skills: Some(40.0),
            location: Some(10.0),
            salary: Some(10.0),
            skill_indicator: None,
        }
    }

    /// Reduced factor set used for foreign listings and market surveys
    pub fn reduced() -> Self {
        Self {
            job_title: Some(30.0),
            skill_indicator: Some(10.0),
            location: Some(20.0),
            ..Self::default()
        }
    }

    pub fn get(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Degree => self.degree,
            Factor::JobTitle => self.job_title,
            Factor::Skills => self.skills,
            Factor::Location => self.location,
            Factor::Salary => self.salary,
            Factor::SkillIndicator => self.skill_indicator,
            Factor::Academic => None,
        }
    }

    /// Configured factors with their weights, in scoring order
    pub fn factors(&self) -> Vec<(Factor, f64)> {
        Self::FACTOR_ORDER
            .iter()
            .filter_map(|factor| self.get(*factor).map(|weight| (*factor, weight)))
            .collect()
    }

    pub fn bounded_total(&self) -> f64 {
        self.factors().iter().map(|(_, weight)| weight).sum()
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if let Some((factor, weight)) = self.factors().into_iter().find(|(_, w)| *w < 0.0 || !w.is_finite()) {
            return Err(RecommenderError::Configuration(format!(
                "{} weight for '{}' must be a non-negative number, got {}",
                name, factor, weight
            )));
        }

        let total = self.bounded_total();
        if total > 100.0 {
            return Err(RecommenderError::Configuration(format!(
                "{} weights sum to {}, which exceeds 100",
                name, total
            )));
        }
        Ok(())
    }
}

/// Whether a score is clamped to a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScoreCap {
    #[default]
    Uncapped,
    Total(f64),
}

impl ScoreCap {
    pub fn apply(&self, score: f64) -> f64 {
        match self {
            ScoreCap::Uncapped => score,
            ScoreCap::Total(ceiling) => score.min(*ceiling),
        }
    }
}

impl From<Option<f64>> for ScoreCap {
    fn from(cap: Option<f64>) -> Self {
        cap.map(ScoreCap::Total).unwrap_or(ScoreCap::Uncapped)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
    pub total: f64,
}

impl ScoreBreakdown {
    fn from_factors(factors: Vec<FactorScore>, cap: ScoreCap) -> Self {
        let total = cap.apply(factors.iter().map(|f| f.points).sum());
        Self { factors, total }
    }

    pub fn points(&self, factor: Factor) -> Option<f64> {
        self.factors.iter().find(|f| f.factor == factor).map(|f| f.points)
    }
}

pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn breakdown(&self, student: &StudentProfile, job: &JobRecord) -> ScoreBreakdown;

    fn score(&self, student: &StudentProfile, job: &JobRecord) -> f64 {
        self.breakdown(student, job).total
    }
}

/// Selectable scoring strategy for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Weighted,
    SkillsAcademic,
    SkillCount,
}

impl StrategyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "weighted" => Some(StrategyKind::Weighted),
            "skills_academic" | "academic" => Some(StrategyKind::SkillsAcademic),
            "skill_count" | "count" => Some(StrategyKind::SkillCount),
            _ => None,
        }
    }
}

/// Ratio of student skills found in the job, 0 when the student lists none
pub fn skill_overlap_ratio(student: &StudentProfile, job: &JobRecord, mode: MatchMode) -> f64 {
    if student.skills.is_empty() {
        return 0.0;
    }
    overlap_count(&student.skills, &job.skills, mode) as f64 / student.skills.len() as f64
}

/// Truthy indicator columns whose name contains a student skill.
///
/// A skill counts once per matching column, so "java" hits both `java` and
/// `javascript` columns. Skills are compared in header form, so "power bi"
/// matches a `power_bi` column.
pub fn indicator_hits(student: &StudentProfile, job: &JobRecord) -> usize {
    let Some(row) = job.raw() else {
        return 0;
    };

    student
        .skills
        .iter()
        .map(normalize_header)
        .filter(|skill| !skill.is_empty())
        .map(|skill| {
            row.columns()
                .iter()
                .filter(|column| column.contains(skill.as_str()) && row.is_truthy(column))
                .count()
        })
        .sum()
}

pub struct WeightedFactorStrategy {
    name: String,
    weights: WeightTable,
    cap: ScoreCap,
    skill_match: MatchMode,
}

impl WeightedFactorStrategy {
    pub fn new(name: impl Into<String>, weights: WeightTable) -> Self {
        Self {
            name: name.into(),
            weights,
            cap: ScoreCap::Uncapped,
            skill_match: MatchMode::Exact,
        }
    }

    pub fn with_cap(mut self, cap: ScoreCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_skill_match(mut self, mode: MatchMode) -> Self {
        self.skill_match = mode;
        self
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    fn factor_points(&self, factor: Factor, weight: f64, student: &StudentProfile, job: &JobRecord) -> f64 {
        let hit = |matched: bool| if matched { weight } else { 0.0 };

        match factor {
            Factor::Degree => hit(contains_ignore_case(job.degree_requirement.as_deref(), &student.degree)),
            Factor::JobTitle => hit(contains_ignore_case(job.role.as_deref(), &student.preferred_role)),
            Factor::Skills => skill_overlap_ratio(student, job, self.skill_match) * weight,
            Factor::Location => hit(contains_ignore_case(job.location.as_deref(), &student.preferred_location)),
            // Unknown salary compares as 0, so an expected salary of 0 always passes
            Factor::Salary => hit(student.expected_salary <= job.salary.unwrap_or(0.0)),
            Factor::SkillIndicator => indicator_hits(student, job) as f64 * weight,
            Factor::Academic => 0.0,
        }
    }
}

impl ScoringStrategy for WeightedFactorStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn breakdown(&self, student: &StudentProfile, job: &JobRecord) -> ScoreBreakdown {
        let factors = self
            .weights
            .factors()
            .into_iter()
            .map(|(factor, weight)| FactorScore {
                factor,
                points: self.factor_points(factor, weight, student, job),
            })
            .collect();

        ScoreBreakdown::from_factors(factors, self.cap)
    }
}

/// Coefficients of the skills + CGPA formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsAcademicParams {
    pub skill_weight: f64,
    pub academic_weight: f64,
    pub points_per_skill: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_cap: Option<f64>,
}

impl Default for SkillsAcademicParams {
    fn default() -> Self {
        Self {
            skill_weight: 0.4,
            academic_weight: 0.2,
            points_per_skill: 15.0,
            skill_cap: Some(100.0),
        }
    }
}

/// Step function of CGPA on a 10 point scale
pub fn academic_score(cgpa: f64) -> f64 {
    if cgpa >= 8.0 {
        100.0
    } else if cgpa >= 7.0 {
        80.0
    } else {
        60.0
    }
}

/// `skill_weight * min(matched * points_per_skill, cap) + academic_weight * academic_score`.
/// Location, salary and degree are ignored.
pub struct SkillsAcademicStrategy {
    params: SkillsAcademicParams,
    mode: MatchMode,
}

impl SkillsAcademicStrategy {
    pub fn new(params: SkillsAcademicParams, mode: MatchMode) -> Self {
        Self { params, mode }
    }
}

impl Default for SkillsAcademicStrategy {
    fn default() -> Self {
        Self::new(SkillsAcademicParams::default(), MatchMode::Substring)
    }
}

impl ScoringStrategy for SkillsAcademicStrategy {
    fn name(&self) -> &str {
        "skills_academic"
    }

    fn breakdown(&self, student: &StudentProfile, job: &JobRecord) -> ScoreBreakdown {
        let matched = overlap_count(&student.skills, &job.skills, self.mode) as f64;
        let skill_score = ScoreCap::from(self.params.skill_cap).apply(matched * self.params.points_per_skill);

        let factors = vec![
            FactorScore {
                factor: Factor::Skills,
                points: self.params.skill_weight * skill_score,
            },
            FactorScore {
                factor: Factor::Academic,
                points: self.params.academic_weight * academic_score(student.cgpa_or_marks),
            },
        ];

        ScoreBreakdown::from_factors(factors, ScoreCap::Uncapped)
    }
}

/// Number of student skills contained in the job's skills
pub struct SkillCountStrategy {
    mode: MatchMode,
}

impl SkillCountStrategy {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }
}

impl ScoringStrategy for SkillCountStrategy {
    fn name(&self) -> &str {
        "skill_count"
    }

    fn breakdown(&self, student: &StudentProfile, job: &JobRecord) -> ScoreBreakdown {
        let factors = vec![FactorScore {
            factor: Factor::Skills,
            points: overlap_count(&student.skills, &job.skills, self.mode) as f64,
        }];
        ScoreBreakdown::from_factors(factors, ScoreCap::Uncapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::table::RawTable;
    use crate::processing::record::Category;
    use crate::processing::skills::extract;

    fn domestic_student() -> StudentProfile {
        StudentProfile::new("Asha")
            .with_skills_text("python, sql")
            .with_degree("B.Tech")
            .with_location("Mumbai")
            .with_expected_salary(5.0)
    }

    fn domestic_job() -> JobRecord {
        JobRecord::new(Category::Domestic)
            .with_skills(extract(Some("python, sql, java")))
            .with_degree_requirement("B.Tech Required")
            .with_role("Data Analyst")
            .with_location("Mumbai, India")
            .with_salary(6.0)
    }

    #[test]
    fn test_domestic_weighted_score() {
        let strategy = WeightedFactorStrategy::new("domestic", WeightTable::domestic());
        let breakdown = strategy.breakdown(&domestic_student(), &domestic_job());

        assert_eq!(breakdown.total, 80.0);
        assert_eq!(breakdown.points(Factor::Degree), Some(20.0));
        assert_eq!(breakdown.points(Factor::Skills), Some(40.0));
        assert_eq!(breakdown.points(Factor::Location), Some(10.0));
        assert_eq!(breakdown.points(Factor::Salary), Some(10.0));
        assert_eq!(breakdown.points(Factor::JobTitle), Some(0.0));
        assert_eq!(breakdown.points(Factor::SkillIndicator), None);
    }

    #[test]
    fn test_factors_trigger_independently() {
        let strategy = WeightedFactorStrategy::new("domestic", WeightTable::domestic());
        let student = domestic_student().with_role("analyst").with_skills_text("python, go");

        let breakdown = strategy.breakdown(&student, &domestic_job());

        assert_eq!(breakdown.points(Factor::JobTitle), Some(20.0));
        assert_eq!(breakdown.points(Factor::Skills), Some(20.0));
        assert_eq!(breakdown.total, 80.0);
    }

    #[test]
    fn test_no_student_skills_contributes_zero() {
        let strategy = WeightedFactorStrategy::new("domestic", WeightTable::domestic());
        let student = domestic_student().with_skills_text("");

        let breakdown = strategy.breakdown(&student, &domestic_job());
        assert_eq!(breakdown.points(Factor::Skills), Some(0.0));
    }

    #[test]
    fn test_unknown_salary_passes_only_zero_expectation() {
        let strategy = WeightedFactorStrategy::new("domestic", WeightTable::domestic());
        let mut job = domestic_job();
        job.salary = None;

        let breakdown = strategy.breakdown(&domestic_student(), &job);
        assert_eq!(breakdown.points(Factor::Salary), Some(0.0));

        let breakdown = strategy.breakdown(&domestic_student().with_expected_salary(0.0), &job);
        assert_eq!(breakdown.points(Factor::Salary), Some(10.0));
    }

    #[test]
    fn test_missing_job_fields_skip_factors() {
        let strategy = WeightedFactorStrategy::new("domestic", WeightTable::domestic());
        let job = JobRecord::new(Category::Domestic).with_salary(10.0);

        assert_eq!(strategy.score(&domestic_student(), &job), 10.0);
    }

    #[test]
    fn test_total_cap_is_explicit() {
        let weights = WeightTable {
            degree: Some(60.0),
            location: Some(60.0),
            ..WeightTable::default()
        };
        let uncapped = WeightedFactorStrategy::new("wide", weights.clone());
        let capped = WeightedFactorStrategy::new("wide", weights).with_cap(ScoreCap::Total(100.0));

        assert_eq!(uncapped.score(&domestic_student(), &domestic_job()), 120.0);
        assert_eq!(capped.score(&domestic_student(), &domestic_job()), 100.0);
    }

    #[test]
    fn test_indicator_columns_award_per_column() {
        let headers: Vec<String> = ["job_title", "python", "java", "javascript", "location"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let row: Vec<String> = ["Data Engineer", "1", "1", "1", "Austin, TX"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        let table = RawTable::new("foreign.csv", &headers, vec![row]);

        let job = JobRecord::new(Category::Foreign)
            .with_raw(&table.rows()[0])
            .with_role("Data Engineer")
            .with_location("Austin, TX");
        let student = StudentProfile::new("Ravi")
            .with_skills_text("java, python")
            .with_role("engineer")
            .with_location("austin");

        assert_eq!(indicator_hits(&student, &job), 3);

        let strategy = WeightedFactorStrategy::new("foreign", WeightTable::reduced());
        let breakdown = strategy.breakdown(&student, &job);
        assert_eq!(breakdown.points(Factor::SkillIndicator), Some(30.0));
        assert_eq!(breakdown.points(Factor::JobTitle), Some(30.0));
        assert_eq!(breakdown.points(Factor::Location), Some(20.0));
        assert_eq!(breakdown.total, 80.0);
    }

    #[test]
    fn test_multi_word_skills_match_indicator_columns() {
        let headers: Vec<String> = ["Job Title", "Power BI", "Machine Learning"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let row: Vec<String> = ["Analyst", "1", "1"].iter().map(|v| v.to_string()).collect();
        let table = RawTable::new("foreign.csv", &headers, vec![row]);

        let job = JobRecord::new(Category::Foreign).with_raw(&table.rows()[0]);
        let student = StudentProfile::new("Ravi").with_skills_text("Power BI, machine learning");

        assert_eq!(indicator_hits(&student, &job), 2);

        let strategy = WeightedFactorStrategy::new("foreign", WeightTable::reduced());
        assert_eq!(strategy.score(&student, &job), 20.0);
    }

    #[test]
    fn test_indicator_without_raw_row() {
        let student = StudentProfile::new("Ravi").with_skills_text("java");
        assert_eq!(indicator_hits(&student, &JobRecord::new(Category::Foreign)), 0);
    }

    #[test]
    fn test_skills_academic_strategy() {
        let student = StudentProfile::new("Meera")
            .with_cgpa(8.5)
            .with_skills_text("python, sql, excel");
        let job = JobRecord::new(Category::Domestic).with_skills(extract(Some("python, mysql, excel, tableau")));

        let score = SkillsAcademicStrategy::default().score(&student, &job);
        assert!((score - 38.0).abs() < 1e-9);
    }

    #[test]
    fn test_skills_academic_caps_skill_score_only() {
        let skills: Vec<String> = (0..10).map(|i| format!("skill{}", i)).collect();
        let text = skills.join(", ");
        let student = StudentProfile::new("Kiran").with_cgpa(6.0).with_skills_text(&text);
        let job = JobRecord::new(Category::Domestic).with_skills(extract(Some(&text)));

        let breakdown = SkillsAcademicStrategy::default().breakdown(&student, &job);
        assert!((breakdown.points(Factor::Skills).unwrap() - 40.0).abs() < 1e-9);
        assert!((breakdown.points(Factor::Academic).unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_academic_steps() {
        assert_eq!(academic_score(8.0), 100.0);
        assert_eq!(academic_score(7.9), 80.0);
        assert_eq!(academic_score(7.0), 80.0);
        assert_eq!(academic_score(6.99), 60.0);
    }

    #[test]
    fn test_skill_count_strategy() {
        let student = StudentProfile::new("Dev").with_skills_text("sql, python, rust");
        let job = JobRecord::new(Category::Market).with_skills(extract(Some("MySQL, Python")));

        assert_eq!(SkillCountStrategy::new(MatchMode::Substring).score(&student, &job), 2.0);
        assert_eq!(SkillCountStrategy::new(MatchMode::Exact).score(&student, &job), 1.0);
    }

    #[test]
    fn test_weight_validation() {
        assert!(WeightTable::domestic().validate("domestic").is_ok());
        assert!(WeightTable::reduced().validate("foreign").is_ok());

        let heavy = WeightTable {
            skills: Some(90.0),
            degree: Some(20.0),
            ..WeightTable::default()
        };
        assert!(heavy.validate("domestic").is_err());

        let negative = WeightTable {
            skills: Some(-1.0),
            ..WeightTable::default()
        };
        assert!(negative.validate("domestic").is_err());
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!(StrategyKind::parse("skills-academic"), Some(StrategyKind::SkillsAcademic));
        assert_eq!(StrategyKind::parse("Weighted"), Some(StrategyKind::Weighted));
        assert_eq!(StrategyKind::parse("learned"), None);
    }
}
