//! Student profiles and normalized job records

use crate::input::table::RawRow;
use crate::processing::skills::{SkillExtractor, SkillSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};

/// Dataset class a job record was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Domestic,
    Foreign,
    Market,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Domestic, Category::Foreign, Category::Market];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Domestic => "domestic",
            Category::Foreign => "foreign",
            Category::Market => "market",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "domestic" | "indian" => Some(Category::Domestic),
            "foreign" => Some(Category::Foreign),
            "market" => Some(Category::Market),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub degree: String,
    pub cgpa_or_marks: f64,
    pub preferred_location: String,
    pub preferred_role: String,
    pub skills: SkillSet,
    pub expected_salary: f64,
}

impl StudentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_degree(mut self, degree: impl Into<String>) -> Self {
        self.degree = degree.into();
        self
    }

    pub fn with_cgpa(mut self, cgpa: f64) -> Self {
        self.cgpa_or_marks = cgpa;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.preferred_location = location.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.preferred_role = role.into();
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    /// Parse a comma separated skill list as typed by a student
    pub fn with_skills_text(mut self, skills: &str) -> Self {
        self.skills = SkillExtractor::new().extract_delimited(Some(skills));
        self
    }

    pub fn with_expected_salary(mut self, salary: f64) -> Self {
        self.expected_salary = salary;
        self
    }

    /// Fields the presentation layer should ask for before recommending
    pub fn missing_inputs(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.skills.is_empty() {
            missing.push("skills");
        }
        if self.preferred_role.trim().is_empty() {
            missing.push("preferred role");
        }
        missing
    }
}

/// One listing in the canonical schema.
///
/// The raw back-reference is weak: the owning dataset keeps the source rows
/// alive, a record only reads extra columns while that dataset exists.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub category: Category,
    pub role: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub degree_requirement: Option<String>,
    pub skills: SkillSet,
    #[serde(skip)]
    raw: Weak<RawRow>,
}

impl JobRecord {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            role: None,
            company: None,
            location: None,
            salary: None,
            degree_requirement: None,
            skills: SkillSet::new(),
            raw: Weak::new(),
        }
    }

    /// Record with every canonical field unknown, still pointing at its row
    pub fn unknown(category: Category, raw: &Arc<RawRow>) -> Self {
        Self::new(category).with_raw(raw)
    }

    pub fn with_raw(mut self, raw: &Arc<RawRow>) -> Self {
        self.raw = Arc::downgrade(raw);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_degree_requirement(mut self, degree: impl Into<String>) -> Self {
        self.degree_requirement = Some(degree.into());
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    /// Source row, if the dataset that owns it is still alive
    pub fn raw(&self) -> Option<Arc<RawRow>> {
        self.raw.upgrade()
    }

    pub fn row_index(&self) -> Option<usize> {
        self.raw().map(|row| row.index())
    }

    /// Short label for listings: "role @ company"
    pub fn title(&self) -> String {
        let role = self.role.as_deref().unwrap_or("Unknown role");
        match &self.company {
            Some(company) => format!("{} @ {}", role, company),
            None => role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::table::RawTable;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::parse("Domestic"), Some(Category::Domestic));
        assert_eq!(Category::parse(" market "), Some(Category::Market));
        assert_eq!(Category::parse("remote"), None);
        assert_eq!(Category::Foreign.to_string(), "foreign");
    }

    #[test]
    fn test_student_skills_never_contain_empty_tokens() {
        let student = StudentProfile::new("Asha").with_skills_text("");
        assert!(student.skills.is_empty());

        let student = StudentProfile::new("Asha").with_skills_text("Python,, SQL ,");
        assert_eq!(student.skills.as_slice(), &["python", "sql"]);
    }

    #[test]
    fn test_missing_inputs() {
        let student = StudentProfile::new("").with_skills_text("rust");
        assert_eq!(student.missing_inputs(), vec!["name", "preferred role"]);
    }

    #[test]
    fn test_raw_reference_is_weak() {
        let table = RawTable::new("t.csv", &["python".to_string()], vec![vec!["1".to_string()]]);
        let record = JobRecord::unknown(Category::Foreign, &table.rows()[0]);

        assert_eq!(record.row_index(), Some(0));
        drop(table);
        assert!(record.raw().is_none());
    }

    #[test]
    fn test_title() {
        let job = JobRecord::new(Category::Domestic).with_role("Data Analyst").with_company("Acme");
        assert_eq!(job.title(), "Data Analyst @ Acme");
        assert_eq!(JobRecord::new(Category::Market).title(), "Unknown role");
    }
}
