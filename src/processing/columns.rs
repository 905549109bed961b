//! Column resolution against per-category alias tables

use crate::processing::record::Category;
use crate::processing::skills::SkillMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Field of the canonical job schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Role,
    Company,
    Skills,
    Location,
    Salary,
    DegreeRequirement,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Role,
        CanonicalField::Company,
        CanonicalField::Skills,
        CanonicalField::Location,
        CanonicalField::Salary,
        CanonicalField::DegreeRequirement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Role => "role",
            CanonicalField::Company => "company",
            CanonicalField::Skills => "skills",
            CanonicalField::Location => "location",
            CanonicalField::Salary => "salary",
            CanonicalField::DegreeRequirement => "degree_requirement",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First alias present in `columns`, in declared alias order.
///
/// Names are compared exactly; headers must already be normalized.
pub fn resolve(columns: &HashSet<String>, aliases: &[String]) -> Option<String> {
    aliases.iter().find(|alias| columns.contains(*alias)).cloned()
}

/// Candidate column names per canonical field for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAliasTable {
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub company: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub salary: Vec<String>,
    #[serde(default)]
    pub degree_requirement: Vec<String>,
    #[serde(default)]
    pub skill_mode: SkillMode,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl ColumnAliasTable {
    pub fn domestic() -> Self {
        Self {
            role: aliases(&["role", "job_role", "job_title", "title"]),
            company: aliases(&["company"]),
            skills: aliases(&["skills", "primary_skills"]),
            location: aliases(&["city", "location"]),
            salary: aliases(&["salary_lpa", "salary"]),
            degree_requirement: aliases(&["degree", "degree_requirement", "qualification"]),
            skill_mode: SkillMode::Delimited,
        }
    }

    pub fn foreign() -> Self {
        Self {
            role: aliases(&["job_title", "role", "title", "position"]),
            company: aliases(&["company_name", "company"]),
            skills: aliases(&["job_description", "description"]),
            location: aliases(&["location", "job_location"]),
            salary: aliases(&["salary_estimated", "salary", "avgsalaryk", "avg_salaryk"]),
            degree_requirement: aliases(&["degree", "education"]),
            skill_mode: SkillMode::FreeText,
        }
    }

    pub fn market() -> Self {
        Self {
            role: aliases(&["job_title", "role", "title"]),
            company: aliases(&["company", "company_name"]),
            skills: aliases(&["skills", "key_skills", "skills_required"]),
            location: aliases(&["location", "city"]),
            salary: aliases(&["monthly_salary", "salary"]),
            degree_requirement: aliases(&["degree", "education"]),
            skill_mode: SkillMode::Delimited,
        }
    }

    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Domestic => Self::domestic(),
            Category::Foreign => Self::foreign(),
            Category::Market => Self::market(),
        }
    }

    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::Role => &self.role,
            CanonicalField::Company => &self.company,
            CanonicalField::Skills => &self.skills,
            CanonicalField::Location => &self.location,
            CanonicalField::Salary => &self.salary,
            CanonicalField::DegreeRequirement => &self.degree_requirement,
        }
    }
}

/// Outcome of resolving every canonical field against one table's columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedColumns {
    columns: Vec<(CanonicalField, Option<String>)>,
}

impl ResolvedColumns {
    pub fn resolve(table: &ColumnAliasTable, columns: &HashSet<String>) -> Self {
        Self {
            columns: CanonicalField::ALL
                .iter()
                .map(|field| (*field, resolve(columns, table.aliases(*field))))
                .collect(),
        }
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, column)| column.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, Option<&str>)> {
        self.columns.iter().map(|(field, column)| (*field, column.as_deref()))
    }

    pub fn missing(&self) -> Vec<CanonicalField> {
        self.iter()
            .filter(|(_, column)| column.is_none())
            .map(|(field, _)| field)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolve_uses_alias_order() {
        let found = resolve(
            &columns(&["job_title", "company"]),
            &aliases(&["role", "job_title", "title"]),
        );
        assert_eq!(found.as_deref(), Some("job_title"));

        let found = resolve(&columns(&["title", "role"]), &aliases(&["role", "title"]));
        assert_eq!(found.as_deref(), Some("role"));
    }

    #[test]
    fn test_resolve_absent() {
        assert_eq!(resolve(&columns(&["company"]), &aliases(&["salary", "pay"])), None);
        assert_eq!(resolve(&columns(&["company"]), &[]), None);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(resolve(&columns(&["Job_Title"]), &aliases(&["job_title"])), None);
    }

    #[test]
    fn test_resolved_columns_report_missing_fields() {
        let resolved = ResolvedColumns::resolve(
            &ColumnAliasTable::market(),
            &columns(&["job_title", "monthly_salary"]),
        );

        assert_eq!(resolved.get(CanonicalField::Role), Some("job_title"));
        assert_eq!(resolved.get(CanonicalField::Salary), Some("monthly_salary"));
        assert_eq!(
            resolved.missing(),
            vec![
                CanonicalField::Company,
                CanonicalField::Skills,
                CanonicalField::Location,
                CanonicalField::DegreeRequirement,
            ]
        );
    }

    #[test]
    fn test_alias_tables_are_category_specific() {
        assert_eq!(ColumnAliasTable::for_category(Category::Foreign).skill_mode, SkillMode::FreeText);
        assert_ne!(ColumnAliasTable::domestic().role, ColumnAliasTable::foreign().role);
    }
}
