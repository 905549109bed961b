//! Skill extraction and skill matching helpers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An insertion-ordered, deduplicated set of lowercase skill tokens.
///
/// Equality ignores order. Order is kept so that explanations can list job
/// skills the way the source listed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    tokens: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token after trimming and lowercasing; empty and duplicate tokens are ignored
    pub fn insert(&mut self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() || self.tokens.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl PartialEq for SkillSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for SkillSet {}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for token in iter {
            set.insert(token.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.tokens
    }
}

/// How a source's skill field is tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMode {
    /// Delimiter-separated list such as "Python, SQL"
    #[default]
    Delimited,
    /// Prose such as a job description
    FreeText,
}

pub struct SkillExtractor {
    delimiter: char,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillExtractor {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn extract(&self, text: Option<&str>, mode: SkillMode) -> SkillSet {
        match mode {
            SkillMode::Delimited => self.extract_delimited(text),
            SkillMode::FreeText => self.extract_free_text(text),
        }
    }

    /// Split on the delimiter, trim, lowercase and deduplicate
    pub fn extract_delimited(&self, text: Option<&str>) -> SkillSet {
        match text {
            Some(text) => text.split(self.delimiter).collect(),
            None => SkillSet::new(),
        }
    }

    /// Maximal runs of alphabetic characters, lowercased and deduplicated
    pub fn extract_free_text(&self, text: Option<&str>) -> SkillSet {
        match text {
            Some(text) => text.split(|c: char| !c.is_alphabetic()).collect(),
            None => SkillSet::new(),
        }
    }
}

/// Extract a comma-delimited skill list
pub fn extract(text: Option<&str>) -> SkillSet {
    SkillExtractor::new().extract_delimited(text)
}

/// How a student skill is compared against a job skill token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The student skill equals or is contained in the job token ("sql" matches "mysql")
    #[default]
    Substring,
    /// Exact token membership
    Exact,
}

impl MatchMode {
    pub fn matches(&self, student_skill: &str, job_token: &str) -> bool {
        match self {
            MatchMode::Substring => job_token.contains(student_skill),
            MatchMode::Exact => job_token == student_skill,
        }
    }

    pub fn matches_any(&self, student_skill: &str, job_skills: &SkillSet) -> bool {
        job_skills.iter().any(|token| self.matches(student_skill, token))
    }
}

/// Student skills matched by at least one job skill token
pub fn matched_skills(student: &SkillSet, job: &SkillSet, mode: MatchMode) -> BTreeSet<String> {
    student
        .iter()
        .filter(|skill| mode.matches_any(skill, job))
        .map(|skill| skill.to_string())
        .collect()
}

/// `|student ∩ job|` under the given match mode
pub fn overlap_count(student: &SkillSet, job: &SkillSet, mode: MatchMode) -> usize {
    student.iter().filter(|skill| mode.matches_any(skill, job)).count()
}

/// Case-insensitive containment of a non-empty needle in a present haystack
pub fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    let needle = needle.trim();
    match haystack {
        Some(haystack) if !needle.is_empty() => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}
