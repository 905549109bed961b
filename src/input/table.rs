//! In-memory tables of raw dataset rows
//!
//! Headers are normalized once when a table is built (lowercase, whitespace
//! runs collapsed to `_`, parentheses stripped) so that column resolution can
//! compare names exactly. Cells stay as text; typed access goes through the
//! safe-get accessors on [`RawRow`], which turn absent columns, missing cells
//! and null markers into `None` instead of failing.

use crate::error::{RecommenderError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Cell values treated as null, compared case-insensitively
const NULL_MARKERS: &[&str] = &["", "na", "n/a", "#n/a", "nan", "-nan", "null", "none"];

/// Normalize a raw header to its canonical column name
pub fn normalize_header(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();

    WHITESPACE
        .replace_all(stripped.trim(), "_")
        .to_lowercase()
}

fn is_null(value: &str) -> bool {
    let value = value.trim();
    NULL_MARKERS.iter().any(|marker| value.eq_ignore_ascii_case(marker))
}

/// One source row, sharing its table's header list
#[derive(Debug, Clone)]
pub struct RawRow {
    headers: Arc<[String]>,
    values: Vec<String>,
    index: usize,
}

impl RawRow {
    pub fn new(headers: Arc<[String]>, values: Vec<String>, index: usize) -> Self {
        Self { headers, values, index }
    }

    /// Zero-based position of the row among the source's data lines
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    /// Non-empty cells beyond the header width; a trailing delimiter adds none
    pub fn extra_cells(&self) -> usize {
        self.values
            .iter()
            .skip(self.headers.len())
            .filter(|v| !v.trim().is_empty())
            .count()
    }

    /// Raw cell text for a column, `None` when the column or cell does not exist
    pub fn get(&self, column: &str) -> Option<&str> {
        let position = self.headers.iter().position(|h| h == column)?;
        self.values.get(position).map(|v| v.trim())
    }

    /// Text value with null markers mapped to `None`
    pub fn text(&self, column: Option<&str>) -> Option<&str> {
        let value = self.get(column?)?;
        if is_null(value) {
            None
        } else {
            Some(value)
        }
    }

    pub fn text_or_default(&self, column: Option<&str>) -> &str {
        self.text(column).unwrap_or("")
    }

    /// Numeric value; a present but unparseable cell is a `MalformedValue`
    pub fn number(&self, column: Option<&str>) -> Result<Option<f64>> {
        let Some(column) = column else {
            return Ok(None);
        };
        let Some(value) = self.text(Some(column)) else {
            return Ok(None);
        };

        let cleaned: String = value
            .trim_start_matches(['$', '₹', '€', '£'])
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        match cleaned.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(RecommenderError::MalformedValue {
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Numeric value with every failure mapped to the `0.0` "unknown" sentinel
    pub fn number_or_default(&self, column: Option<&str>) -> f64 {
        self.number(column).ok().flatten().unwrap_or(0.0)
    }

    /// Whether a binary indicator cell reads as "present"
    pub fn is_truthy(&self, column: &str) -> bool {
        match self.text(Some(column)) {
            Some(value) => match value.parse::<f64>() {
                Ok(number) => number == 1.0,
                Err(_) => matches!(value.to_lowercase().as_str(), "true" | "yes" | "y"),
            },
            None => false,
        }
    }
}

/// A loaded dataset table
#[derive(Debug, Clone)]
pub struct RawTable {
    source: String,
    headers: Arc<[String]>,
    rows: Vec<Arc<RawRow>>,
}

impl RawTable {
    /// Build a table from raw headers and cell rows, normalizing the headers
    pub fn new(source: impl Into<String>, raw_headers: &[String], rows: Vec<Vec<String>>) -> Self {
        Self::with_indexed_rows(source, raw_headers, rows.into_iter().enumerate().collect())
    }

    /// Build a table whose rows keep their position in the source, so rows
    /// skipped while reading leave gaps instead of shifting later indices
    pub fn with_indexed_rows(
        source: impl Into<String>,
        raw_headers: &[String],
        rows: Vec<(usize, Vec<String>)>,
    ) -> Self {
        let headers: Arc<[String]> = raw_headers
            .iter()
            .map(|h| normalize_header(h))
            .collect::<Vec<_>>()
            .into();

        let rows = rows
            .into_iter()
            .map(|(index, values)| Arc::new(RawRow::new(Arc::clone(&headers), values, index)))
            .collect();

        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_set(&self) -> HashSet<String> {
        self.headers.iter().cloned().collect()
    }

    pub fn rows(&self) -> &[Arc<RawRow>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_table() -> RawTable {
        RawTable::new(
            "sample.csv",
            &strings(&["Job Title", "Salary (LPA)", "python", "Rating"]),
            vec![
                strings(&["Data Analyst", "6.5", "1", "3.8"]),
                strings(&["ML Engineer", "n/a", "0"]),
                strings(&["Intern", "4,50,000", "true", "NaN"]),
            ],
        )
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("  Job  Title "), "job_title");
        assert_eq!(normalize_header("Avg Salary(K)"), "avg_salaryk");
        assert_eq!(normalize_header("Salary (LPA)"), "salary_lpa");
        assert_eq!(normalize_header("\u{feff}Company"), "company");
    }

    #[test]
    fn test_safe_get_text() {
        let table = sample_table();
        let row = &table.rows()[0];

        assert_eq!(row.text(Some("job_title")), Some("Data Analyst"));
        assert_eq!(row.text(Some("missing")), None);
        assert_eq!(row.text(None), None);
        assert_eq!(row.text_or_default(None), "");

        // Short row: the rating cell does not exist
        assert_eq!(table.rows()[1].text(Some("rating")), None);
        assert_eq!(table.rows()[2].text(Some("rating")), None);
    }

    #[test]
    fn test_safe_get_number() {
        let table = sample_table();

        assert_eq!(table.rows()[0].number(Some("salary_lpa")).unwrap(), Some(6.5));
        assert_eq!(table.rows()[1].number(Some("salary_lpa")).unwrap(), None);
        assert_eq!(table.rows()[2].number(Some("salary_lpa")).unwrap(), Some(450000.0));

        let malformed = table.rows()[0].number(Some("job_title"));
        assert!(matches!(malformed, Err(RecommenderError::MalformedValue { .. })));
        assert_eq!(table.rows()[0].number_or_default(Some("job_title")), 0.0);
        assert_eq!(table.rows()[0].number_or_default(None), 0.0);
    }

    #[test]
    fn test_truthy_indicator_cells() {
        let table = sample_table();

        assert!(table.rows()[0].is_truthy("python"));
        assert!(!table.rows()[1].is_truthy("python"));
        assert!(table.rows()[2].is_truthy("python"));
        assert!(!table.rows()[0].is_truthy("rating"));
    }

    #[test]
    fn test_extra_cells() {
        let table = RawTable::new("wide.csv", &strings(&["a"]), vec![strings(&["1", "2", "3"])]);
        assert_eq!(table.rows()[0].extra_cells(), 2);
        assert_eq!(table.rows()[0].index(), 0);
    }
}
