//! Normalization of raw dataset rows into canonical job records

use crate::error::{RecommenderError, Result};
use crate::input::table::{RawRow, RawTable};
use crate::processing::columns::{CanonicalField, ColumnAliasTable, ResolvedColumns};
use crate::processing::record::{Category, JobRecord};
use crate::processing::skills::SkillExtractor;
use log::{debug, warn};
use std::sync::Arc;

/// Records produced from one table, with bookkeeping for degraded rows
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub records: Vec<JobRecord>,
    pub degraded_rows: usize,
    pub missing_fields: Vec<CanonicalField>,
}

pub struct RecordNormalizer {
    category: Category,
    aliases: ColumnAliasTable,
    extractor: SkillExtractor,
}

impl RecordNormalizer {
    pub fn new(category: Category, aliases: ColumnAliasTable) -> Self {
        Self {
            category,
            aliases,
            extractor: SkillExtractor::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Normalize a single row, resolving its columns first
    pub fn normalize(&self, row: &Arc<RawRow>) -> JobRecord {
        let columns = row.columns().iter().cloned().collect();
        let resolved = ResolvedColumns::resolve(&self.aliases, &columns);
        self.normalize_with(row, &resolved)
    }

    /// Normalize a row against already resolved columns. Never fails: a bad
    /// row degrades to a record with every canonical field unknown.
    pub fn normalize_with(&self, row: &Arc<RawRow>, resolved: &ResolvedColumns) -> JobRecord {
        match self.try_normalize(row, resolved) {
            Ok(record) => record,
            Err(e) => {
                warn!("Degrading {} row {}: {}", self.category, row.index(), e);
                JobRecord::unknown(self.category, row)
            }
        }
    }

    fn try_normalize(&self, row: &Arc<RawRow>, resolved: &ResolvedColumns) -> Result<JobRecord> {
        if row.extra_cells() > 0 {
            return Err(RecommenderError::MalformedRow {
                row: row.index(),
                reason: format!("{} cells beyond the header width", row.extra_cells()),
            });
        }

        let text = |field| row.text(resolved.get(field)).map(|value| value.to_string());

        let salary = match row.number(resolved.get(CanonicalField::Salary)) {
            Ok(salary) => salary,
            Err(e) if e.is_recoverable() => {
                debug!("{} row {}: {}", self.category, row.index(), e);
                None
            }
            Err(e) => return Err(e),
        };

        let skills = self.extractor.extract(
            row.text(resolved.get(CanonicalField::Skills)),
            self.aliases.skill_mode,
        );

        let mut record = JobRecord::new(self.category).with_raw(row).with_skills(skills);
        record.role = text(CanonicalField::Role);
        record.company = text(CanonicalField::Company);
        record.location = text(CanonicalField::Location);
        record.degree_requirement = text(CanonicalField::DegreeRequirement);
        record.salary = salary;

        Ok(record)
    }

    /// Normalize every row of a table, resolving columns once
    pub fn normalize_table(&self, table: &RawTable) -> NormalizedBatch {
        let resolved = ResolvedColumns::resolve(&self.aliases, &table.column_set());
        let missing_fields = resolved.missing();

        for field in &missing_fields {
            let missing = RecommenderError::MissingColumn {
                field: field.to_string(),
                category: self.category.to_string(),
            };
            warn!("{} ({}); dependent factors are skipped", missing, table.source());
        }

        let mut degraded_rows = 0;
        let records = table
            .rows()
            .iter()
            .map(|row| match self.try_normalize(row, &resolved) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Degrading {} row {}: {}", self.category, row.index(), e);
                    degraded_rows += 1;
                    JobRecord::unknown(self.category, row)
                }
            })
            .collect();

        NormalizedBatch {
            records,
            degraded_rows,
            missing_fields,
        }
    }
}

/// Normalize one row with the given category and alias table
pub fn normalize(row: &Arc<RawRow>, category: Category, aliases: &ColumnAliasTable) -> JobRecord {
    RecordNormalizer::new(category, aliases.clone()).normalize(row)
}
