//! Normalized datasets shared across recommendation requests

use crate::config::{ColumnsConfig, DataConfig};
use crate::error::{RecommenderError, Result};
use crate::input::manager::DatasetManager;
use crate::input::table::RawTable;
use crate::processing::columns::{CanonicalField, ColumnAliasTable};
use crate::processing::normalizer::RecordNormalizer;
use crate::processing::record::{Category, JobRecord};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Records of one category, together with the table that owns their rows
#[derive(Debug, Clone)]
pub struct Dataset {
    category: Category,
    source: String,
    table: Option<Arc<RawTable>>,
    records: Vec<JobRecord>,
    degraded_rows: usize,
    missing_fields: Vec<CanonicalField>,
}

impl Dataset {
    pub fn from_table(category: Category, table: Arc<RawTable>, aliases: &ColumnAliasTable) -> Self {
        let batch = RecordNormalizer::new(category, aliases.clone()).normalize_table(&table);

        info!(
            "Normalized {} {} records from {} ({} degraded)",
            batch.records.len(),
            category,
            table.source(),
            batch.degraded_rows
        );

        Self {
            category,
            source: table.source().to_string(),
            table: Some(table),
            records: batch.records,
            degraded_rows: batch.degraded_rows,
            missing_fields: batch.missing_fields,
        }
    }

    /// Dataset built directly from records, with no backing table
    pub fn from_records(category: Category, records: Vec<JobRecord>) -> Self {
        Self {
            category,
            source: "in-memory".to_string(),
            table: None,
            records,
            degraded_rows: 0,
            missing_fields: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn table(&self) -> Option<&RawTable> {
        self.table.as_deref()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn degraded_rows(&self) -> usize {
        self.degraded_rows
    }

    pub fn missing_fields(&self) -> &[CanonicalField] {
        &self.missing_fields
    }
}

/// At most one dataset per category
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    sets: BTreeMap<Category, Dataset>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: Dataset) -> Self {
        self.insert(dataset);
        self
    }

    pub fn insert(&mut self, dataset: Dataset) {
        self.sets.insert(dataset.category(), dataset);
    }

    pub fn get(&self, category: Category) -> Option<&Dataset> {
        self.sets.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.sets.values().map(|d| d.records().len()).sum()
    }

    /// Load and normalize every configured source.
    ///
    /// Unconfigured or unreadable sources are skipped with a warning; the load
    /// only fails when no source yields a single row.
    pub fn load(data: &DataConfig, columns: &ColumnsConfig, manager: &mut DatasetManager) -> Result<Self> {
        let mut datasets = Self::new();
        let mut sources = 0;

        for category in Category::ALL {
            let Some(path) = data.path(category) else {
                warn!("No {} dataset configured", category);
                continue;
            };
            sources += 1;

            match manager.load_table(path) {
                Ok(table) => {
                    datasets.insert(Dataset::from_table(category, table, columns.for_category(category)));
                }
                Err(e) => warn!("Could not load {} dataset from {}: {}", category, path.display(), e),
            }
        }

        if datasets.total_records() == 0 {
            return Err(RecommenderError::NoUsableRows { sources });
        }

        info!(
            "Loaded {} records across {} datasets",
            datasets.total_records(),
            datasets.len()
        );
        Ok(datasets)
    }
}

/// Load-once, read-many holder for datasets shared by concurrent requests
#[derive(Debug, Default)]
pub struct SharedDatasets {
    cell: OnceCell<Arc<Datasets>>,
}

impl SharedDatasets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the loaded datasets, running `load` only on first access.
    /// A failed load leaves the holder empty so a later call can retry.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<Datasets>>
    where
        F: FnOnce() -> Result<Datasets>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<Datasets>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn small_table() -> Arc<RawTable> {
        Arc::new(RawTable::new(
            "small.csv",
            &["role".to_string(), "city".to_string()],
            vec![
                vec!["Analyst".to_string(), "Pune".to_string()],
                vec!["Engineer".to_string(), "Delhi".to_string()],
            ],
        ))
    }

    #[test]
    fn test_dataset_from_table_keeps_rows_alive() {
        let dataset = Dataset::from_table(Category::Domestic, small_table(), &ColumnAliasTable::domestic());

        assert_eq!(dataset.records().len(), 2);
        assert_eq!(dataset.records()[1].location.as_deref(), Some("Delhi"));
        assert_eq!(dataset.records()[1].row_index(), Some(1));
        assert!(dataset.missing_fields().contains(&CanonicalField::Salary));
    }

    #[test]
    fn test_datasets_replace_per_category() {
        let datasets = Datasets::new()
            .with(Dataset::from_records(Category::Market, vec![JobRecord::new(Category::Market)]))
            .with(Dataset::from_records(Category::Market, Vec::new()));

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets.total_records(), 0);
        assert!(datasets.get(Category::Domestic).is_none());
    }

    #[test]
    fn test_shared_datasets_load_once() {
        let shared = SharedDatasets::new();
        let loads = Cell::new(0);

        let load = || {
            loads.set(loads.get() + 1);
            Ok(Datasets::new().with(Dataset::from_records(
                Category::Domestic,
                vec![JobRecord::new(Category::Domestic)],
            )))
        };

        let first = shared.get_or_load(load).unwrap();
        let second = shared.get_or_load(load).unwrap();

        assert_eq!(loads.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(shared.is_loaded());
    }

    #[test]
    fn test_shared_datasets_retry_after_failure() {
        let shared = SharedDatasets::new();

        let failed = shared.get_or_load(|| Err(RecommenderError::NoUsableRows { sources: 3 }));
        assert!(failed.is_err());
        assert!(!shared.is_loaded());

        let loaded = shared.get_or_load(|| Ok(Datasets::new()));
        assert!(loaded.is_ok());
    }
}
