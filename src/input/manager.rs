//! Input manager for loading dataset tables

use crate::error::{RecommenderError, Result};
use crate::input::file_detector::FileType;
use crate::input::table::RawTable;
use crate::input::table_reader::{DelimitedReader, TableReader};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct DatasetManager {
    cache: HashMap<PathBuf, Arc<RawTable>>,
    enable_cache: bool,
}

impl Default for DatasetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn load_table(&mut self, path: &Path) -> Result<Arc<RawTable>> {
        if self.enable_cache {
            if let Some(table) = self.cache.get(path) {
                info!("Using cached table for: {}", path.display());
                return Ok(Arc::clone(table));
            }
        }

        if !path.exists() {
            return Err(RecommenderError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        let delimiter = file_type.delimiter().ok_or_else(|| {
            RecommenderError::UnsupportedFormat(format!("Unsupported file type for: {}", path.display()))
        })?;

        info!("Reading dataset table: {}", path.display());
        let table = Arc::new(DelimitedReader::new(delimiter).read(path)?);

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), Arc::clone(&table));
        }

        Ok(table)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                RecommenderError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
