//! Table reading for delimited dataset files

use crate::error::Result;
use crate::input::table::RawTable;
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub trait TableReader {
    fn read(&self, path: &Path) -> Result<RawTable>;
}

/// Reader for CSV-like files with a header row
pub struct DelimitedReader {
    delimiter: u8,
}

impl DelimitedReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a table from any byte source; `source` names it in logs
    pub fn read_from<R: Read>(&self, input: R, source: &str) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    // Unreadable rows are dropped, the rest of the table still loads
                    warn!("Skipping unreadable row {} in {}: {}", line + 1, source, e);
                    continue;
                }
            };

            let values: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            if values.iter().all(|v| v.is_empty()) {
                continue;
            }
            rows.push((line, values));
        }

        debug!("Read {} rows with {} columns from {}", rows.len(), headers.len(), source);
        Ok(RawTable::with_indexed_rows(source, &headers, rows))
    }
}

impl TableReader for DelimitedReader {
    fn read(&self, path: &Path) -> Result<RawTable> {
        let file = File::open(path)?;
        self.read_from(file, &path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_with_ragged_rows() {
        let data = "Job Title,Company,Skills\n\
                    Data Analyst, Acme ,\"Python, SQL\"\n\
                    ,,\n\
                    Intern,Globex\n\
                    Engineer,Initech,Rust,extra\n";

        let table = DelimitedReader::new(b',').read_from(data.as_bytes(), "inline.csv").unwrap();

        assert_eq!(table.headers(), &["job_title", "company", "skills"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].text(Some("company")), Some("Acme"));
        assert_eq!(table.rows()[0].text(Some("skills")), Some("Python, SQL"));
        assert_eq!(table.rows()[1].text(Some("skills")), None);
        assert_eq!(table.rows()[2].extra_cells(), 1);
    }

    #[test]
    fn test_row_index_follows_source_position() {
        let data = "role,city
                    Analyst,Pune
                    ,
                    Engineer,Delhi
";

        let table = DelimitedReader::new(b',').read_from(data.as_bytes(), "inline.csv").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].index(), 0);
        assert_eq!(table.rows()[1].index(), 2);
    }

    #[test]
    fn test_trailing_delimiter_adds_no_extra_cells() {
        let data = "role,city,
Analyst,Pune,
Engineer,Delhi,,
";
        let table = DelimitedReader::new(b',').read_from(data.as_bytes(), "inline.csv").unwrap();

        assert!(table.rows().iter().all(|row| row.extra_cells() == 0));
    }

    #[test]
    fn test_read_tsv() {
        let data = "role\tcity\nAnalyst\tPune\n";
        let table = DelimitedReader::new(b'\t').read_from(data.as_bytes(), "inline.tsv").unwrap();

        assert_eq!(table.rows()[0].text(Some("city")), Some("Pune"));
    }
}
