//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Csv,
    Tsv,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "csv" => FileType::Csv,
            "tsv" | "tab" => FileType::Tsv,
            _ => FileType::Unknown,
        }
    }

    /// Field delimiter for delimited formats
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            FileType::Csv => Some(b','),
            FileType::Tsv => Some(b'\t'),
            FileType::Unknown => None,
        }
    }
}
