mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::Response;

/// Errors raised while reading an exported response sheet.
#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read response export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid response CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads `id,kind,value,option_id,most_like_me,least_like_me` CSV exports into responses.
pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Response>, ResponseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
        Ok(parser::parse_responses(reader)?)
    }
}
