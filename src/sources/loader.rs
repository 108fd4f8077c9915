//! Source table loading.
//!
//! Reads the seven delimited source files into [`RawTable`]s. Files are UTF-8
//! with an optional byte-order mark; rows may be shorter or longer than the
//! header and are padded or truncated to fit it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SourceFiles;
use crate::error::{EngineError, EngineResult};
use crate::models::{RawTable, SourceTables, normalize_cell};

const UTF8_BOM: char = '\u{feff}';

/// Loads the source tables from a data directory.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::SourceFiles;
/// use payroll_engine::sources::SourceLoader;
///
/// let sources = SourceLoader::new("./data", &SourceFiles::default()).load()?;
/// println!("{} position rows", sources.positions.len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SourceLoader {
    data_dir: PathBuf,
    files: SourceFiles,
}

impl SourceLoader {
    /// Creates a loader for the given directory and file names.
    pub fn new<P: AsRef<Path>>(data_dir: P, files: &SourceFiles) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            files: files.clone(),
        }
    }

    /// Reads all seven tables.
    ///
    /// Returns `SourceNotFound` for a missing file and `SourceParseError` for
    /// a file that is not valid UTF-8 or not valid delimited text, or when the
    /// configured delimiter is not ASCII.
    pub fn load(&self) -> EngineResult<SourceTables> {
        let delimiter = self
            .files
            .delimiter_byte()
            .ok_or_else(|| EngineError::SourceParseError {
                path: self.data_dir.display().to_string(),
                message: format!(
                    "delimiter must be an ASCII character, got {:?}",
                    self.files.delimiter
                ),
            })?;

        let tables = SourceTables {
            positions: self.load_table("positions", &self.files.positions, delimiter)?,
            salaries: self.load_table("salaries", &self.files.salaries, delimiter)?,
            org_units: self.load_table("org_units", &self.files.org_units, delimiter)?,
            projects: self.load_table("projects", &self.files.projects, delimiter)?,
            bonuses: self.load_table("bonuses", &self.files.bonuses, delimiter)?,
            insurance: self.load_table("insurance", &self.files.insurance, delimiter)?,
            market: self.load_table("market", &self.files.market, delimiter)?,
        };

        info!(
            data_dir = %self.data_dir.display(),
            positions = tables.positions.len(),
            salaries = tables.salaries.len(),
            market = tables.market.len(),
            "Source tables loaded"
        );

        Ok(tables)
    }

    fn load_table(&self, name: &str, file_name: &str, delimiter: u8) -> EngineResult<RawTable> {
        let path = self.data_dir.join(file_name);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::SourceNotFound {
                path: path.display().to_string(),
            },
            _ => EngineError::SourceParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        let table = parse_table(name, &content, delimiter).map_err(|e| {
            EngineError::SourceParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        debug!(table = name, rows = table.len(), columns = table.headers.len(), "Table read");
        Ok(table)
    }
}

/// Parses delimited text with a header row into a table.
///
/// Header names are trimmed. Cells go through [`normalize_cell`].
pub fn parse_table(name: &str, content: &str, delimiter: u8) -> Result<RawTable, csv::Error> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = RawTable::new(name, headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(normalize_cell).collect());
    }

    Ok(table)
}
