//! File input and output.
//!
//! [`SourceLoader`] reads the seven source tables; [`ArtifactWriter`] writes
//! the enriched tables and chart data a run produces.

mod loader;
mod writer;

pub use loader::{SourceLoader, parse_table};
pub use writer::{ArtifactWriter, EMPLOYEES_FILE, VACANCIES_FILE, WrittenArtifacts};
