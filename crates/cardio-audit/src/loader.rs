//! Table loading.
//!
//! The existence check runs before polars is involved so a missing file is
//! always reported as [`AnalysisError::InputNotFound`], never as a generic
//! IO or polars error.

use crate::error::{AnalysisError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a delimited-text table with a header row.
///
/// A file that does not parse is an error; the text is never rewritten.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(AnalysisError::InputNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .context(format!("Reading {}", path.display()))?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_input_not_found() {
        let result = load_table(Path::new("definitely/not/here/heart.csv"));
        match result {
            Err(AnalysisError::InputNotFound(path)) => {
                assert!(path.ends_with("heart.csv"));
            }
            other => panic!("expected InputNotFound, got {:?}", other.map(|df| df.shape())),
        }
    }

    #[test]
    fn test_directory_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_table(dir.path());
        assert!(matches!(result, Err(AnalysisError::InputNotFound(_))));
    }

    #[test]
    fn test_load_infers_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Age,Sex,RestingBP").unwrap();
        writeln!(file, "40,M,140").unwrap();
        writeln!(file, "49,F,160").unwrap();

        let df = load_table(file.path()).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("Sex").unwrap().dtype(), &DataType::String);
        assert!(crate::utils::is_numeric_dtype(
            df.column("Age").unwrap().dtype()
        ));
    }

    #[test]
    fn test_malformed_csv_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Sex,RestingBP\nM,120\nF,\"13\"0\"").unwrap();

        let err = load_table(file.path()).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("Reading"));
    }
}
