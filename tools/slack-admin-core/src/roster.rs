//! CSV roster input.
//!
//! The tools accept two roster shapes: a headerless file whose first column
//! holds the ids, and a headered file addressed by column name.

use std::path::Path;

use crate::error::Error;

/// Reads the first column of a headerless CSV, trimming values and skipping
/// blanks.
pub fn read_single_column(path: &Path) -> Result<Vec<String>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(0) {
            let value = value.trim();
            if !value.is_empty() {
                values.push(value.to_string());
            }
        }
    }
    Ok(values)
}

/// Reads one named column from a headered CSV.
pub fn read_column(path: &Path, header: &str) -> Result<Vec<String>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.trim() == header)
        .ok_or_else(|| Error::MissingColumn {
            header: header.to_string(),
        })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index) {
            let value = value.trim();
            if !value.is_empty() {
                values.push(value.to_string());
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn single_column_skips_blank_rows() {
        let file = write_file("W001\n\n W002 \nW003\n");
        let ids = read_single_column(file.path()).unwrap();
        assert_eq!(ids, vec!["W001", "W002", "W003"]);
    }

    #[test]
    fn single_column_takes_first_field_only() {
        let file = write_file("C001,ignored\nC002,also ignored\n");
        let ids = read_single_column(file.path()).unwrap();
        assert_eq!(ids, vec!["C001", "C002"]);
    }

    #[test]
    fn named_column_is_found_by_header() {
        let file = write_file("note,group_id\nfirst,S001\nsecond,S002\n");
        let ids = read_column(file.path(), "group_id").unwrap();
        assert_eq!(ids, vec!["S001", "S002"]);
    }

    #[test]
    fn missing_header_names_the_column() {
        let file = write_file("id\nW001\n");
        let err = read_column(file.path(), "group_id").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { header } if header == "group_id"));
    }
}
