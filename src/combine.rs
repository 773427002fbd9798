//! Merge all per-video CSV files of a directory into one CSV file.
//!
//! The merge stacks rows. Columns are matched by header label, and the merged header
//! is the union of all headers in first-seen order. Unreadable files are reported
//! and left out rather than aborting the whole merge.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use tracing::{info, warn};

use crate::local::CSV_SUFFIX;
use crate::{Error, Result};

/// An in-memory CSV table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub headers: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
  pub files_loaded: usize,
  pub skipped: Vec<PathBuf>,
  pub rows: usize,
}

/// Every `.csv` file directly inside `dir`, sorted by name.
pub fn list_csv_files(dir: &Path) -> Vec<PathBuf> {
  WalkDir::new(dir)
    .sort(true)
    .min_depth(1)
    .max_depth(1)
    .into_iter()
    .flatten()
    .filter(|entry| entry.file_type().is_file())
    .filter(|entry| {
      entry
        .file_name()
        .to_str()
        .map(|name| name.ends_with(CSV_SUFFIX))
        .unwrap_or(false)
    })
    .map(|entry| entry.path())
    .collect()
}

/// Load a CSV file with a header row. Rows must all have the header's width.
pub fn load_table(path: &Path) -> Result<Table> {
  let mut reader = csv::ReaderBuilder::new().flexible(false).from_path(path)?;
  let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
  if headers.is_empty() {
    return Err(Error::EmptyTable(path.to_path_buf()));
  }
  let mut rows = Vec::new();
  for record in reader.records() {
    rows.push(record?.iter().map(str::to_owned).collect());
  }
  Ok(Table { headers, rows })
}

/// Stack the rows of `tables`. Cells of columns a table does not have are left empty.
pub fn concat(tables: &[Table]) -> Table {
  let mut headers: Vec<String> = Vec::new();
  for table in tables {
    for header in &table.headers {
      if !headers.contains(header) {
        headers.push(header.clone());
      }
    }
  }

  let mut rows = Vec::with_capacity(tables.iter().map(|t| t.rows.len()).sum());
  for table in tables {
    let layout: Vec<Option<usize>> = headers
      .iter()
      .map(|header| table.headers.iter().position(|h| h == header))
      .collect();
    for row in &table.rows {
      rows.push(
        layout
          .iter()
          .map(|col| col.and_then(|i| row.get(i)).cloned().unwrap_or_default())
          .collect(),
      );
    }
  }
  Table { headers, rows }
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)?;
  writer.write_record(&table.headers)?;
  for row in &table.rows {
    writer.write_record(row)?;
  }
  writer.flush()?;
  Ok(())
}

/// Merge every CSV file of `input_dir` into `output_path`.
///
/// Fails with [`Error::NoInputFiles`] when there is nothing to list and with
/// [`Error::NothingToCombine`] when no listed file could be read; no output is
/// written in either case.
pub fn combine(input_dir: &Path, output_path: &Path) -> Result<CombineReport> {
  let output_canonical = fs::canonicalize(output_path).ok();
  let csv_files: Vec<PathBuf> = list_csv_files(input_dir)
    .into_iter()
    .filter(|path| output_canonical.is_none() || fs::canonicalize(path).ok() != output_canonical)
    .collect();
  if csv_files.is_empty() {
    return Err(Error::NoInputFiles(input_dir.to_path_buf()));
  }

  let mut tables = Vec::with_capacity(csv_files.len());
  let mut skipped = Vec::new();
  for path in &csv_files {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    match load_table(path) {
      Ok(table) => {
        info!("Read {} rows from {}", table.rows.len(), name);
        tables.push(table);
      }
      Err(e) => {
        warn!("Error reading {}: {}", name, e);
        skipped.push(path.clone());
      }
    }
  }
  if tables.is_empty() {
    return Err(Error::NothingToCombine {
      dir: input_dir.to_path_buf(),
      attempted: csv_files.len(),
    });
  }

  let combined = concat(&tables);
  write_table(output_path, &combined)?;
  info!("Combined data saved to {}", output_path.display());
  Ok(CombineReport {
    files_loaded: tables.len(),
    skipped,
    rows: combined.rows.len(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
      headers: headers.iter().map(|h| h.to_string()).collect(),
      rows: rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect(),
    }
  }

  #[test]
  fn concat_stacks_rows_of_the_same_schema() {
    let merged = concat(&[table(&["comment"], &[&["a"]]), table(&["comment"], &[&["b"], &["c"]])]);
    assert_eq!(merged, table(&["comment"], &[&["a"], &["b"], &["c"]]));
  }

  #[test]
  fn concat_unions_columns_by_label() {
    let merged = concat(&[
      table(&["comment"], &[&["a"]]),
      table(&["author", "comment"], &[&["bob", "b"]]),
    ]);
    assert_eq!(merged.headers, vec!["comment", "author"]);
    assert_eq!(merged.rows, vec![vec!["a", ""], vec!["b", "bob"]]);
  }

  #[test]
  fn concat_of_header_only_tables_has_no_rows() {
    let merged = concat(&[table(&["comment"], &[]), table(&["comment"], &[])]);
    assert_eq!(merged.headers, vec!["comment"]);
    assert!(merged.rows.is_empty());
  }
}
