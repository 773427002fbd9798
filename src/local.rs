use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::{Error, Result};

pub const COMMENTS_FILE_PREFIX: &str = "comments_";
pub const CSV_SUFFIX: &str = ".csv";
pub const COMMENT_COLUMN: &str = "comment";
pub const VIDEO_ID_COLUMN: &str = "video_id";

lazy_static! {
  static ref COMMENTS_FILENAME_REGEX: Regex = Regex::new(r"^comments_(.+)\.csv$").unwrap();
}

/// `comments_<video_id>.csv`
pub fn comments_filename(video_id: &str) -> String {
  format!("{COMMENTS_FILE_PREFIX}{video_id}{CSV_SUFFIX}")
}

/// The video id encoded in a per-video file name, if the name follows the convention.
pub fn video_id_from_filename(filename: &str) -> Option<&str> {
  COMMENTS_FILENAME_REGEX
    .captures(filename)
    .and_then(|cap| cap.get(1))
    .map(|m| m.as_str())
}

/// All video ids that already have a per-video file in `dir`.
/// Always rescans the directory; a missing directory means nothing was scraped yet.
pub fn list_already_scraped(dir: &Path) -> HashSet<String> {
  WalkDir::new(dir)
    .min_depth(1)
    .max_depth(1)
    .into_iter()
    .flatten()
    .filter(|entry| entry.file_type().is_file())
    .filter_map(|entry| {
      entry
        .file_name()
        .to_str()
        .and_then(video_id_from_filename)
        .map(str::to_owned)
    })
    .collect()
}

/// Tracks which videos are done. The scraping loop only talks to this trait,
/// so the "done" marker can live somewhere other than the file system.
pub trait ScrapedIndex {
  fn contains(&self, video_id: &str) -> bool;
  fn scraped_ids(&self) -> HashSet<String>;
  /// Persist the comments of `video_id`, which from then on counts as scraped.
  fn mark_scraped(&mut self, video_id: &str, comments: &[String]) -> Result<()>;
}

/// The per-video files of one directory are the index.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
  dir: PathBuf,
}

impl DirectoryIndex {
  /// Creates `dir` if needed.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)?;
    Ok(DirectoryIndex { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn file_for(&self, video_id: &str) -> PathBuf {
    self.dir.join(comments_filename(video_id))
  }
}

impl ScrapedIndex for DirectoryIndex {
  fn contains(&self, video_id: &str) -> bool {
    self.file_for(video_id).is_file()
  }

  fn scraped_ids(&self) -> HashSet<String> {
    list_already_scraped(&self.dir)
  }

  fn mark_scraped(&mut self, video_id: &str, comments: &[String]) -> Result<()> {
    write_comments_file(&self.file_for(video_id), comments)
  }
}

/// Write a single-column `comment` table. The rows land in a `.part` file that is
/// renamed into place, so a crash mid-write leaves no file that looks complete.
pub fn write_comments_file(path: &Path, comments: &[String]) -> Result<()> {
  let mut tmp_name = path.as_os_str().to_owned();
  tmp_name.push(".part");
  let tmp_path = PathBuf::from(tmp_name);
  let written = write_comment_rows(&tmp_path, comments)
    .and_then(|_| fs::rename(&tmp_path, path).map_err(Error::from));
  if written.is_err() {
    let _ = fs::remove_file(&tmp_path);
  }
  written
}

fn write_comment_rows(path: &Path, comments: &[String]) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)?;
  writer.write_record([COMMENT_COLUMN])?;
  for comment in comments {
    writer.write_record([comment])?;
  }
  writer.flush()?;
  Ok(())
}

/// Read the `video_id` column of the dataset, in file order. Blank ids are skipped.
pub fn read_video_ids(dataset_path: &Path) -> Result<Vec<String>> {
  let mut reader = csv::Reader::from_path(dataset_path)?;
  let column = reader
    .headers()?
    .iter()
    .position(|h| h.trim() == VIDEO_ID_COLUMN)
    .ok_or_else(|| Error::MissingColumn {
      path: dataset_path.to_path_buf(),
      column: VIDEO_ID_COLUMN.to_string(),
    })?;

  let mut ids = Vec::new();
  for (row, record) in reader.records().enumerate() {
    let record = record?;
    match record.get(column).map(str::trim) {
      Some(id) if !id.is_empty() => ids.push(id.to_string()),
      _ => warn!("-- skipping dataset row {} without a video id", row + 1),
    }
  }
  Ok(ids)
}
