use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("API quota exceeded while fetching comments for video {video_id}")]
  QuotaExceeded { video_id: String },

  #[error("API request for video {video_id} failed with HTTP {status}: {reason}")]
  Api {
    video_id: String,
    status: u16,
    reason: String,
  },

  #[error("Reqwest Error: {0}")]
  Reqwest(#[from] reqwest::Error),
  #[error("Io Error: {0}")]
  Io(#[from] std::io::Error),
  #[error("Csv Error: {0}")]
  Csv(#[from] csv::Error),
  #[error("Json Error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("{} has no `{column}` column", .path.display())]
  MissingColumn { path: PathBuf, column: String },
  #[error("{} has no header row", .0.display())]
  EmptyTable(PathBuf),

  #[error("No CSV files found in {}", .0.display())]
  NoInputFiles(PathBuf),
  #[error("Nothing to combine: none of the {attempted} CSV files in {} could be read", .dir.display())]
  NothingToCombine { dir: PathBuf, attempted: usize },
}

impl Error {
  /// Quota exhaustion ends a scraping run; every other error is local to one video or file.
  pub fn is_quota_exceeded(&self) -> bool {
    matches!(self, Error::QuotaExceeded { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_quota_errors_are_fatal() {
    let quota = Error::QuotaExceeded {
      video_id: "abc".into(),
    };
    let api = Error::Api {
      video_id: "abc".into(),
      status: 403,
      reason: "commentsDisabled".into(),
    };
    assert!(quota.is_quota_exceeded());
    assert!(!api.is_quota_exceeded());
    assert_eq!(
      api.to_string(),
      "API request for video abc failed with HTTP 403: commentsDisabled"
    );
  }
}
