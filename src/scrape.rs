use std::fmt;

use tracing::{error, info, warn};

use crate::local::ScrapedIndex;
use crate::remote::fetch_comments;
use crate::youtube::CommentSource;

/// Per-run outcome counts. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
  pub skipped: usize,
  pub scraped: usize,
  pub errored: usize,
}

impl SessionCounters {
  pub fn total(&self) -> usize {
    self.skipped + self.scraped + self.errored
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEnd {
  /// Every identifier was visited.
  Done,
  /// The API quota ran out while fetching `video_id`; later identifiers were not attempted.
  Halted { video_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub counters: SessionCounters,
  pub end: RunEnd,
}

/// Session counters plus a fresh look at the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
  pub counters: SessionCounters,
  pub total_scraped: usize,
  pub remaining: usize,
}

impl SessionSummary {
  pub fn collect<I: ScrapedIndex + ?Sized>(counters: SessionCounters, index: &I, video_ids: &[String]) -> Self {
    let scraped = index.scraped_ids();
    SessionSummary {
      counters,
      total_scraped: scraped.len(),
      remaining: video_ids.iter().filter(|id| !scraped.contains(id.as_str())).count(),
    }
  }
}

impl fmt::Display for SessionSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rows = [
      ("Skipped Videos", self.counters.skipped),
      ("Scraped Videos", self.counters.scraped),
      ("Errored Videos", self.counters.errored),
      ("Total Videos", self.counters.total()),
      ("Total Videos Scraped", self.total_scraped),
      ("Total Videos Remaining", self.remaining),
    ];
    writeln!(f, "---------------------------------")?;
    writeln!(f, "Session Summary")?;
    writeln!(f, "{:<24}{:>7}", "Category", "Count")?;
    writeln!(f, "{:<24}{:>7}", "----------------------", "-----")?;
    for (category, count) in rows {
      writeln!(f, "{:<24}{:>7}", category, count)?;
    }
    write!(f, "---------------------------------")
  }
}

/// Scrape every identifier that is not in `index` yet, printing a summary to stdout
/// after each attempted video and once more at the end.
pub fn run<S, I>(source: &S, index: &mut I, video_ids: &[String], page_size: u32) -> RunReport
where
  S: CommentSource + ?Sized,
  I: ScrapedIndex + ?Sized,
{
  run_with(source, index, video_ids, page_size, |summary| println!("{summary}"))
}

/// As [`run`], with the summaries handed to `on_summary`.
///
/// Identifiers are processed from the end of `video_ids` towards the start.
pub fn run_with<S, I, F>(
  source: &S,
  index: &mut I,
  video_ids: &[String],
  page_size: u32,
  mut on_summary: F,
) -> RunReport
where
  S: CommentSource + ?Sized,
  I: ScrapedIndex + ?Sized,
  F: FnMut(&SessionSummary),
{
  let mut counters = SessionCounters::default();
  let mut end = RunEnd::Done;

  for video_id in video_ids.iter().rev() {
    if index.contains(video_id) {
      counters.skipped += 1;
      continue;
    }
    info!("-- processing video id: {}", video_id);
    let outcome = fetch_comments(source, video_id, page_size)
      .and_then(|comments| index.mark_scraped(video_id, &comments).map(|_| comments.len()));
    match outcome {
      Ok(count) => {
        counters.scraped += 1;
        info!("-- saved {} comments for {}", count, video_id);
      }
      Err(e) => {
        counters.errored += 1;
        error!("-- error for video id {}: {}", video_id, e);
        if e.is_quota_exceeded() {
          warn!("-- quota exceeded, stopping this run");
          end = RunEnd::Halted {
            video_id: video_id.clone(),
          };
          break;
        }
      }
    }
    on_summary(&SessionSummary::collect(counters, &*index, video_ids));
  }

  on_summary(&SessionSummary::collect(counters, &*index, video_ids));
  RunReport { counters, end }
}
