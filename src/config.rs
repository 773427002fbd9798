use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_DATASET_PATH: &str = "indian_music_dataset.csv";
pub const DEFAULT_COMMENTS_DIR: &str = "comments_data";
pub const DEFAULT_COMBINED_PATH: &str = "combined_comments.csv";
/// The API caps `maxResults` for comment threads at 100.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Options for the `scrape_comments` job.
#[derive(Parser, Debug, Clone)]
#[command(name = "scrape_comments")]
#[command(about = "Fetch top-level comments for every video in a dataset, one CSV per video, resuming where the last run stopped")]
pub struct ScrapeConfig {
  #[arg(long, default_value = DEFAULT_DATASET_PATH, help = "CSV dataset with a `video_id` column")]
  pub dataset: PathBuf,

  #[arg(long, default_value = DEFAULT_COMMENTS_DIR, help = "Directory holding comments_<video_id>.csv files")]
  pub output_dir: PathBuf,

  #[arg(long, default_value_t = MAX_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64), help = "Comments requested per API page")]
  pub page_size: u32,

  #[arg(long, default_value_t = 60, help = "Timeout for each API request, in seconds")]
  pub timeout_secs: u64,

  #[arg(long, env = "API_KEY", hide_env_values = true, help = "Data API key")]
  pub api_key: String,
}

impl ScrapeConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs.max(1))
  }
}

/// Options for the `combine_comments` job.
#[derive(Parser, Debug, Clone)]
#[command(name = "combine_comments")]
#[command(about = "Merge every CSV file of a directory into a single CSV file")]
pub struct CombineConfig {
  #[arg(long, default_value = DEFAULT_COMMENTS_DIR, help = "Directory of per-video CSV files")]
  pub input_dir: PathBuf,

  #[arg(long, default_value = DEFAULT_COMBINED_PATH, help = "Path of the merged CSV file")]
  pub output: PathBuf,
}
