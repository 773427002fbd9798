//! Scrapes comments for every video of the dataset that has no comments file yet.
//! Safe to rerun: finished videos are skipped, so an interrupted or quota-halted
//! run resumes from where it stopped.
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use yt_comments_util::config::ScrapeConfig;
use yt_comments_util::local::{read_video_ids, DirectoryIndex};
use yt_comments_util::scrape::{run, RunEnd};
use yt_comments_util::util::init_tracing_once;
use yt_comments_util::youtube::YouTubeClient;

fn main() {
  let _ = dotenvy::dotenv();
  let cfg = ScrapeConfig::parse();
  init_tracing_once();

  if let Err(e) = scrape(&cfg) {
    error!("{}", e);
    process::exit(1);
  }
}

fn scrape(cfg: &ScrapeConfig) -> yt_comments_util::Result<()> {
  info!("-- reading video ids from {}", cfg.dataset.display());
  let video_ids = read_video_ids(&cfg.dataset)?;
  let mut index = DirectoryIndex::open(&cfg.output_dir)?;
  let client = YouTubeClient::new(cfg.api_key.clone(), cfg.timeout())?;

  info!(
    "-- scraping {} video ids into {}",
    video_ids.len(),
    index.dir().display()
  );
  let report = run(&client, &mut index, &video_ids, cfg.page_size);
  match report.end {
    RunEnd::Done => info!("-- Done!"),
    RunEnd::Halted { video_id } => warn!("-- halted at {} after the API quota ran out; rerun later to resume", video_id),
  }
  Ok(())
}
