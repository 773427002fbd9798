//! Merges every per-video comments file into a single CSV.
use std::process;

use clap::Parser;
use tracing::{error, info};

use yt_comments_util::combine::combine;
use yt_comments_util::config::CombineConfig;
use yt_comments_util::util::init_tracing_once;

fn main() {
  let cfg = CombineConfig::parse();
  init_tracing_once();

  match combine(&cfg.input_dir, &cfg.output) {
    Ok(report) => {
      if !report.skipped.is_empty() {
        info!("-- skipped {} unreadable files", report.skipped.len());
      }
      info!("-- wrote {} rows from {} files", report.rows, report.files_loaded);
    }
    Err(e) => {
      error!("{}", e);
      process::exit(1);
    }
  }
}
