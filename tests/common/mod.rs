#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use yt_comments_util::youtube::{CommentPage, CommentSource};
use yt_comments_util::{Error, Result};

/// What the fake API answers for one video.
#[derive(Clone, Debug)]
pub enum Script {
  /// One inner vec per page, served in order.
  Pages(Vec<Vec<&'static str>>),
  /// The first page succeeds, the second fails with a transient error.
  FailOnSecondPage(Vec<&'static str>),
  Quota,
  Failure,
}

/// A `CommentSource` that replays scripted pages and records every call.
#[derive(Default)]
pub struct FakeSource {
  scripts: HashMap<String, Script>,
  pub calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FakeSource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, video_id: &str, script: Script) -> Self {
    self.scripts.insert(video_id.to_string(), script);
    self
  }

  /// Video ids in the order of their first-page requests.
  pub fn attempted(&self) -> Vec<String> {
    self
      .calls
      .borrow()
      .iter()
      .filter(|(_, token)| token.is_none())
      .map(|(id, _)| id.clone())
      .collect()
  }

  pub fn call_count(&self, video_id: &str) -> usize {
    self.calls.borrow().iter().filter(|(id, _)| id == video_id).count()
  }
}

fn page_index(token: Option<&str>) -> usize {
  token
    .and_then(|t| t.strip_prefix("page-"))
    .and_then(|n| n.parse().ok())
    .unwrap_or(0)
}

fn page(pages: &[Vec<&'static str>], index: usize) -> CommentPage {
  CommentPage {
    comments: pages[index].iter().map(|c| c.to_string()).collect(),
    next_page_token: (index + 1 < pages.len()).then(|| format!("page-{}", index + 1)),
  }
}

impl CommentSource for FakeSource {
  fn list_comments(&self, video_id: &str, _page_size: u32, page_token: Option<&str>) -> Result<CommentPage> {
    self
      .calls
      .borrow_mut()
      .push((video_id.to_string(), page_token.map(str::to_owned)));
    let transient = || Error::Api {
      video_id: video_id.to_string(),
      status: 500,
      reason: "backendError".to_string(),
    };
    match self.scripts.get(video_id) {
      None => Ok(CommentPage::default()),
      Some(Script::Pages(pages)) if pages.is_empty() => Ok(CommentPage::default()),
      Some(Script::Pages(pages)) => Ok(page(pages, page_index(page_token))),
      Some(Script::FailOnSecondPage(first)) => match page_token {
        None => Ok(CommentPage {
          comments: first.iter().map(|c| c.to_string()).collect(),
          next_page_token: Some("page-1".to_string()),
        }),
        Some(_) => Err(transient()),
      },
      Some(Script::Quota) => Err(Error::QuotaExceeded {
        video_id: video_id.to_string(),
      }),
      Some(Script::Failure) => Err(transient()),
    }
  }
}

pub fn ids(list: &[&str]) -> Vec<String> {
  list.iter().map(|s| s.to_string()).collect()
}

/// Names of all files in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
    .collect();
  names.sort();
  names
}

/// Parse a CSV file into its header and rows.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
  let mut reader = csv::Reader::from_path(path).unwrap();
  let headers = reader.headers().unwrap().iter().map(str::to_owned).collect();
  let rows = reader
    .records()
    .map(|r| r.unwrap().iter().map(str::to_owned).collect())
    .collect();
  (headers, rows)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, contents).unwrap();
  path
}
