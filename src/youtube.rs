use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{Error, Result};

pub const COMMENT_THREADS_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";
const QUOTA_EXCEEDED_REASON: &str = "quotaExceeded";

/// One page of top-level comments, plus the token for the next page if there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
  pub comments: Vec<String>,
  pub next_page_token: Option<String>,
}

/// Anything that can list the top-level comments of a video, one page at a time.
pub trait CommentSource {
  fn list_comments(
    &self,
    video_id: &str,
    page_size: u32,
    page_token: Option<&str>,
  ) -> Result<CommentPage>;
}

/// Data API v3 client for the `commentThreads` endpoint.
pub struct YouTubeClient {
  client: Client,
  api_key: String,
  base_url: String,
}

impl YouTubeClient {
  pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .user_agent(concat!("yt-comments-util/", env!("CARGO_PKG_VERSION")))
      .timeout(timeout)
      .build()?;
    Ok(YouTubeClient {
      client,
      api_key: api_key.into(),
      base_url: COMMENT_THREADS_URL.to_string(),
    })
  }

  /// Point the client at another endpoint, e.g. a local stand-in.
  pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into();
    self
  }
}

impl CommentSource for YouTubeClient {
  fn list_comments(
    &self,
    video_id: &str,
    page_size: u32,
    page_token: Option<&str>,
  ) -> Result<CommentPage> {
    let max_results = page_size.to_string();
    let mut params = vec![
      ("part", "snippet"),
      ("videoId", video_id),
      ("textFormat", "plainText"),
      ("maxResults", max_results.as_str()),
      ("key", self.api_key.as_str()),
    ];
    if let Some(token) = page_token {
      params.push(("pageToken", token));
    }
    let resp = self.client.get(&self.base_url).query(&params).send()?;
    let status = resp.status();
    let payload = resp.text()?;
    if status.is_success() {
      parse_comment_page(&payload)
    } else {
      Err(classify_api_error(
        video_id,
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown status"),
        &payload,
      ))
    }
  }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadList {
  #[serde(default)]
  items: Vec<CommentThread>,
  next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct CommentThread {
  snippet: ThreadSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
  top_level_comment: TopLevelComment,
}

#[derive(Deserialize)]
struct TopLevelComment {
  snippet: CommentSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
  text_display: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
  #[serde(default)]
  message: String,
  #[serde(default)]
  errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
  #[serde(default)]
  reason: String,
}

/// Decode a successful `commentThreads.list` response.
pub fn parse_comment_page(payload: &str) -> Result<CommentPage> {
  let list: CommentThreadList = serde_json::from_str(payload)?;
  Ok(CommentPage {
    comments: list
      .items
      .into_iter()
      .map(|thread| thread.snippet.top_level_comment.snippet.text_display)
      .collect(),
    next_page_token: list.next_page_token.filter(|token| !token.trim().is_empty()),
  })
}

/// Map an error response to `QuotaExceeded` when any of its reasons is `quotaExceeded`,
/// and to a plain `Api` error otherwise.
pub fn classify_api_error(video_id: &str, status: u16, status_text: &str, payload: &str) -> Error {
  let reason = match serde_json::from_str::<ErrorEnvelope>(payload) {
    Ok(envelope) => {
      if envelope
        .error
        .errors
        .iter()
        .any(|detail| detail.reason == QUOTA_EXCEEDED_REASON)
      {
        return Error::QuotaExceeded {
          video_id: video_id.to_string(),
        };
      }
      let reasons: Vec<&str> = envelope
        .error
        .errors
        .iter()
        .map(|detail| detail.reason.as_str())
        .filter(|reason| !reason.is_empty())
        .collect();
      match (reasons.is_empty(), envelope.error.message.is_empty()) {
        (false, _) => reasons.join(", "),
        (true, false) => envelope.error.message,
        (true, true) => status_text.to_string(),
      }
    }
    Err(_) => status_text.to_string(),
  };
  Error::Api {
    video_id: video_id.to_string(),
    status,
    reason,
  }
}
