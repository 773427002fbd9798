use tracing::debug;

use crate::youtube::CommentSource;
use crate::Result;

/// Collect every top-level comment of `video_id`, following continuation tokens
/// until the API stops returning one. Comments are kept in page order.
///
/// Any error ends the walk; pages fetched before it are discarded, so callers never
/// mistake a failed fetch for a video with fewer comments.
pub fn fetch_comments<S: CommentSource + ?Sized>(
  source: &S,
  video_id: &str,
  page_size: u32,
) -> Result<Vec<String>> {
  let mut comments = Vec::new();
  let mut page = source.list_comments(video_id, page_size, None)?;
  let mut pages = 1;
  loop {
    comments.extend(page.comments);
    match page.next_page_token {
      Some(token) if !token.is_empty() => {
        page = source.list_comments(video_id, page_size, Some(&token))?;
        pages += 1;
      }
      _ => break,
    }
  }
  debug!("fetched {} comments in {} pages for {}", comments.len(), pages, video_id);
  Ok(comments)
}
