//! Paper metadata types produced by the retrieval pipeline.
//!
//! A [`Paper`] is the unit of output of a fetch or search call. Records are
//! built exclusively by the [`response`](crate::response) parser, one per feed
//! entry, and are treated as immutable afterwards: display, summarization, and
//! download all consume them read-only.

use super::*;

/// Metadata for a single arXiv paper.
///
/// Every record carries a non-empty title and published timestamp (the parser
/// rejects entries missing either). The author list preserves the order of the
/// `<author>` elements in the feed and may be empty.
///
/// # Examples
///
/// ```no_run
/// use retriever::client::ArxivClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ArxivClient::new();
/// let papers = client.fetch_papers(&["cs.AI".into()], 5, &[], Default::default()).await?;
/// for paper in &papers {
///   println!("{} ({})", paper.title, paper.published);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
  /// The paper's title, whitespace-trimmed.
  pub title:         String,
  /// Author display names in feed order. May be empty, never absent.
  pub authors:       Vec<String>,
  /// The abstract text, whitespace-trimmed.
  pub summary:       String,
  /// Publication timestamp as the ISO-8601 string provided by the feed.
  /// Kept verbatim, not reparsed.
  pub published:     String,
  /// Canonical link to the paper's abstract page, taken from the entry id.
  pub abstract_link: String,
  /// Direct link to the PDF, when the feed carried one.
  pub pdf_link:      Option<String>,
}

impl Paper {
  /// The paper's canonical link.
  ///
  /// For feeds that carry only the identifying link this is the whole story;
  /// for the extended variant it is the abstract page, with
  /// [`pdf_link`](Self::pdf_link) holding the document link separately.
  pub fn link(&self) -> &str { &self.abstract_link }
}
