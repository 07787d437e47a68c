//! Error types for the retriever library.
//!
//! This module provides a single error type covering every failure mode of the
//! retrieval pipeline:
//! - Query construction (caller contract violations)
//! - Paginated fetching (HTTP status failures, network errors)
//! - Feed parsing (malformed XML, entries missing required fields)
//! - Downstream phases (download I/O, summarization)
//!
//! Query and parse errors abort a fetch/search call entirely; no partial paper
//! list is ever returned for those. Downstream errors are isolated per item by
//! the [`download`](crate::download) and [`summarize`](crate::summarize)
//! modules and never invalidate an already-retrieved paper list.

use thiserror::Error;

/// Errors that can occur while retrieving or post-processing papers.
#[derive(Error, Debug)]
pub enum RetrieverError {
  /// The caller supplied an unusable query specification.
  ///
  /// This occurs when:
  /// - No categories were provided in category mode
  /// - The title is empty or all whitespace in title mode
  #[error("invalid query: {0}")]
  InvalidQuery(String),

  /// The arXiv API returned a non-success HTTP status for one page.
  ///
  /// Carries the status code and the result offset of the offending page.
  /// The pagination loop aborts immediately and discards any pages already
  /// accumulated for the call; there is no automatic retry.
  #[error("failed to fetch page at offset {start}: HTTP {status}")]
  FetchFailed {
    /// HTTP status code returned by the API.
    status: u16,
    /// The `start` offset of the page request that failed.
    start:  usize,
  },

  /// The feed response could not be parsed into paper records.
  ///
  /// This covers malformed XML as well as an entry missing a required field
  /// (title or published date). A systematically malformed response must not
  /// produce a partial, misleadingly-complete paper list, so this aborts the
  /// whole call rather than skipping the bad entry.
  #[error("failed to parse feed: {0}")]
  Parse(String),

  /// A network request failed before a status code was available.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A file system operation failed while writing downloaded papers.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The summarization backend failed or returned an unusable response.
  ///
  /// Reported per paper by [`summarize_papers`](crate::summarize::summarize_papers);
  /// never fatal to the retrieval result itself.
  #[error("summarization failed: {0}")]
  Summarizer(String),
}
