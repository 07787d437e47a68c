//! Error types for the retrieverd CLI.
//!
//! Wraps the failure modes of a CLI run into one type: errors from the
//! retriever library (query, fetch, parse), from interactive prompts, and
//! from the filesystem. All variants are transparent so the underlying
//! single-line error description reaches the user unchanged.
//!
//! Downstream phase failures (summarize, download) are deliberately not
//! routed through here when the retrieval itself succeeded; the commands
//! report them and still exit zero.

use thiserror::Error;

/// Errors that can occur during CLI operations.
#[derive(Error, Debug)]
pub enum RetrieverdError {
  /// Errors from the underlying retriever library.
  #[error(transparent)]
  Retriever(#[from] retriever::errors::RetrieverError),

  /// Errors from the interactive confirmation prompt.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// File system and IO operation errors.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
