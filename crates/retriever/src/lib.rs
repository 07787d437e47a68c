//! A library for retrieving academic paper metadata from arXiv, downloading
//! the papers themselves, and summarizing their abstracts through a language
//! model.
//!
//! The center of the crate is the paginated retrieval pipeline: a search
//! expression built by [`query`], driven through the export API page by page
//! under a fixed rate-limit delay by [`client`], with each page parsed into
//! [`paper::Paper`] records by [`response`]. The [`download`] and
//! [`summarize`] modules consume the resulting list without ever being able
//! to invalidate it.
//!
//! # Example
//! ```rust,no_run
//! use retriever::client::ArxivClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let client = ArxivClient::new();
//!   let papers = client.fetch_papers(&["cs.AI".into()], 10, &[], Default::default()).await?;
//!   for paper in &papers {
//!     println!("{}: {}", paper.published, paper.title);
//!   }
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  str::FromStr,
  time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod client;
pub mod download;
pub mod errors;
pub mod format;
pub mod paper;
pub mod query;
pub mod response;
pub mod summarize;

use errors::RetrieverError;
use paper::Paper;
use query::AuthorLogic;
