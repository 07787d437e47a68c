//! Client for the arXiv export API, driving the paginated retrieval pipeline.
//!
//! The API returns at most one page of results per request and asks callers to
//! wait between consecutive requests, so fetching `limit` papers means a
//! strictly sequential loop: build the page URL, GET it, parse the feed,
//! accumulate, sleep the rate-limit delay, advance the offset. Both public
//! operations (fetch by category, search by title) share that one loop and
//! differ only in the query expression and sort field.
//!
//! The endpoint, page size, per-request timeout, and inter-page delay all live
//! in [`FetchConfig`], so tests can point the client at a local mock server
//! with a zero delay while production keeps the API's 3-second policy.
//!
//! # Examples
//!
//! ```no_run
//! use retriever::client::ArxivClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new();
//! let papers = client.fetch_papers(&["cs.AI".into()], 10, &[], Default::default()).await?;
//! println!("fetched {} papers", papers.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// Field the API sorts results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
  /// Newest submissions first; used when fetching by category.
  SubmittedDate,
  /// Best match first; used when searching by title.
  Relevance,
}

impl std::fmt::Display for SortBy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortBy::SubmittedDate => write!(f, "submittedDate"),
      SortBy::Relevance => write!(f, "relevance"),
    }
  }
}

/// Tunable parameters of the pagination loop.
#[derive(Debug, Clone)]
pub struct FetchConfig {
  /// Query endpoint of the export API.
  pub base_url:   String,
  /// Results requested per page (`max_results`).
  pub page_size:  usize,
  /// Pause between consecutive page requests. Fires after every page,
  /// including the last; the API's usage policy asks for 3 seconds.
  pub page_delay: Duration,
  /// Per-request timeout, distinct from the inter-page delay.
  pub timeout:    Duration,
}

impl Default for FetchConfig {
  fn default() -> Self {
    Self {
      base_url:   "http://export.arxiv.org/api/query".to_string(),
      page_size:  100,
      page_delay: Duration::from_secs(3),
      timeout:    Duration::from_secs(30),
    }
  }
}

/// Client for fetching paper metadata from arXiv.
///
/// Holds one `reqwest` client reused across page requests. Each fetch/search
/// call owns its own cursor and accumulator, so independent calls on clones of
/// one `ArxivClient` may run concurrently; within a call the loop is strictly
/// sequential.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client: reqwest::Client,
  /// Pagination and endpoint settings.
  config: FetchConfig,
}

impl ArxivClient {
  /// Creates a client with the production endpoint and delays.
  pub fn new() -> Self { Self::with_config(FetchConfig::default()) }

  /// Creates a client with explicit pagination settings.
  pub fn with_config(config: FetchConfig) -> Self {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());
    Self { client, config }
  }

  /// Fetches up to `limit` of the newest papers in the given categories,
  /// optionally filtered by authors combined per `logic`.
  ///
  /// # Errors
  ///
  /// - [`RetrieverError::InvalidQuery`] when `categories` is empty
  /// - [`RetrieverError::FetchFailed`] on a non-success page status
  /// - [`RetrieverError::Parse`] when a page body is not a valid feed
  pub async fn fetch_papers(
    &self,
    categories: &[String],
    limit: usize,
    authors: &[String],
    logic: AuthorLogic,
  ) -> Result<Vec<Paper>, RetrieverError> {
    let query = query::category_query(categories, authors, logic)?;
    self.fetch_paged(&query, SortBy::SubmittedDate, limit).await
  }

  /// Searches for up to `limit` papers matching `title`, optionally filtered
  /// by authors combined per `logic`. Results come back by relevance.
  ///
  /// # Errors
  ///
  /// Same as [`fetch_papers`](Self::fetch_papers), with `InvalidQuery`
  /// signalling a blank title instead.
  pub async fn search_by_title(
    &self,
    title: &str,
    limit: usize,
    authors: &[String],
    logic: AuthorLogic,
  ) -> Result<Vec<Paper>, RetrieverError> {
    let query = query::title_query(title, authors, logic)?;
    self.fetch_paged(&query, SortBy::Relevance, limit).await
  }

  /// The shared pagination loop.
  ///
  /// Issues sequential page requests with the offset advancing by
  /// `page_size`, sleeping `page_delay` after every page. Stops when `start`
  /// reaches `limit` or a page comes back empty (upstream exhausted), then
  /// truncates to exactly `limit` records. `limit == 0` returns empty without
  /// touching the network.
  async fn fetch_paged(
    &self,
    search_query: &str,
    sort_by: SortBy,
    limit: usize,
  ) -> Result<Vec<Paper>, RetrieverError> {
    let mut papers = Vec::new();
    let mut start = 0;

    while start < limit {
      let url = format!(
        "{}?search_query={}&sortBy={}&sortOrder=descending&start={}&max_results={}",
        self.config.base_url, search_query, sort_by, start, self.config.page_size
      );
      debug!("fetching page: {url}");

      let response = self.client.get(&url).send().await?;
      let status = response.status();
      if !status.is_success() {
        return Err(RetrieverError::FetchFailed { status: status.as_u16(), start });
      }

      let page = response::parse_response(&response.text().await?)?;
      debug!("page at offset {start} returned {} entries", page.len());
      let exhausted = page.is_empty();
      papers.extend(page);

      // The usage policy wants the pause between any two requests, so it
      // fires even after the final page rather than special-casing it.
      tokio::time::sleep(self.config.page_delay).await;

      if exhausted {
        debug!("source exhausted before {limit} results, stopping early");
        break;
      }
      start += self.config.page_size;
    }

    papers.truncate(limit);
    Ok(papers)
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new() }
}
