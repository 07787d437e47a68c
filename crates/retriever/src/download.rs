//! Downloading paper PDFs to a local directory.
//!
//! Two entry points: [`download_papers`] persists the documents of an already
//! retrieved paper list, and [`download_from_links`] works from raw arXiv
//! links (abstract or PDF form) without any metadata. Both treat individual
//! failures as non-fatal: one unreachable PDF is logged and reported, and the
//! rest of the batch still downloads.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::*;

lazy_static! {
  /// Abstract page link, e.g. `http://arxiv.org/abs/hep-ex/0307015`.
  static ref ABS_PATH: Regex = Regex::new(r"^/abs/(.+)$").unwrap();
  /// Direct PDF link, with or without the `.pdf` suffix.
  static ref PDF_PATH: Regex = Regex::new(r"^/pdf/(.+?)(?:\.pdf)?$").unwrap();
}

/// Downloads the PDF of every paper in the list that carries a document link.
///
/// Creates `dir` (and parents) if needed and writes each document as
/// `<formatted-title>.pdf`. Papers without a PDF link, and papers whose
/// download or write fails, are logged with `warn!` and skipped.
///
/// Returns the paths that were written.
///
/// # Errors
///
/// Only the creation of `dir` itself is fatal; per-paper failures are not.
pub async fn download_papers(papers: &[Paper], dir: &Path) -> Result<Vec<PathBuf>, RetrieverError> {
  std::fs::create_dir_all(dir)?;
  let client = download_client();

  let mut saved = Vec::new();
  for paper in papers {
    let Some(pdf_link) = &paper.pdf_link else {
      warn!("no PDF link for {:?}, skipping", paper.title);
      continue;
    };
    let filename = format!("{}.pdf", format::format_title(&paper.title, None));
    match fetch_pdf(&client, pdf_link, &dir.join(filename)).await {
      Ok(path) => saved.push(path),
      Err(e) => warn!("failed to download {:?}: {e}", paper.title),
    }
  }
  Ok(saved)
}

/// Downloads papers given raw arXiv links, abstract or PDF form.
///
/// Abstract links are rewritten to their PDF counterpart; files are named
/// after the arXiv identifier. Links that are not recognizable arXiv links
/// are logged and skipped, as are individual download failures.
///
/// # Errors
///
/// Only the creation of `dir` itself is fatal; per-link failures are not.
pub async fn download_from_links(
  links: &[String],
  dir: &Path,
) -> Result<Vec<PathBuf>, RetrieverError> {
  std::fs::create_dir_all(dir)?;
  let client = download_client();

  let mut saved = Vec::new();
  for link in links {
    let Some((pdf_url, id)) = classify_link(link) else {
      warn!("not an arXiv abstract or PDF link, skipping: {link}");
      continue;
    };
    let filename = format!("{}.pdf", id.replace('/', "_"));
    match fetch_pdf(&client, &pdf_url, &dir.join(filename)).await {
      Ok(path) => saved.push(path),
      Err(e) => warn!("failed to download {link}: {e}"),
    }
  }
  Ok(saved)
}

/// HTTP client shared by one download batch.
fn download_client() -> reqwest::Client {
  reqwest::Client::builder()
    .timeout(Duration::from_secs(30))
    .build()
    .unwrap_or_else(|_| reqwest::Client::new())
}

/// Resolves an arXiv link to `(pdf_url, identifier)`, or `None` when the link
/// is not an arXiv abstract or PDF URL.
fn classify_link(link: &str) -> Option<(String, String)> {
  let url = Url::parse(link).ok()?;
  match url.host_str() {
    Some("arxiv.org") | Some("www.arxiv.org") | Some("export.arxiv.org") => {},
    _ => return None,
  }
  if let Some(caps) = ABS_PATH.captures(url.path()) {
    let id = caps[1].to_string();
    return Some((link.replace("/abs/", "/pdf/"), id));
  }
  if let Some(caps) = PDF_PATH.captures(url.path()) {
    return Some((link.to_string(), caps[1].to_string()));
  }
  None
}

/// GETs one PDF and writes it to `path`.
async fn fetch_pdf(
  client: &reqwest::Client,
  pdf_url: &str,
  path: &Path,
) -> Result<PathBuf, RetrieverError> {
  debug!("downloading {pdf_url} to {path:?}");
  let response = client.get(pdf_url).send().await?;
  let status = response.status();
  if !status.is_success() {
    return Err(RetrieverError::FetchFailed { status: status.as_u16(), start: 0 });
  }
  let bytes = response.bytes().await?;
  std::fs::write(path, bytes)?;
  Ok(path.to_path_buf())
}
