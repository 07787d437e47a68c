//! Search query construction for the arXiv export API.
//!
//! The API takes a single `search_query` expression combining field-prefixed
//! terms (`cat:`, `ti:`, `au:`) with boolean operators. This module builds
//! those expressions from a category set or a title, optionally refined by
//! author filters, and encodes the result for inclusion in a URL query string.
//!
//! Encoding follows the API's documented query format rather than full form
//! encoding: spaces become `+`, quotes and parentheses pass through untouched,
//! and only characters that would terminate or corrupt the parameter are
//! percent-encoded. A category query for `cs.AI` and `math.CO` therefore comes
//! out as `cat:cs.AI+OR+cat:math.CO`.

use super::*;

/// Boolean combinator applied between author filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorLogic {
  /// All listed authors must match.
  #[default]
  And,
  /// Any listed author may match.
  Or,
}

impl std::fmt::Display for AuthorLogic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AuthorLogic::And => write!(f, "AND"),
      AuthorLogic::Or => write!(f, "OR"),
    }
  }
}

impl FromStr for AuthorLogic {
  type Err = RetrieverError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match &s.to_lowercase() as &str {
      "and" => Ok(AuthorLogic::And),
      "or" => Ok(AuthorLogic::Or),
      s => Err(RetrieverError::InvalidQuery(format!("unknown author logic: {s}"))),
    }
  }
}

impl AuthorLogic {
  /// Parses an author logic value, falling back to `AND` on anything that is
  /// not a case-insensitive `AND`/`OR`.
  ///
  /// The fallback is surfaced as a `tracing` warning so callers (and their
  /// users) can see that the requested mode was not honored.
  pub fn parse_or_default(s: &str) -> Self {
    s.parse().unwrap_or_else(|_| {
      warn!("invalid author logic {s:?}, falling back to AND");
      AuthorLogic::And
    })
  }
}

/// Builds the search expression for fetching by category.
///
/// Categories are joined with `OR`, each prefixed `cat:`. When `authors` is
/// non-empty an author clause is appended, combined per `logic`:
/// `cat:cs.AI+AND+(au:"John+Doe"+AND+au:"Jane+Smith")`.
///
/// # Errors
///
/// Returns [`RetrieverError::InvalidQuery`] when `categories` is empty.
pub fn category_query(
  categories: &[String],
  authors: &[String],
  logic: AuthorLogic,
) -> Result<String, RetrieverError> {
  if categories.is_empty() {
    return Err(RetrieverError::InvalidQuery("at least one category is required".into()));
  }
  let terms =
    categories.iter().map(|cat| format!("cat:{cat}")).collect::<Vec<_>>().join(" OR ");
  Ok(encode(&with_authors(terms, authors, logic)))
}

/// Builds the search expression for searching by title.
///
/// Produces a single quoted `ti:"<title>"` term, with the optional author
/// clause appended the same way as in [`category_query`].
///
/// # Errors
///
/// Returns [`RetrieverError::InvalidQuery`] when `title` is empty or all
/// whitespace.
pub fn title_query(
  title: &str,
  authors: &[String],
  logic: AuthorLogic,
) -> Result<String, RetrieverError> {
  let title = title.trim();
  if title.is_empty() {
    return Err(RetrieverError::InvalidQuery("title must not be empty".into()));
  }
  Ok(encode(&with_authors(format!("ti:\"{title}\""), authors, logic)))
}

/// Appends the author clause to a base expression, leaving it unchanged when
/// no authors were supplied. Each author is individually quoted, with the
/// logic literal between every pair.
fn with_authors(base: String, authors: &[String], logic: AuthorLogic) -> String {
  if authors.is_empty() {
    return base;
  }
  let clause = authors
    .iter()
    .map(|author| format!("au:\"{author}\""))
    .collect::<Vec<_>>()
    .join(&format!(" {logic} "));
  format!("{base} AND ({clause})")
}

/// Encodes an assembled expression for the `search_query` URL parameter.
///
/// Spaces become `+` as the API expects; `%` and the characters that would
/// end the parameter early are percent-encoded. Everything else, including
/// the quotes and parentheses the query grammar relies on, is left as-is.
fn encode(expr: &str) -> String {
  let mut out = String::with_capacity(expr.len());
  for c in expr.chars() {
    match c {
      ' ' => out.push('+'),
      '%' => out.push_str("%25"),
      '+' => out.push_str("%2B"),
      '&' => out.push_str("%26"),
      '#' => out.push_str("%23"),
      '?' => out.push_str("%3F"),
      _ => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;

  #[test]
  fn test_category_query() {
    let query =
      category_query(&["cs.AI".into(), "math.CO".into()], &[], AuthorLogic::And).unwrap();
    assert_eq!(query, "cat:cs.AI+OR+cat:math.CO");
  }

  #[test]
  fn test_category_query_with_authors() {
    let query = category_query(
      &["cs.AI".into()],
      &["John Doe".into(), "Jane Smith".into()],
      AuthorLogic::And,
    )
    .unwrap();
    assert_eq!(query, "cat:cs.AI+AND+(au:\"John+Doe\"+AND+au:\"Jane+Smith\")");
  }

  #[test]
  fn test_category_query_with_or_authors() {
    let query = category_query(
      &["cs.AI".into()],
      &["John Doe".into(), "Jane Smith".into()],
      AuthorLogic::Or,
    )
    .unwrap();
    assert_eq!(query, "cat:cs.AI+AND+(au:\"John+Doe\"+OR+au:\"Jane+Smith\")");
  }

  #[test]
  fn test_title_query() {
    let query = title_query("Attention Is All You Need", &[], AuthorLogic::And).unwrap();
    assert_eq!(query, "ti:\"Attention+Is+All+You+Need\"");
  }

  #[test]
  fn test_title_query_with_authors() {
    let query = title_query(
      "Attention Is All You Need",
      &["Vaswani".into(), "Shazeer".into()],
      AuthorLogic::And,
    )
    .unwrap();
    assert_eq!(query, "ti:\"Attention+Is+All+You+Need\"+AND+(au:\"Vaswani\"+AND+au:\"Shazeer\")");
  }

  #[test]
  fn test_empty_categories_rejected() {
    let result = category_query(&[], &[], AuthorLogic::And);
    assert!(matches!(result, Err(RetrieverError::InvalidQuery(_))));
  }

  #[test]
  fn test_blank_title_rejected() {
    let result = title_query("   ", &[], AuthorLogic::And);
    assert!(matches!(result, Err(RetrieverError::InvalidQuery(_))));
  }

  #[test]
  fn test_author_logic_case_insensitive() {
    assert_eq!("or".parse::<AuthorLogic>().unwrap(), AuthorLogic::Or);
    assert_eq!("And".parse::<AuthorLogic>().unwrap(), AuthorLogic::And);
    assert!("xor".parse::<AuthorLogic>().is_err());
  }

  #[traced_test]
  #[test]
  fn test_invalid_logic_falls_back_to_and() {
    assert_eq!(AuthorLogic::parse_or_default("xor"), AuthorLogic::And);
    assert!(logs_contain("invalid author logic"));
  }

  #[test]
  fn test_encode_reserved_characters() {
    let query = title_query("P & NP: 100% settled?", &[], AuthorLogic::And).unwrap();
    assert_eq!(query, "ti:\"P+%26+NP:+100%25+settled%3F\"");
  }
}
