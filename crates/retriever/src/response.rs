//! Parsing of the arXiv Atom feed into [`Paper`] records.
//!
//! The export API answers with a namespaced Atom document carrying one
//! `<entry>` per paper. The mapping from feed to record is expressed as a
//! serde schema over `quick-xml`'s deserializer: element names map to fields,
//! attributes use the `@` convention, and optionality is encoded with
//! `Option`/`default`. Both observed link conventions are handled by the one
//! schema — a bare identifying link (entry `<id>`) and the extended variant
//! with a separate PDF-typed `<link>` element.
//!
//! Parsing is all-or-nothing per response: malformed XML or an entry missing
//! a required field fails the whole page rather than silently dropping
//! entries, so a systematically broken response can never masquerade as a
//! short result set.

use quick_xml::de::from_str;

use super::*;

/// Root of the Atom response. Top-level feed metadata (self link, query echo,
/// opensearch totals) is irrelevant here and left undeclared.
#[derive(Debug, Deserialize)]
struct Feed {
  /// Paper entries, in document order. Absent on an empty result page.
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// One feed entry as the API serializes it.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Abstract page URL, doubling as the entry identifier.
  id:        String,
  /// Paper title (may contain LaTeX markup and folded whitespace).
  title:     String,
  /// Paper abstract.
  summary:   String,
  /// ISO-8601 publication timestamp.
  published: String,
  /// Author elements, one display name each.
  #[serde(rename = "author", default)]
  authors:   Vec<Author>,
  /// Link elements; the PDF link is distinguished by its attributes.
  #[serde(rename = "link", default)]
  links:     Vec<Link>,
}

/// An author element wrapping the display name.
#[derive(Debug, Deserialize)]
struct Author {
  /// The author's display name.
  name: String,
}

/// A `<link>` element's attributes.
#[derive(Debug, Deserialize)]
struct Link {
  /// Link target.
  #[serde(rename = "@href")]
  href:         String,
  /// Link relation (`alternate`, `related`, ...).
  #[serde(rename = "@rel", default)]
  rel:          Option<String>,
  /// Content type of the target, e.g. `application/pdf`.
  #[serde(rename = "@type", default)]
  content_type: Option<String>,
}

impl Link {
  /// Whether this link points at the paper document itself.
  fn is_pdf(&self) -> bool {
    self.content_type.as_deref() == Some("application/pdf")
      || self.rel.as_deref() == Some("related")
  }
}

/// Parses one page of the Atom feed into paper records.
///
/// Records come out in document order, one per entry, with title and summary
/// whitespace-trimmed and the published timestamp kept verbatim. An empty
/// feed parses to an empty list.
///
/// # Errors
///
/// Returns [`RetrieverError::Parse`] when the XML is malformed or an entry is
/// missing a required field (or its title/published is blank after trimming).
pub fn parse_response(xml: &str) -> Result<Vec<Paper>, RetrieverError> {
  let feed: Feed =
    from_str(xml).map_err(|e| RetrieverError::Parse(format!("invalid feed XML: {e}")))?;
  feed.entries.into_iter().map(into_paper).collect()
}

/// Converts one feed entry into a [`Paper`], enforcing the record invariants.
fn into_paper(entry: Entry) -> Result<Paper, RetrieverError> {
  let title = entry.title.trim().to_string();
  let published = entry.published.trim().to_string();
  if title.is_empty() {
    return Err(RetrieverError::Parse(format!("entry {} has an empty title", entry.id)));
  }
  if published.is_empty() {
    return Err(RetrieverError::Parse(format!("entry {} has an empty published date", entry.id)));
  }

  let pdf_link = entry.links.iter().find(|link| link.is_pdf()).map(|link| link.href.clone());

  Ok(Paper {
    title,
    authors: entry.authors.into_iter().map(|author| author.name).collect(),
    summary: entry.summary.trim().to_string(),
    published,
    abstract_link: entry.id,
    pdf_link,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Single-entry document adapted from §4.1 of the arXiv API user manual.
  const SINGLE_ENTRY: &str = r#"
    <feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" xmlns:arxiv="http://arxiv.org/schemas/atom">
      <link href="http://arxiv.org/api/query?search_query=all:electron&amp;id_list=&amp;start=0&amp;max_results=1" rel="self" type="application/atom+xml"/>
      <title>ArXiv Query: search_query=all:electron&amp;id_list=&amp;start=0&amp;max_results=1</title>
      <updated>2007-10-08T00:00:00-04:00</updated>
      <opensearch:totalResults>1000</opensearch:totalResults>
      <entry>
        <id>http://arxiv.org/abs/hep-ex/0307015</id>
        <published>2003-07-07T13:46:39-04:00</published>
        <title>Multi-Electron Production at High Transverse Momenta in ep Collisions at HERA</title>
        <summary>  Test Summary  </summary>
        <author>
          <name>H1 Collaboration</name>
        </author>
        <link href="http://arxiv.org/pdf/hep-ex/0307015" rel="related" title="pdf" type="application/pdf"/>
      </entry>
    </feed>
  "#;

  #[test]
  fn test_parse_single_entry() {
    let papers = parse_response(SINGLE_ENTRY).unwrap();
    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(
      paper.title,
      "Multi-Electron Production at High Transverse Momenta in ep Collisions at HERA"
    );
    assert_eq!(paper.authors, vec!["H1 Collaboration".to_string()]);
    assert_eq!(paper.summary, "Test Summary");
    assert_eq!(paper.published, "2003-07-07T13:46:39-04:00");
    assert_eq!(paper.abstract_link, "http://arxiv.org/abs/hep-ex/0307015");
    assert_eq!(paper.pdf_link.as_deref(), Some("http://arxiv.org/pdf/hep-ex/0307015"));
  }

  #[test]
  fn test_parse_identifier_link_only() {
    let xml = r#"
      <feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
          <id>http://arxiv.org/abs/2407.00001</id>
          <published>2024-07-05T12:00:00Z</published>
          <title> Test Paper </title>
          <summary>An abstract.</summary>
          <author><name>John Doe</name></author>
        </entry>
      </feed>
    "#;
    let papers = parse_response(xml).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].title, "Test Paper");
    assert_eq!(papers[0].link(), "http://arxiv.org/abs/2407.00001");
    assert_eq!(papers[0].pdf_link, None);
  }

  #[test]
  fn test_parse_distinguishes_abstract_and_pdf_links() {
    let xml = r#"
      <feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
          <id>http://arxiv.org/abs/2301.12345</id>
          <published>2023-01-15T10:00:00Z</published>
          <title>Linked Paper</title>
          <summary>Abstract.</summary>
          <author><name>Ada Lovelace</name></author>
          <link rel="alternate" type="text/html" href="http://arxiv.org/abs/2301.12345"/>
          <link rel="related" type="application/pdf" href="http://arxiv.org/pdf/2301.12345"/>
        </entry>
      </feed>
    "#;
    let papers = parse_response(xml).unwrap();
    let paper = &papers[0];
    assert_eq!(paper.abstract_link, "http://arxiv.org/abs/2301.12345");
    assert_eq!(paper.pdf_link.as_deref(), Some("http://arxiv.org/pdf/2301.12345"));
    assert_ne!(paper.abstract_link, paper.pdf_link.clone().unwrap());
  }

  #[test]
  fn test_parse_preserves_entry_order() {
    let xml = r#"
      <feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
          <id>http://arxiv.org/abs/1</id>
          <published>2024-01-01T00:00:00Z</published>
          <title>First</title>
          <summary>a</summary>
        </entry>
        <entry>
          <id>http://arxiv.org/abs/2</id>
          <published>2024-01-02T00:00:00Z</published>
          <title>Second</title>
          <summary>b</summary>
        </entry>
      </feed>
    "#;
    let papers = parse_response(xml).unwrap();
    assert_eq!(
      papers.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
      vec!["First", "Second"]
    );
    assert!(papers[0].authors.is_empty());
  }

  #[test]
  fn test_parse_empty_feed() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>no hits</title></feed>"#;
    assert!(parse_response(xml).unwrap().is_empty());
  }

  #[test]
  fn test_malformed_xml_is_parse_error() {
    let result = parse_response("<feed><entry><title>broken");
    assert!(matches!(result, Err(RetrieverError::Parse(_))));
  }

  #[test]
  fn test_missing_title_is_parse_error() {
    let xml = r#"
      <feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
          <id>http://arxiv.org/abs/3</id>
          <published>2024-01-01T00:00:00Z</published>
          <summary>no title here</summary>
        </entry>
      </feed>
    "#;
    let result = parse_response(xml);
    assert!(matches!(result, Err(RetrieverError::Parse(_))));
  }

  #[test]
  fn test_blank_published_is_parse_error() {
    let xml = r#"
      <feed xmlns="http://www.w3.org/2005/Atom">
        <entry>
          <id>http://arxiv.org/abs/4</id>
          <published>   </published>
          <title>Has Title</title>
          <summary>s</summary>
        </entry>
      </feed>
    "#;
    let result = parse_response(xml);
    assert!(matches!(result, Err(RetrieverError::Parse(_))));
  }
}
