//! Filename formatting for downloaded papers.
//!
//! Paper titles make poor filenames as-is: mixed case, runs of whitespace,
//! and occasionally characters like `/` that the filesystem treats as path
//! separators. [`format_title`] turns a title into a safe, bounded filename
//! stem.

/// Formats a paper title into a filesystem-friendly filename stem.
///
/// Lowercases the title, collapses whitespace runs into single underscores,
/// drops path separators, and truncates at a word boundary so the result
/// never exceeds `max_length` (default 50).
///
/// # Examples
///
/// ```
/// use retriever::format;
///
/// assert_eq!(format::format_title("Attention Is All You Need", None), "attention_is_all_you_need");
/// assert_eq!(format::format_title("This Is A Very Long Title Indeed", Some(20)), "this_is_a_very_long");
/// ```
pub fn format_title(title: &str, max_length: Option<usize>) -> String {
  let max_length = max_length.unwrap_or(50);
  let mut stem = String::new();

  for word in title.split_whitespace() {
    let word: String =
      word.chars().filter(|c| *c != '/' && *c != '\\').flat_map(char::to_lowercase).collect();
    if word.is_empty() {
      continue;
    }
    let needed = word.len() + if stem.is_empty() { 0 } else { 1 };
    if stem.len() + needed > max_length {
      break;
    }
    if !stem.is_empty() {
      stem.push('_');
    }
    stem.push_str(&word);
  }

  stem
}
