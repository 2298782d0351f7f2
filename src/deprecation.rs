use std::sync::LazyLock;

use regex::Regex;

/// Marker searched for (case-insensitively) in descriptions
const MARKER: &str = "deprecated";

static DEPRECATION_NOTE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i:deprecated in).*|DEPRECATED.*|Deprecated:.*").expect("deprecation note pattern is valid")
});

/// The description mentions a deprecation anywhere, in any case
pub fn is_deprecated(description: &str) -> bool {
  description.to_lowercase().contains(MARKER)
}

/// Replace every line break (`\n` or `\r\n`) with a single space
pub fn remove_newlines(s: &str) -> String {
  s.replace("\r\n", " ").replace('\n', " ")
}

/// Pull the deprecation note out of a description
///
/// Returns the text from the first `deprecated in`, `DEPRECATED` or `Deprecated:`
/// marker up to the end of that line, or the description unchanged when none is found.
pub fn extract_deprecation(description: &str) -> String {
  match DEPRECATION_NOTE.find(description) {
    Some(note) => note.as_str().to_owned(),
    None => description.to_owned(),
  }
}
