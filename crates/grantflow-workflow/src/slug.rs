use unicode_normalization::UnicodeNormalization;

/// Turn a display label into the slug used as an HTML id and action key.
///
/// Decomposes the label (NFKD) and drops whatever is left outside ASCII, so
/// accented letters keep their base letter. Then lowercases, drops everything
/// that is not a letter, digit, underscore, hyphen or whitespace, collapses runs
/// of hyphens and whitespace into a single hyphen and trims leading and
/// trailing hyphens and underscores.
///
/// ```
/// use grantflow_workflow::slugify;
///
/// assert_eq!(slugify("Screening (revert)"), "screening-revert");
/// assert_eq!(slugify("Open AC review"), "open-ac-review");
/// assert_eq!(slugify("Révision"), "revision");
/// ```
pub fn slugify(value: &str) -> String {
  let mut slug = String::with_capacity(value.len());
  let mut separator = false;

  for ch in value.nfkd().filter(char::is_ascii) {
    if ch == '-' || ch.is_whitespace() {
      separator = true;
    } else if ch.is_ascii_alphanumeric() || ch == '_' {
      if separator && !slug.is_empty() {
        slug.push('-');
      }
      separator = false;
      slug.push(ch.to_ascii_lowercase());
    }
  }

  slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
