//! Project-specific utilities live here.

/// Derives a URL-safe slug from a title.
///
/// Lowercases the input and joins alphanumeric runs with single hyphens;
/// everything else is dropped, so no leading or trailing hyphens remain.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_words_with_hyphens() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn collapses_runs_of_separators() {
        assert_eq!(slugify("  Rust --- 2026  "), "rust-2026");
    }

    #[test]
    fn lowercases_everything() {
        assert_eq!(slugify("MixedCASE Title"), "mixedcase-title");
    }

    #[test]
    fn drops_leading_and_trailing_punctuation() {
        assert_eq!(slugify("!!important!!"), "important");
    }

    #[test]
    fn empty_and_symbol_only_titles_produce_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("@#$%"), "");
    }
}
