//! Style name extraction from class-name strings.
//!
//! Block editors communicate a selected style variant through a reserved
//! class-name convention: a class of the form `is-style-{name}`. This module
//! extracts that variant name so the locator can try a style-qualified
//! template before the plain one.

/// Reserved class-name prefix marking a style variant.
pub const STYLE_CLASS_PREFIX: &str = "is-style-";

/// Extracts the style name from a space-separated class-name string.
///
/// Splits on whitespace and returns the remainder of the first token carrying
/// the [`STYLE_CLASS_PREFIX`]. Later matching tokens are ignored. Returns
/// `None` when no token matches.
///
/// A bare `is-style-` token yields `Some("")`; callers treat an empty
/// remainder as "no style".
///
/// # Example
///
/// ```rust
/// use blockparts::style_name;
///
/// assert_eq!(style_name("foo is-style-rounded alignwide"), Some("rounded"));
/// assert_eq!(style_name("foo bar"), None);
/// ```
pub fn style_name(class_name: &str) -> Option<&str> {
    class_name
        .split_whitespace()
        .find_map(|class| class.strip_prefix(STYLE_CLASS_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_style_token() {
        assert_eq!(style_name("is-style-rounded"), Some("rounded"));
    }

    #[test]
    fn test_style_among_other_classes() {
        assert_eq!(style_name("card is-style-outline wp-block"), Some("outline"));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            style_name("is-style-first other is-style-second"),
            Some("first")
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        assert_eq!(style_name("foo bar baz"), None);
        assert_eq!(style_name(""), None);
    }

    #[test]
    fn test_prefix_must_lead_the_token() {
        // "is-style-" embedded mid-token is not a style class.
        assert_eq!(style_name("not-is-style-x"), None);
    }

    #[test]
    fn test_bare_prefix_yields_empty_remainder() {
        assert_eq!(style_name("is-style-"), Some(""));
    }

    #[test]
    fn test_whitespace_variants() {
        assert_eq!(style_name("  foo\tis-style-wide\n"), Some("wide"));
    }
}
