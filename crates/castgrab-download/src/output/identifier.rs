use regex::Regex;
use std::sync::LazyLock;

/// URL identifier patterns, most specific first:
/// a numeric segment after `/movie/`, a trailing numeric segment
/// (optionally followed by a query), a trailing ASCII word/hyphen segment.
static ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [r"/movie/([0-9]+)", r"/([0-9]+)(?:\?|$)", r"/([A-Za-z0-9_-]+)$"]
        .map(|pattern| Regex::new(pattern).expect("identifier pattern is valid"))
});

/// Extract the stream identifier used to recognize output files.
pub fn extract_identifier(url: &str) -> Option<&str> {
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url)?.get(1))
        .map(|m| m.as_str())
}

/// Whether `token` occurs in `haystack` without an ASCII letter or digit
/// directly on either side.
///
/// `20240101-12345.ts` contains `12345` as a token, `9123456.ts` does not.
pub fn contains_token(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    haystack.match_indices(token).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + token.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_segment() {
        assert_eq!(extract_identifier("https://site/movie/98765"), Some("98765"));
        assert_eq!(
            extract_identifier("https://twitcasting.tv/someone/movie/98765/extra"),
            Some("98765")
        );
    }

    #[test]
    fn test_trailing_numeric_segment() {
        assert_eq!(extract_identifier("https://site/55555"), Some("55555"));
        assert_eq!(extract_identifier("https://site/55555?t=10"), Some("55555"));
    }

    #[test]
    fn test_trailing_word_segment() {
        assert_eq!(extract_identifier("https://site/abc-def"), Some("abc-def"));
        assert_eq!(extract_identifier("https://twitcasting.tv/c:someone"), None);
        assert_eq!(extract_identifier("https://twitcasting.tv/some_one"), Some("some_one"));
    }

    #[test]
    fn test_non_ascii_segment_has_no_identifier() {
        assert_eq!(extract_identifier("https://site/café"), None);
        assert_eq!(extract_identifier("https://site/日本"), None);
        assert_eq!(extract_identifier("https://site/movie/١٢٣"), None);
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(extract_identifier("https://site/abc/"), None);
        assert_eq!(extract_identifier("not a url"), None);
    }

    #[test]
    fn test_contains_token_boundaries() {
        assert!(contains_token("20240101-12345.ts", "12345"));
        assert!(contains_token("12345", "12345"));
        assert!(contains_token("someone_12345.mp4", "12345"));
        assert!(!contains_token("9123456.ts", "12345"));
        assert!(!contains_token("20240112345.ts", "12345"));
        assert!(contains_token("20240112345-12345.ts", "12345"));
        assert!(contains_token("rec abc-def.ts", "abc-def"));
        assert!(!contains_token("anything", ""));
    }
}
