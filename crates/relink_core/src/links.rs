//! Pattern detection for the one link shape this tool is allowed to touch.

/// Domain-and-path prefix of the legacy game links embedded in old
/// descriptions.
pub const LEGACY_LINK_PREFIX: &str = "https://www.roblox.com/games/";

/// Label phrase that marks a description as carrying a game link.
pub const MAP_LINK_LABEL: &str = "رابط الماب";

/// Label prefix written in front of a freshly prepended link.
pub const PREPEND_LABEL: &str = "رابط اللعبة: ";

/// Byte span of a legacy-link match inside the inspected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Finds the first legacy game link in `text`.
///
/// The match is the documented shape only: the exact prefix followed by a
/// non-empty run of non-whitespace characters. Anything that merely
/// resembles the prefix (different scheme, different host, no path tail)
/// is not a match, so unrelated links are never mutated.
pub fn detect_legacy_link(text: &str) -> Option<MatchSpan> {
    let start = text.find(LEGACY_LINK_PREFIX)?;
    let tail = &text[start + LEGACY_LINK_PREFIX.len()..];
    let tail_len = tail
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    if tail_len == 0 {
        // Bare prefix with no game path: not the documented shape.
        return None;
    }
    Some(MatchSpan {
        start,
        end: start + LEGACY_LINK_PREFIX.len() + tail_len,
    })
}

/// Literal substring test for the already-correct target link.
pub fn contains_target_link(text: &str, target: &str) -> bool {
    !target.is_empty() && text.contains(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_link_and_span_covers_exact_shape() {
        let text = "رابط الماب: https://www.roblox.com/games/111/old والمزيد";
        let span = detect_legacy_link(text).unwrap();
        assert_eq!(&text[span.start..span.end], "https://www.roblox.com/games/111/old");
    }

    #[test]
    fn bare_prefix_is_not_a_match() {
        assert_eq!(detect_legacy_link("see https://www.roblox.com/games/ here"), None);
        assert_eq!(detect_legacy_link("https://www.roblox.com/games/"), None);
    }

    #[test]
    fn similar_links_are_not_matched() {
        assert_eq!(detect_legacy_link("http://www.roblox.com/games/1"), None);
        assert_eq!(detect_legacy_link("https://roblox.com/games/1"), None);
        assert_eq!(detect_legacy_link("https://www.roblox.com/users/1"), None);
    }

    #[test]
    fn first_of_several_links_wins() {
        let text = "https://www.roblox.com/games/1 https://www.roblox.com/games/2";
        let span = detect_legacy_link(text).unwrap();
        assert_eq!(&text[span.start..span.end], "https://www.roblox.com/games/1");
    }

    #[test]
    fn target_link_is_a_literal_substring_test() {
        let target = "https://rahumi.com/article/?id=ABC";
        assert!(contains_target_link("انظر https://rahumi.com/article/?id=ABC هنا", target));
        assert!(!contains_target_link("https://rahumi.com/article/?id=XYZ", target));
        assert!(!contains_target_link("anything", ""));
    }
}
