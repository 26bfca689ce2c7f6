//! Hashtag and mention scanning.
//!
//! Tokens are found once, against the canonical source text, and keep their
//! byte ranges in that text. Displayed text produced by truncation maps its
//! offsets back to the source before tokens are consulted, so duplicate
//! substrings and partially hidden tokens resolve to the right occurrence.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use taglabel_core::logging::targets;

/// `#` followed by letters (any script, with combining marks), digits or `_`.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{M}\p{N}_]+").expect("hashtag pattern"));

/// `@` followed by word characters.
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern"));

/// The kind of a recognized token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `#tag`
    Hashtag,
    /// `@user`
    Mention,
}

/// A token found in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenMatch {
    /// The matched text, including the `#` or `@` sigil.
    pub text: String,
    /// Byte range in the source text.
    pub range: Range<usize>,
    pub kind: TokenKind,
}

impl TokenMatch {
    /// Check whether a source offset falls inside the token.
    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset)
    }

    /// The token text without its sigil.
    pub fn name(&self) -> &str {
        self.text.get(1..).unwrap_or_default()
    }
}

fn scan(pattern: &Regex, text: &str, kind: TokenKind) -> Vec<TokenMatch> {
    pattern
        .find_iter(text)
        .map(|m| TokenMatch {
            text: m.as_str().to_string(),
            range: m.range(),
            kind,
        })
        .collect()
}

/// Find all hashtags in `text`, left to right.
pub fn scan_hashtags(text: &str) -> Vec<TokenMatch> {
    scan(&HASHTAG, text, TokenKind::Hashtag)
}

/// Find all mentions in `text`, left to right.
pub fn scan_mentions(text: &str) -> Vec<TokenMatch> {
    scan(&MENTION, text, TokenKind::Mention)
}

/// Find hashtags and mentions in `text`.
pub fn scan_tokens(text: &str) -> TokenSet {
    TokenSet::scan(text)
}

/// Hashtags and mentions of one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    pub hashtags: Vec<TokenMatch>,
    pub mentions: Vec<TokenMatch>,
}

impl TokenSet {
    /// Scan `text` for both token kinds.
    pub fn scan(text: &str) -> Self {
        let set = Self {
            hashtags: scan_hashtags(text),
            mentions: scan_mentions(text),
        };
        tracing::debug!(
            target: targets::TOKENS,
            hashtags = set.hashtags.len(),
            mentions = set.mentions.len(),
            "scanned tokens"
        );
        set
    }

    /// Mentioned user names without `@`, deduplicated in first-seen order.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for mention in &self.mentions {
            let name = mention.name();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// The first token containing the source `offset`, hashtags first.
    pub fn token_at(&self, offset: usize) -> Option<&TokenMatch> {
        self.hashtags
            .iter()
            .chain(&self.mentions)
            .find(|token| token.contains(offset))
    }

    /// Check if no tokens were found.
    pub fn is_empty(&self) -> bool {
        self.hashtags.is_empty() && self.mentions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[TokenMatch]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_scan_basic() {
        let text = "Hello #world from @alice today";
        let hashtags = scan_hashtags(text);
        let mentions = scan_mentions(text);
        assert_eq!(texts(&hashtags), vec!["#world"]);
        assert_eq!(texts(&mentions), vec!["@alice"]);
        assert_eq!(hashtags[0].range, 6..12);
        assert_eq!(mentions[0].range, 18..24);
        assert_eq!(mentions[0].kind, TokenKind::Mention);
    }

    #[test]
    fn test_scan_empty() {
        assert!(scan_hashtags("").is_empty());
        assert!(scan_mentions("").is_empty());
        assert!(TokenSet::scan("").is_empty());
    }

    #[test]
    fn test_bare_sigils_do_not_match() {
        assert!(scan_hashtags("# not a tag").is_empty());
        assert!(scan_mentions("mail me @ home").is_empty());
    }

    #[test]
    fn test_tokens_stop_at_sigils() {
        assert_eq!(texts(&scan_hashtags("#one#two")), vec!["#one", "#two"]);
        assert_eq!(texts(&scan_mentions("@a@b")), vec!["@a", "@b"]);
        assert_eq!(texts(&scan_hashtags("#tag@user")), vec!["#tag"]);
    }

    #[test]
    fn test_unicode_hashtags() {
        let text = "تجربة #مرحبا_بكم و #café #2024";
        assert_eq!(texts(&scan_hashtags(text)), vec!["#مرحبا_بكم", "#café", "#2024"]);
        // Arabic with harakat stays one token.
        assert_eq!(texts(&scan_hashtags("#عَرَبِي")), vec!["#عَرَبِي"]);
    }

    #[test]
    fn test_duplicates_keep_their_offsets() {
        let tokens = TokenSet::scan("@bob says hi to @bob and @amy");
        assert_eq!(tokens.mentions.len(), 3);
        assert_eq!(tokens.mentions[0].range, 0..4);
        assert_eq!(tokens.mentions[1].range, 16..20);
        assert_eq!(tokens.usernames(), vec!["bob", "amy"]);
    }

    #[test]
    fn test_token_at() {
        let tokens = scan_tokens("see #rust and @ferris");
        assert_eq!(tokens.token_at(5).map(|t| t.text.as_str()), Some("#rust"));
        assert_eq!(tokens.token_at(16).map(|t| t.name()), Some("ferris"));
        assert!(tokens.token_at(10).is_none());
    }
}
