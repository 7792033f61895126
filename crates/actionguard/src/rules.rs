use std::sync::LazyLock;

use ahash::AHashSet;
use regex::Regex;

/// Key substring flagging prototype/constructor chain traversal attempts.
pub(crate) const CONSTRUCTOR_CHAIN: &str = "constructor:constructor";

/// The process-wide rule set, shared read-only by every scan.
pub(crate) static RULES: LazyLock<RuleSet> = LazyLock::new(RuleSet::new);

/// Matching strategy for a single token rule.
///
/// Literal substring matching covers most rules; a full regex engine is only
/// pulled in for the two patterns a literal scan cannot express.
#[derive(Debug)]
enum TokenMatcher {
    /// Case-insensitive literal substring; stored lowercase and matched
    /// against the pre-lowered text.
    Literal(&'static str),
    Pattern(Regex),
}

/// A single suspicious-token detector: a human-readable label plus an
/// independent predicate over string content.
#[derive(Debug)]
pub(crate) struct TokenRule {
    label: &'static str,
    matcher: TokenMatcher,
}

impl TokenRule {
    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    /// `lowered` must be the ASCII-lowercased form of `text`.
    pub(crate) fn is_match(&self, text: &str, lowered: &str) -> bool {
        match &self.matcher {
            TokenMatcher::Literal(needle) => lowered.contains(needle),
            TokenMatcher::Pattern(pattern) => pattern.is_match(text),
        }
    }
}

/// The fixed set of deserialization-attack indicators.
///
/// Constructed once at process start ([`RULES`]) and never mutated; rules are
/// independent of one another and are all evaluated against every string
/// node, so a single string can match several of them.
#[derive(Debug)]
pub struct RuleSet {
    tokens: Vec<TokenRule>,
    blocked_keys: AHashSet<&'static str>,
}

impl RuleSet {
    /// Build the fixed rule set.
    ///
    /// # Panics
    ///
    /// Only if one of the two built-in regular expressions fails to compile,
    /// which a unit test rules out.
    pub fn new() -> RuleSet {
        let tokens = vec![
            TokenRule {
                label: "constructor constructor chain",
                matcher: TokenMatcher::Literal(CONSTRUCTOR_CHAIN),
            },
            TokenRule {
                label: "flight function token",
                // Serialized-function/promise reference tags; uppercase by
                // construction, so no `(?i)`.
                matcher: TokenMatcher::Pattern(
                    Regex::new(r"\$B\d+").expect("valid built-in pattern"),
                ),
            },
            TokenRule {
                label: "prototype mutation token",
                matcher: TokenMatcher::Literal("__proto__"),
            },
            TokenRule {
                label: "internal response token",
                matcher: TokenMatcher::Literal("_response"),
            },
            TokenRule {
                label: "prefix code slot token",
                matcher: TokenMatcher::Literal("_prefix"),
            },
            TokenRule {
                label: "Function constructor text",
                matcher: TokenMatcher::Pattern(
                    Regex::new(r"(?i)\bFunction\s*\(").expect("valid built-in pattern"),
                ),
            },
        ];
        RuleSet {
            tokens,
            blocked_keys: AHashSet::from_iter(["__proto__", "prototype"]),
        }
    }

    pub(crate) fn tokens(&self) -> &[TokenRule] {
        &self.tokens
    }

    /// Keys that are rejected outright, regardless of their value.
    pub(crate) fn is_blocked_key(&self, key: &str) -> bool {
        self.blocked_keys.contains(key)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::new()
    }
}

/// Keys that carry framework transport objects when their value is a
/// container.
pub(crate) fn is_transport_key(key: &str) -> bool {
    matches!(key, "_response" | "_formData")
}
