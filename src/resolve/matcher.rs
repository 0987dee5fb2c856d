//! Wildcard pattern compiler and matcher.
//!
//! Caller-supplied patterns use `*` (zero or more characters) and `?`
//! (exactly one character); every other character matches literally, so
//! regex metacharacters have no special meaning. Patterns are compiled into
//! an explicit token sequence and matched with star backtracking rather
//! than going through a regex engine.
//!
//! Matching is always anchored at the start of the subject. End anchoring
//! is selected per operation: listing uses [`Anchor::Start`], single-resource
//! lookups use [`Anchor::Full`].

use serde::{Deserialize, Serialize};

/// Anchoring rule applied when a pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Match a prefix of the subject.
    Start,
    /// Match the entire subject.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Zero or more of any character.
    Star,
    /// Exactly one of any character.
    AnyChar,
    Literal(char),
}

/// A compiled wildcard pattern. Pure value type: compiling never fails and
/// any string, including the empty string, is a valid pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    tokens: Vec<Token>,
    anchor: Anchor,
}

impl WildcardPattern {
    pub fn compile(pattern: &str, anchor: Anchor) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len() + 1);
        for ch in pattern.chars() {
            match ch {
                '*' => {
                    // Runs of stars collapse to one.
                    if tokens.last() != Some(&Token::Star) {
                        tokens.push(Token::Star);
                    }
                }
                '?' => tokens.push(Token::AnyChar),
                other => tokens.push(Token::Literal(other)),
            }
        }

        // Start anchoring is "match any suffix after the pattern", which is
        // exactly a trailing star.
        if anchor == Anchor::Start && tokens.last() != Some(&Token::Star) {
            tokens.push(Token::Star);
        }

        Self { tokens, anchor }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Test the subject against the compiled pattern.
    pub fn matches(&self, subject: &str) -> bool {
        let subject: Vec<char> = subject.chars().collect();
        let tokens = &self.tokens;

        let mut ti = 0;
        let mut si = 0;
        // Most recent star position and the subject index its expansion
        // currently ends at, for backtracking.
        let mut star_ti: Option<usize> = None;
        let mut star_si = 0;

        while si < subject.len() {
            let consumed = match tokens.get(ti) {
                Some(Token::AnyChar) => true,
                Some(Token::Literal(c)) => *c == subject[si],
                _ => false,
            };

            if consumed {
                ti += 1;
                si += 1;
            } else if let Some(Token::Star) = tokens.get(ti) {
                star_ti = Some(ti);
                star_si = si;
                ti += 1;
            } else if let Some(star) = star_ti {
                // Grow the last star's expansion by one character and retry.
                ti = star + 1;
                star_si += 1;
                si = star_si;
            } else {
                return false;
            }
        }

        // Trailing stars match the empty remainder.
        while tokens.get(ti) == Some(&Token::Star) {
            ti += 1;
        }
        ti == tokens.len()
    }
}
