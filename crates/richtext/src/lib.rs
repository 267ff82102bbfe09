//! Inline rich-text tokenizer.
//!
//! Both back-ends render text through [`tokenize`], so a given string always
//! produces the same sequence of styled runs on screen and in print.
//!
//! The markup subset is deliberately small:
//!
//! | Markup | Token |
//! |---|---|
//! | `**x**`, `__x__` | [`InlineKind::Bold`] |
//! | `~~x~~` | [`InlineKind::Strikethrough`] |
//! | `*x*`, `_x_` | [`InlineKind::Italic`] |
//! | `` `x` `` | [`InlineKind::Code`] |
//! | `[text](url)` | [`InlineKind::Link`] |
//!
//! Scanning is single pass and leftmost-first. Markup is not nested: the
//! inside of a matched span is emitted verbatim.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Strikethrough,
}

/// One run of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineToken {
    #[serde(rename = "type")]
    pub kind: InlineKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl InlineToken {
    fn new(kind: InlineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            href: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(InlineKind::Text, content)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(InlineKind::Bold, content)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::new(InlineKind::Italic, content)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::new(InlineKind::Code, content)
    }

    pub fn strikethrough(content: impl Into<String>) -> Self {
        Self::new(InlineKind::Strikethrough, content)
    }

    pub fn link(content: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind: InlineKind::Link,
            content: content.into(),
            href: Some(href.into()),
        }
    }
}

static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.+?)\*\*|__(.+?)__"));
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| compile(r"~~(.+?)~~"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| compile(r"\*([^*\n]+?)\*"));
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| compile(r"_([^_\n]+?)_"));
static CODE: Lazy<Regex> = Lazy::new(|| compile(r"`([^`]+)`"));
static LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]+)\]\(([^)\s]+)\)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("inline markup patterns are valid literals")
}

/// A candidate match: byte span in the scanned text plus the token it yields.
struct Found {
    start: usize,
    end: usize,
    token: InlineToken,
}

fn first_group<'t>(caps: &Captures<'t>) -> &'t str {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str())
        .unwrap_or_default()
}

fn find_simple(re: &Regex, text: &str, make: fn(&str) -> InlineToken) -> Option<Found> {
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    Some(Found {
        start: whole.start(),
        end: whole.end(),
        token: make(first_group(&caps)),
    })
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}

/// `_x_` only counts as emphasis when no word character touches either
/// delimiter from the outside, so `snake_case_name` stays plain text.
fn find_underscore_italic(text: &str) -> Option<Found> {
    let mut from = 0;
    while from < text.len() {
        let caps = ITALIC_UNDERSCORE.captures_at(text, from)?;
        let whole = caps.get(0)?;
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        if !is_word_char(before) && !is_word_char(after) {
            return Some(Found {
                start: whole.start(),
                end: whole.end(),
                token: InlineToken::italic(first_group(&caps)),
            });
        }
        // The opening '_' is one byte, so the next char boundary is right after it.
        from = whole.start() + 1;
    }
    None
}

fn find_link(text: &str) -> Option<Found> {
    let caps = LINK.captures(text)?;
    let whole = caps.get(0)?;
    let label = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let href = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    Some(Found {
        start: whole.start(),
        end: whole.end(),
        token: InlineToken::link(label, href),
    })
}

/// Finds the leftmost match of any pattern. Candidates are gathered in
/// priority order and only a strictly earlier start replaces the current
/// best, so ties go to the pattern listed first.
fn earliest_match(text: &str) -> Option<Found> {
    let candidates = [
        find_simple(&BOLD, text, |s| InlineToken::bold(s)),
        find_simple(&STRIKETHROUGH, text, |s| InlineToken::strikethrough(s)),
        find_simple(&ITALIC_STAR, text, |s| InlineToken::italic(s)),
        find_underscore_italic(text),
        find_simple(&CODE, text, |s| InlineToken::code(s)),
        find_link(text),
    ];

    let mut best: Option<Found> = None;
    for found in candidates.into_iter().flatten() {
        match &best {
            Some(current) if current.start <= found.start => {}
            _ => best = Some(found),
        }
    }
    best
}

/// Splits `text` into a flat list of inline tokens.
///
/// ```
/// use quire_richtext::{tokenize, InlineToken};
///
/// assert_eq!(
///     tokenize("**a** and *b*"),
///     vec![
///         InlineToken::bold("a"),
///         InlineToken::text(" and "),
///         InlineToken::italic("b"),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<InlineToken> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(found) = earliest_match(rest) else {
            tokens.push(InlineToken::text(rest));
            break;
        };
        if found.start > 0 {
            tokens.push(InlineToken::text(&rest[..found.start]));
        }
        tokens.push(found.token);
        rest = &rest[found.end..];
    }

    tokens
}

/// The visible text of a token list with all markup removed.
pub fn plain_text(tokens: &[InlineToken]) -> String {
    tokens.iter().map(|t| t.content.as_str()).collect()
}
