//! Single-pass marker resolver with caching
//!
//! Prompts interleave free text with `{{label}}` markers. Resolution
//! substitutes each marker whose label exists in the tag set and leaves
//! unknown markers verbatim, so a prompt referencing a tag that is not
//! available round-trips unchanged. Templates are tokenized once and the
//! token list is cached behind an `Arc` for zero-copy reuse.

use std::ops::Range;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::tags::TagSet;

/// Token representing a parsed template fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text (stores range in original string)
    Literal(Range<usize>),
    /// Marker reference: {{label}}
    TagRef(String),
}

/// Marker resolver with a tokenization cache
pub struct MarkerResolver {
    cache: DashMap<String, Arc<Vec<Token>>>,
}

impl Default for MarkerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerResolver {
    pub fn new() -> Self {
        Self { cache: DashMap::new() }
    }

    /// Parse a template into tokens (with caching)
    pub fn tokenize(&self, template: &str) -> Arc<Vec<Token>> {
        if let Some(cached) = self.cache.get(template) {
            return Arc::clone(&cached);
        }

        let mut tokens = Vec::new();
        let mut chars = template.char_indices().peekable();
        let mut literal_start = 0;

        while let Some((i, ch)) = chars.next() {
            if ch == '{' && chars.peek().map(|(_, c)| *c) == Some('{') {
                chars.next(); // consume second '{'
                if let Some((label, end)) = parse_marker(&mut chars, i + 2, template) {
                    if i > literal_start {
                        tokens.push(Token::Literal(literal_start..i));
                    }
                    tokens.push(Token::TagRef(label));
                    literal_start = end;
                }
                // On parse failure the braces stay inside the running literal
            }
        }

        if literal_start < template.len() {
            tokens.push(Token::Literal(literal_start..template.len()));
        }

        let tokens = Arc::new(tokens);
        self.cache.insert(template.to_string(), tokens.clone());
        tokens
    }

    /// Substitute markers from `tags`, passing unknown labels through
    /// verbatim. Pure over `(template, tags)`.
    pub fn resolve(&self, template: &str, tags: &TagSet) -> String {
        let tokens = self.tokenize(template);

        let mut result = String::with_capacity(template.len());
        for token in tokens.iter() {
            match token {
                Token::Literal(range) => result.push_str(&template[range.clone()]),
                Token::TagRef(label) => match tags.get(label) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(label);
                        result.push_str("}}");
                    }
                },
            }
        }
        result
    }
}

/// Scan for the closing `}}` and return `(label, end_byte)`.
/// An empty label or a template that ends first is not a marker.
fn parse_marker(
    chars: &mut std::iter::Peekable<std::str::CharIndices>,
    start: usize,
    template: &str,
) -> Option<(String, usize)> {
    while let Some((i, ch)) = chars.peek().copied() {
        if ch == '}' {
            chars.next();
            if chars.peek().map(|(_, c)| *c) == Some('}') {
                chars.next(); // consume second '}'
                let label = &template[start..i];
                if label.is_empty() {
                    return None;
                }
                return Some((label.to_string(), i + 2));
            }
            // Lone '}' stays part of the candidate label
        } else {
            chars.next();
        }
    }
    None
}

/// Shared resolver instance
pub static MARKER_RESOLVER: Lazy<MarkerResolver> = Lazy::new(MarkerResolver::new);

/// Convenience wrapper over the shared resolver
pub fn resolve_markers(template: &str, tags: &TagSet) -> String {
    MARKER_RESOLVER.resolve(template, tags)
}
