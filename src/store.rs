//! The finished token array and its query API.

use std::ops::Index;

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::token::{EMPTY, KindSet, Token, TokenKind};

/// Immutable, annotated token stream for one file.
///
/// Built once per tokenization run. Callers that need a modified stream
/// go through [`crate::overlay::Overlay`] and get a fresh store back.
#[derive(Debug, Clone)]
pub struct TokenStore {
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    config: Config,
}

impl TokenStore {
    /// Assemble a store, attaching each diagnostic to the token that
    /// contains its byte offset.
    #[must_use]
    pub fn new(tokens: Vec<Token>, mut diagnostics: Vec<Diagnostic>, config: Config) -> Self {
        for diagnostic in &mut diagnostics {
            let after = tokens.partition_point(|t| t.offset <= diagnostic.offset);
            diagnostic.position = after.saturating_sub(1);
        }
        diagnostics.sort_by_key(|d| d.offset);
        Self {
            tokens,
            diagnostics,
            config,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Recoverable anomalies, ordered by offset.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The source text, reassembled from the tokens' original text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.tokens.iter().map(Token::source_text).collect()
    }

    /// Start a search for tokens of the given kinds.
    pub fn search(&self, kinds: impl Into<KindSet>) -> Search<'_> {
        Search {
            store: self,
            kinds: kinds.into(),
            exclude: false,
            text: None,
            case_sensitive: true,
            skip: KindSet::NONE,
            local: false,
            end: None,
        }
    }

    /// First token at or after `start` whose kind is in `kinds`.
    #[must_use]
    pub fn find_next(&self, kinds: impl Into<KindSet>, start: usize) -> Option<usize> {
        self.search(kinds).next(start)
    }

    /// Last token at or before `start` whose kind is in `kinds`.
    #[must_use]
    pub fn find_previous(&self, kinds: impl Into<KindSet>, start: usize) -> Option<usize> {
        self.search(kinds).previous(start)
    }

    /// First token at or after `start` of one of `kinds` with exactly `text`.
    #[must_use]
    pub fn find_next_text(
        &self,
        kinds: impl Into<KindSet>,
        text: &str,
        start: usize,
    ) -> Option<usize> {
        self.search(kinds).text(text).next(start)
    }

    /// First token at or after `start` that is not whitespace or a comment.
    #[must_use]
    pub fn next_significant(&self, start: usize) -> Option<usize> {
        self.search(EMPTY).exclude().next(start)
    }

    /// Last token at or before `start` that is not whitespace or a comment.
    #[must_use]
    pub fn previous_significant(&self, start: usize) -> Option<usize> {
        self.search(EMPTY).exclude().previous(start)
    }

    #[must_use]
    pub fn scope_owner(&self, position: usize) -> Option<usize> {
        self.get(position)?.scope.map(|s| s.owner)
    }

    #[must_use]
    pub fn scope_opener(&self, position: usize) -> Option<usize> {
        self.get(position)?.scope.map(|s| s.opener)
    }

    #[must_use]
    pub fn scope_closer(&self, position: usize) -> Option<usize> {
        self.get(position)?.scope.and_then(|s| s.closer)
    }

    #[must_use]
    pub fn parenthesis_owner(&self, position: usize) -> Option<usize> {
        self.get(position)?.parenthesis.and_then(|p| p.owner)
    }

    #[must_use]
    pub fn parenthesis_opener(&self, position: usize) -> Option<usize> {
        self.get(position)?.parenthesis.map(|p| p.opener)
    }

    #[must_use]
    pub fn parenthesis_closer(&self, position: usize) -> Option<usize> {
        self.get(position)?.parenthesis.and_then(|p| p.closer)
    }

    #[must_use]
    pub fn bracket_opener(&self, position: usize) -> Option<usize> {
        self.get(position)?.bracket.map(|b| b.opener)
    }

    #[must_use]
    pub fn bracket_closer(&self, position: usize) -> Option<usize> {
        self.get(position)?.bracket.and_then(|b| b.closer)
    }

    #[must_use]
    pub fn attribute_opener(&self, position: usize) -> Option<usize> {
        self.get(position)?.attribute.map(|a| a.opener)
    }

    #[must_use]
    pub fn attribute_closer(&self, position: usize) -> Option<usize> {
        self.get(position)?.attribute.and_then(|a| a.closer)
    }

    /// Scope owners enclosing `position`, outermost first.
    #[must_use]
    pub fn conditions(&self, position: usize) -> &[(usize, TokenKind)] {
        self.get(position)
            .map_or(&[][..], |t| t.enclosing_scopes.as_slice())
    }

    /// Innermost enclosing owner of `kind`.
    #[must_use]
    pub fn condition(&self, position: usize, kind: TokenKind) -> Option<usize> {
        self.conditions(position)
            .iter()
            .rev()
            .find(|(_, k)| *k == kind)
            .map(|(owner, _)| *owner)
    }

    /// Whether any enclosing owner has one of `kinds`.
    #[must_use]
    pub fn has_condition(&self, position: usize, kinds: impl Into<KindSet>) -> bool {
        let kinds = kinds.into();
        self.conditions(position)
            .iter()
            .any(|(_, k)| kinds.contains(*k))
    }
}

impl Index<usize> for TokenStore {
    type Output = Token;

    fn index(&self, position: usize) -> &Token {
        &self.tokens[position]
    }
}

impl<'s> IntoIterator for &'s TokenStore {
    type Item = &'s Token;
    type IntoIter = std::slice::Iter<'s, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// A configurable forward or backward token search.
///
/// ```
/// use phptokens::{Config, TokenKind, tokenize};
///
/// let store = tokenize("<?php foo(); Foo();", &Config::new());
/// let second = store
///     .search(TokenKind::String)
///     .text("FOO")
///     .case_insensitive()
///     .next(3);
/// assert_eq!(second, Some(6));
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Search<'s> {
    store: &'s TokenStore,
    kinds: KindSet,
    exclude: bool,
    text: Option<&'s str>,
    case_sensitive: bool,
    skip: KindSet,
    local: bool,
    end: Option<usize>,
}

impl<'s> Search<'s> {
    /// Match tokens whose kind is *not* in the set.
    pub const fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Also require the token text to equal `text`.
    pub const fn text(mut self, text: &'s str) -> Self {
        self.text = Some(text);
        self
    }

    /// Compare text ignoring ASCII case.
    pub const fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Never return tokens of these kinds.
    pub fn skip(mut self, kinds: impl Into<KindSet>) -> Self {
        self.skip = kinds.into();
        self
    }

    /// Stop at the end of the current statement.
    pub const fn local(mut self) -> Self {
        self.local = true;
        self
    }

    /// Bound the search: exclusive end going forward, inclusive lower
    /// bound going backward.
    pub const fn end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    fn matches(&self, token: &Token) -> bool {
        if self.skip.contains(token.kind) {
            return false;
        }
        if self.kinds.contains(token.kind) == self.exclude {
            return false;
        }
        match self.text {
            None => true,
            Some(text) if self.case_sensitive => token.text == text,
            Some(text) => token.text.eq_ignore_ascii_case(text),
        }
    }

    /// First match in `[start, end)`.
    #[must_use]
    pub fn next(&self, start: usize) -> Option<usize> {
        let tokens = self.store.tokens();
        let end = self.end.unwrap_or(tokens.len()).min(tokens.len());
        for (i, token) in tokens.iter().enumerate().take(end).skip(start) {
            if self.matches(token) {
                return Some(i);
            }
            if self.local && matches!(token.kind, TokenKind::Semicolon | TokenKind::CloseTag) {
                return None;
            }
        }
        None
    }

    /// Last match in `[end, start]`.
    #[must_use]
    pub fn previous(&self, start: usize) -> Option<usize> {
        let tokens = self.store.tokens();
        if tokens.is_empty() {
            return None;
        }
        let start = start.min(tokens.len() - 1);
        let end = self.end.unwrap_or(0);
        if end > start {
            return None;
        }
        for i in (end..=start).rev() {
            let token = &tokens[i];
            if self.matches(token) {
                return Some(i);
            }
            if self.local
                && i != start
                && matches!(token.kind, TokenKind::Semicolon | TokenKind::OpenTag)
            {
                return None;
            }
        }
        None
    }
}
