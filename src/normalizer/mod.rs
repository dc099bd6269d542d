//! Version normalizer: base-grammar tokens to the unified modern grammar.
//!
//! One left-to-right pass. Each input token is offered to the rule table
//! in [`rules`]; the first rule whose trigger set contains the token's
//! kind and whose predicate fires either retypes the token or merges it
//! with the tokens that follow. The pass keeps a single frame stack of
//! open parentheses, brackets, braces and attributes so rules can ask
//! what construct encloses the current token.

mod rules;
mod types;

use rustc_hash::FxHashMap;

use crate::config::Config;
use crate::lookup::{curly_owner, paren_owner, prev_significant};
use crate::token::{Token, TokenKind};

pub use rules::rule_names;

/// What kind of delimiter opened a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Root,
    Paren,
    TypeParen,
    Bracket,
    Curly,
    Attribute,
}

/// One open delimiter seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub kind: FrameKind,
    pub opener: usize,
    /// Kind of the construct owning the delimiter.
    pub owner: Option<TokenKind>,
    /// Unmatched `?` ternaries inside this frame.
    pub ternaries: usize,
}

impl Frame {
    const ROOT: Self = Self {
        kind: FrameKind::Root,
        opener: 0,
        owner: None,
        ternaries: 0,
    };
}

/// A closed parenthesis or attribute region, keyed by its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Closed {
    pub opener: usize,
    pub owner: Option<TokenKind>,
}

/// Read-only view handed to each rule.
pub(crate) struct Context<'n> {
    /// Tokens already normalized, in final positions.
    pub out: &'n [Token],
    /// The raw input; `input[at]` is the token under consideration.
    pub input: &'n [Token],
    pub at: usize,
    frames: &'n [Frame],
    closed: &'n FxHashMap<usize, Closed>,
}

impl Context<'_> {
    pub fn current(&self) -> &Token {
        &self.input[self.at]
    }

    /// Innermost frame.
    pub fn top(&self) -> &Frame {
        self.frames.last().unwrap_or(&Frame::ROOT)
    }

    /// Innermost frame that is not a type parenthesis.
    pub fn enclosing(&self) -> &Frame {
        self.frames
            .iter()
            .rev()
            .find(|f| f.kind != FrameKind::TypeParen)
            .unwrap_or(&Frame::ROOT)
    }

    /// Previous significant token in the normalized output.
    pub fn prev(&self) -> Option<usize> {
        prev_significant(self.out, self.out.len())
    }

    pub fn prev_kind(&self) -> Option<TokenKind> {
        self.prev().map(|p| self.out[p].kind)
    }

    /// Next significant token in the raw input.
    pub fn next(&self) -> Option<usize> {
        crate::lookup::next_significant(self.input, self.at)
    }

    pub fn next_kind(&self) -> Option<TokenKind> {
        self.next().map(|n| self.input[n].kind)
    }

    /// Details of the parenthesis or attribute closed at output `closer`.
    pub fn closed(&self, closer: usize) -> Option<&Closed> {
        self.closed.get(&closer)
    }
}

/// Normalize a base-grammar stream. Applying it twice equals applying
/// it once.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn normalize(tokens: Vec<Token>, config: &Config) -> Vec<Token> {
    let mut pass = Normalizer {
        input: tokens,
        out: Vec::new(),
        frames: vec![Frame::ROOT],
        closed: FxHashMap::default(),
        merges: 0,
        retypes: 0,
    };
    pass.run(config);
    tracing::debug!(
        tokens = pass.out.len(),
        merges = pass.merges,
        retypes = pass.retypes,
        "normalized"
    );
    pass.out
}

struct Normalizer {
    input: Vec<Token>,
    out: Vec<Token>,
    frames: Vec<Frame>,
    closed: FxHashMap<usize, Closed>,
    merges: usize,
    retypes: usize,
}

impl Normalizer {
    fn run(&mut self, config: &Config) {
        self.out.reserve(self.input.len());
        let mut at = 0;
        while at < self.input.len() {
            let rewrite = {
                let ctx = Context {
                    out: &self.out,
                    input: &self.input,
                    at,
                    frames: &self.frames,
                    closed: &self.closed,
                };
                rules::apply(&ctx, config)
            };

            let mut token = std::mem::take(&mut self.input[at]);
            at += 1;
            match rewrite {
                Some(rules::Rewrite::Retype(kind)) => {
                    token.kind = kind;
                    self.retypes += 1;
                }
                Some(rules::Rewrite::Merge { count, kind }) => {
                    let parts: Vec<Token> = self.input[at..at + count - 1]
                        .iter_mut()
                        .map(std::mem::take)
                        .collect();
                    merge_into(&mut token, &parts);
                    token.kind = kind;
                    at += count - 1;
                    self.merges += 1;
                }
                None => {}
            }

            token.position = self.out.len();
            self.out.push(token);
            self.track(self.out.len() - 1);
        }
    }

    /// Update the frame stack for the token just pushed at `idx`.
    fn track(&mut self, idx: usize) {
        let kind = self.out[idx].kind;
        let open = |kind, owner| Frame {
            kind,
            opener: idx,
            owner,
            ternaries: 0,
        };
        match kind {
            TokenKind::OpenParenthesis => {
                let owner = paren_owner(&self.out, idx).map(|o| self.out[o].kind);
                self.frames.push(open(FrameKind::Paren, owner));
            }
            TokenKind::TypeOpenParenthesis => self.frames.push(open(FrameKind::TypeParen, None)),
            TokenKind::OpenSquareBracket | TokenKind::OpenShortArray => {
                self.frames.push(open(FrameKind::Bracket, None));
            }
            TokenKind::Attribute => self.frames.push(open(FrameKind::Attribute, None)),
            TokenKind::OpenCurlyBracket => {
                let owner = curly_owner(&self.out, idx, |p| {
                    self.closed.get(&p).and_then(|c| c.owner)
                });
                self.frames.push(open(FrameKind::Curly, owner));
            }
            TokenKind::Semicolon => {
                if let Some(top) = self.frames.last_mut() {
                    top.ternaries = 0;
                }
            }
            TokenKind::InlineThen => {
                if let Some(top) = self.frames.last_mut() {
                    top.ternaries += 1;
                }
            }
            TokenKind::InlineElse => {
                if let Some(top) = self.frames.last_mut() {
                    top.ternaries = top.ternaries.saturating_sub(1);
                }
            }
            TokenKind::CloseParenthesis | TokenKind::TypeCloseParenthesis => {
                self.close(idx, &[FrameKind::Paren, FrameKind::TypeParen]);
            }
            TokenKind::CloseSquareBracket | TokenKind::CloseShortArray => {
                self.close(idx, &[FrameKind::Bracket]);
            }
            TokenKind::AttributeEnd => self.close(idx, &[FrameKind::Attribute]),
            TokenKind::CloseCurlyBracket => self.close(idx, &[FrameKind::Curly]),
            _ => {}
        }
    }

    /// Pop back to the innermost frame of one of `kinds`. Stray closers
    /// leave the stack untouched.
    fn close(&mut self, idx: usize, kinds: &[FrameKind]) {
        let Some(depth) = self.frames.iter().rposition(|f| kinds.contains(&f.kind)) else {
            return;
        };
        let frame = self.frames[depth];
        self.frames.truncate(depth);
        self.closed.insert(
            idx,
            Closed {
                opener: frame.opener,
                owner: frame.owner,
            },
        );
    }
}

/// Fold `parts` into `token`, keeping the first token's location.
fn merge_into(token: &mut Token, parts: &[Token]) {
    let tabbed = token.orig_text.is_some() || parts.iter().any(|p| p.orig_text.is_some());
    if tabbed {
        let mut orig = token.source_text().to_string();
        for part in parts {
            orig.push_str(part.source_text());
        }
        token.orig_text = Some(orig);
    }
    for part in parts {
        token.text.push_str(&part.text);
        token.length += part.length;
    }
}
