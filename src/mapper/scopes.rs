//! Scope resolution.
//!
//! Every scope owner is resolved to an opener and a closer. Brace bodies
//! use the pairing from [`super::pairs`]; alternative syntax runs from the
//! `:` to its `end*` keyword; arrow functions, `case` bodies and braceless
//! control bodies get synthetic bounds found by walking forward over
//! already-paired groups. Results are memoized, and nested lookups share
//! the cache.

use rustc_hash::FxHashMap;

use crate::lookup::{curly_owner, enclosing_curly, next_significant};
use crate::token::{FUNCTION_LIKE, KindSet, OO_SCOPES, SCOPE_OWNERS, Token, TokenKind as K};

/// Recursion limit for nested lookups. Deeper constructs resolve to no
/// scope instead of exhausting the stack.
const MAX_DEPTH: usize = 256;

/// Statements that may nest inside another construct's body.
const CONTROL: KindSet = KindSet::of(&[
    K::If,
    K::For,
    K::Foreach,
    K::While,
    K::Do,
    K::Switch,
    K::Try,
    K::Declare,
]);

/// Owners whose body may be braced, alternative-syntax or a single statement.
const CONTROL_BODIES: KindSet = KindSet::of(&[
    K::If,
    K::Elseif,
    K::Else,
    K::For,
    K::Foreach,
    K::While,
    K::Do,
    K::Switch,
    K::Declare,
]);

/// Owners that cannot form a header without their parenthesis group.
const NEEDS_PARENTHESIS: KindSet = KindSet::of(&[
    K::If,
    K::Elseif,
    K::For,
    K::Foreach,
    K::While,
    K::Switch,
    K::Declare,
    K::Catch,
    K::Function,
    K::Closure,
    K::Fn,
    K::Match,
]);

const ALT_ENDINGS: KindSet = KindSet::of(&[
    K::Endif,
    K::Endfor,
    K::Endforeach,
    K::Endwhile,
    K::Endswitch,
    K::Enddeclare,
]);

/// A resolved scope body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Scope {
    pub opener: usize,
    pub closer: Option<usize>,
    /// Bounds found by walking forward rather than by a matched pair.
    /// Synthetic closers may be shared between scopes.
    pub synthetic: bool,
}

/// Resolve every scope owner in `tokens`, in ascending owner order.
pub(super) fn resolve_all(tokens: &[Token]) -> Vec<(usize, Scope)> {
    let mut resolver = Resolver {
        tokens,
        memo: FxHashMap::default(),
        depth: 0,
    };
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| SCOPE_OWNERS.contains(t.kind))
        .filter_map(|(i, _)| resolver.resolve(i).map(|scope| (i, scope)))
        .collect()
}

struct Resolver<'t> {
    tokens: &'t [Token],
    memo: FxHashMap<usize, Option<Scope>>,
    depth: usize,
}

impl Resolver<'_> {
    fn resolve(&mut self, owner: usize) -> Option<Scope> {
        if let Some(&scope) = self.memo.get(&owner) {
            return scope;
        }
        if self.depth >= MAX_DEPTH {
            tracing::debug!(owner, "scope nesting too deep, leaving owner unresolved");
            return None;
        }
        self.depth += 1;
        let scope = match self.tokens[owner].kind {
            K::StartHeredoc | K::StartNowdoc => Some(self.heredoc(owner)),
            K::Fn => self.arrow_function(owner),
            K::Case | K::Default => self.case(owner),
            K::Use => self.trait_use(owner),
            _ => self.block(owner),
        };
        self.depth -= 1;
        self.memo.insert(owner, scope);
        scope
    }

    /// Closer of the group opened at `i`. `None` when `i` opens nothing,
    /// `Some(None)` when the group never closes.
    fn group_end(&self, i: usize) -> Option<Option<usize>> {
        let token = &self.tokens[i];
        match token.kind {
            K::OpenParenthesis | K::TypeOpenParenthesis => {
                Some(token.parenthesis.and_then(|p| p.closer))
            }
            K::OpenSquareBracket | K::OpenShortArray | K::OpenCurlyBracket => {
                Some(token.bracket.and_then(|b| b.closer))
            }
            K::Attribute => Some(token.attribute.and_then(|a| a.closer)),
            _ => None,
        }
    }

    fn kind_after(&self, i: usize) -> Option<(usize, K)> {
        next_significant(self.tokens, i).map(|n| (n, self.tokens[n].kind))
    }

    fn heredoc(&self, owner: usize) -> Scope {
        let body = self.tokens[owner + 1..]
            .iter()
            .take_while(|t| matches!(t.kind, K::Heredoc | K::Nowdoc))
            .count();
        let end = owner + 1 + body;
        let closer = self
            .tokens
            .get(end)
            .is_some_and(|t| matches!(t.kind, K::EndHeredoc | K::EndNowdoc))
            .then_some(end);
        Scope {
            opener: owner,
            closer,
            synthetic: false,
        }
    }

    /// The last token of the construct's header: its parenthesis closer,
    /// or the keyword itself.
    fn header_end(&self, owner: usize) -> Option<usize> {
        match self.tokens[owner].parenthesis {
            Some(p) if p.owner == Some(owner) => p.closer,
            _ if NEEDS_PARENTHESIS.contains(self.tokens[owner].kind) => None,
            _ => Some(owner),
        }
    }

    fn arrow_function(&mut self, owner: usize) -> Option<Scope> {
        let mut i = self.header_end(owner)?;
        let arrow = loop {
            i += 1;
            match self.tokens.get(i)?.kind {
                K::FnArrow => break i,
                K::OpenCurlyBracket | K::CloseCurlyBracket | K::Semicolon => return None,
                _ => {}
            }
        };
        Some(Scope {
            opener: arrow,
            closer: self.arrow_end(arrow),
            synthetic: true,
        })
    }

    /// The token ending an arrow function's expression body. Nested
    /// closures and arrow functions are stepped over whole, so their
    /// return-type colons never end the outer body.
    fn arrow_end(&mut self, arrow: usize) -> Option<usize> {
        let mut ternaries = 0_usize;
        let mut i = arrow + 1;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                K::InlineThen => ternaries += 1,
                K::InlineElse if ternaries > 0 => ternaries -= 1,
                K::InlineElse
                | K::Semicolon
                | K::Comma
                | K::Colon
                | K::CloseParenthesis
                | K::CloseSquareBracket
                | K::CloseShortArray
                | K::CloseCurlyBracket
                | K::AttributeEnd
                | K::CloseTag => return Some(i),
                kind if FUNCTION_LIKE.contains(kind) => {
                    if let Some(scope) = self.resolve(i) {
                        i = scope.closer?;
                        // A nested arrow function shares this closer.
                        if scope.synthetic {
                            continue;
                        }
                    }
                }
                _ => {
                    if let Some(end) = self.group_end(i) {
                        i = end?;
                    }
                }
            }
            i += 1;
        }
        None
    }

    fn case(&mut self, owner: usize) -> Option<Scope> {
        let mut i = owner + 1;
        let opener = loop {
            match self.tokens.get(i)?.kind {
                K::Colon | K::Semicolon => break i,
                K::CloseCurlyBracket | K::CloseTag => return None,
                _ => {
                    if let Some(end) = self.group_end(i) {
                        i = end?;
                    }
                }
            }
            i += 1;
        };

        let mut i = opener + 1;
        let closer = loop {
            let Some(token) = self.tokens.get(i) else {
                break None;
            };
            match token.kind {
                K::Break
                | K::Continue
                | K::Return
                | K::Throw
                | K::Exit
                | K::Case
                | K::Default
                | K::Endswitch
                | K::CloseCurlyBracket => break Some(i),
                K::CloseParenthesis | K::CloseSquareBracket | K::CloseShortArray => break None,
                kind if CONTROL.contains(kind) => i = self.construct_end(i).unwrap_or(i),
                _ => match self.group_end(i) {
                    Some(Some(end)) => i = end,
                    Some(None) => break None,
                    None => {}
                },
            }
            i += 1;
        };
        Some(Scope {
            opener,
            closer,
            synthetic: true,
        })
    }

    /// `use` inside a class-like body with a conflict-resolution block.
    fn trait_use(&self, owner: usize) -> Option<Scope> {
        let tokens = self.tokens;
        let open = enclosing_curly(tokens, owner)?;
        let owner_kind = curly_owner(tokens, open, |p| {
            tokens[p].parenthesis.and_then(|l| l.owner).map(|o| tokens[o].kind)
        })?;
        if !OO_SCOPES.contains(owner_kind) {
            return None;
        }
        let mut i = owner;
        loop {
            i += 1;
            match tokens.get(i)?.kind {
                K::OpenCurlyBracket => {
                    return Some(Scope {
                        opener: i,
                        closer: tokens[i].bracket?.closer,
                        synthetic: false,
                    });
                }
                K::Semicolon | K::CloseCurlyBracket | K::CloseTag => return None,
                _ => {}
            }
        }
    }

    fn block(&mut self, owner: usize) -> Option<Scope> {
        let kind = self.tokens[owner].kind;
        let header = self.header_end(owner)?;

        if CONTROL_BODIES.contains(kind) {
            let (first, first_kind) = self.kind_after(header)?;
            return match first_kind {
                K::OpenCurlyBracket => Some(Scope {
                    opener: first,
                    closer: self.tokens[first].bracket?.closer,
                    synthetic: false,
                }),
                K::Colon if kind != K::Do => Some(Scope {
                    opener: first,
                    closer: self.alt_closer(kind, first),
                    synthetic: false,
                }),
                K::Semicolon | K::CloseTag => None,
                _ if kind == K::Switch => None,
                _ => Some(Scope {
                    opener: header,
                    closer: self.statement_end(first),
                    synthetic: true,
                }),
            };
        }

        let mut i = header;
        loop {
            i += 1;
            match self.tokens.get(i)?.kind {
                K::OpenCurlyBracket => {
                    return Some(Scope {
                        opener: i,
                        closer: self.tokens[i].bracket?.closer,
                        synthetic: false,
                    });
                }
                K::Semicolon | K::CloseCurlyBracket | K::CloseTag | K::FnArrow => return None,
                _ => {
                    if let Some(end) = self.group_end(i) {
                        i = end?;
                    }
                }
            }
        }
    }

    /// The `end*`, `else` or `elseif` keyword closing an alternative-syntax
    /// body that starts at `colon`.
    fn alt_closer(&mut self, kind: K, colon: usize) -> Option<usize> {
        let endings: &[K] = match kind {
            K::If | K::Elseif => &[K::Elseif, K::Else, K::Endif],
            K::Else => &[K::Endif],
            K::For => &[K::Endfor],
            K::Foreach => &[K::Endforeach],
            K::While => &[K::Endwhile],
            K::Switch => &[K::Endswitch],
            K::Declare => &[K::Enddeclare],
            _ => return None,
        };
        let mut i = colon + 1;
        while let Some(token) = self.tokens.get(i) {
            let kind = token.kind;
            if endings.contains(&kind) {
                return Some(i);
            }
            match kind {
                K::CloseParenthesis
                | K::CloseSquareBracket
                | K::CloseShortArray
                | K::CloseCurlyBracket => return None,
                _ if CONTROL.contains(kind) => i = self.construct_end(i).unwrap_or(i),
                _ => {
                    if let Some(end) = self.group_end(i) {
                        i = end?;
                    }
                }
            }
            i += 1;
        }
        None
    }

    /// The last token of the single statement starting at `start`.
    fn statement_end(&mut self, start: usize) -> Option<usize> {
        let kind = self.tokens[start].kind;
        if CONTROL.contains(kind) {
            return self.construct_end(start);
        }
        let mut i = start;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                K::Semicolon | K::CloseTag => return Some(i),
                K::CloseParenthesis
                | K::TypeCloseParenthesis
                | K::CloseSquareBracket
                | K::CloseShortArray
                | K::CloseCurlyBracket
                | K::AttributeEnd => return None,
                _ => {
                    if let Some(end) = self.group_end(i) {
                        i = end?;
                    }
                }
            }
            i += 1;
        }
        None
    }

    /// The last token of the whole control construct at `keyword`,
    /// following `elseif`/`else` chains, `catch`/`finally` clauses and the
    /// `while` tail of `do`. Chains are walked iteratively, so their length
    /// does not count against the nesting limit.
    fn construct_end(&mut self, keyword: usize) -> Option<usize> {
        let mut keyword = keyword;
        loop {
            let kind = self.tokens[keyword].kind;
            let Some(scope) = self.resolve(keyword) else {
                // Bodiless headers such as `while ($x);` end at their `;`.
                let header = self.header_end(keyword)?;
                let (next, next_kind) = self.kind_after(header)?;
                return matches!(next_kind, K::Semicolon | K::CloseTag).then_some(next);
            };
            let closer = scope.closer?;
            let closer_kind = self.tokens[closer].kind;
            if matches!(closer_kind, K::Elseif | K::Else) {
                keyword = closer;
                continue;
            }
            if ALT_ENDINGS.contains(closer_kind) {
                return Some(match self.kind_after(closer) {
                    Some((next, K::Semicolon | K::CloseTag)) => next,
                    _ => closer,
                });
            }
            match (kind, self.kind_after(closer)) {
                (K::If | K::Elseif, Some((next, K::Elseif | K::Else)))
                | (K::Try | K::Catch, Some((next, K::Catch | K::Finally))) => keyword = next,
                (K::Do, Some((next, K::While))) => {
                    let Some(close) = self.tokens[next].parenthesis.and_then(|p| p.closer) else {
                        return Some(next);
                    };
                    return Some(match self.kind_after(close) {
                        Some((semi, K::Semicolon | K::CloseTag)) => semi,
                        _ => close,
                    });
                }
                _ => return Some(closer),
            }
        }
    }
}
