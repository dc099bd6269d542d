//! Structural mapper: links delimiters and scopes across a normalized
//! stream.
//!
//! Runs in three steps. [`pairs`] matches parentheses, brackets, braces,
//! attributes and doc comments, and settles whether each `[` opens a
//! short array. [`scopes`] then resolves every scope owner. Finally the
//! scope triples are written onto owners, openers and closers, and every
//! token learns which scopes enclose it.
//!
//! When synthetic closers are shared (`fn () => fn () => 1;`, nested
//! braceless `if`s, a `case` closed by the switch's `}`), an owner always
//! keeps its own triple, matched pairs claim their tokens before
//! synthetic bounds do, and among synthetic bounds the outermost owner
//! claims first.

mod pairs;
mod scopes;

use rustc_hash::FxHashSet;

use crate::diagnostic::Diagnostic;
use crate::token::{ScopeLink, Token};

/// Output of [`map`].
#[derive(Debug, Clone, Default)]
pub struct Mapped {
    pub tokens: Vec<Token>,
    /// Structural problems found while pairing, such as unterminated
    /// attributes.
    pub diagnostics: Vec<Diagnostic>,
}

/// Annotate a normalized stream with pairing, scope and nesting data.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn map(mut tokens: Vec<Token>) -> Mapped {
    let mut diagnostics = Vec::new();
    pairs::link(&mut tokens, &mut diagnostics);
    let resolved = scopes::resolve_all(&tokens);
    apply(&mut tokens, &resolved);
    tracing::debug!(
        scopes = resolved.len(),
        diagnostics = diagnostics.len(),
        "mapped"
    );
    Mapped {
        tokens,
        diagnostics,
    }
}

fn apply(tokens: &mut [Token], resolved: &[(usize, scopes::Scope)]) {
    let link = |owner: usize, scope: &scopes::Scope| ScopeLink {
        owner,
        opener: scope.opener,
        closer: scope.closer,
    };

    let owners: FxHashSet<usize> = resolved.iter().map(|(owner, _)| *owner).collect();
    for (owner, scope) in resolved {
        tokens[*owner].scope = Some(link(*owner, scope));
    }

    for synthetic in [false, true] {
        for (owner, scope) in resolved.iter().filter(|(_, s)| s.synthetic == synthetic) {
            let claim = link(*owner, scope);
            let ends = std::iter::once(scope.opener).chain(scope.closer);
            for end in ends {
                if !owners.contains(&end) && tokens[end].scope.is_none() {
                    tokens[end].scope = Some(claim);
                }
            }
        }
    }

    for (owner, scope) in resolved {
        let kind = tokens[*owner].kind;
        let end = scope.closer.unwrap_or(tokens.len());
        if end > scope.opener + 1 {
            for token in &mut tokens[scope.opener + 1..end] {
                token.enclosing_scopes.push((*owner, kind));
            }
        }
    }

    for token in tokens.iter_mut() {
        token.nesting_level = token.enclosing_scopes.len();
    }
}
