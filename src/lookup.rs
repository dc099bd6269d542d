//! Neighbour lookups shared by the normalizer and the mapper.

use crate::token::{NAMES, PARENTHESIS_OWNERS, SCOPE_OWNERS, Token, TokenKind};

/// Nearest non-empty token strictly before `before`.
pub(crate) fn prev_significant(tokens: &[Token], before: usize) -> Option<usize> {
    tokens[..before.min(tokens.len())]
        .iter()
        .rposition(|t| !t.is_empty())
}

/// Nearest non-empty token strictly after `after`.
pub(crate) fn next_significant(tokens: &[Token], after: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, t)| !t.is_empty())
        .map(|(i, _)| i)
}

/// The construct owning the parenthesis opened at `open`, if any.
///
/// Keywords own the group directly (`if (`, `array(`, `fn(`), a name
/// owns it when it follows `function` (`function &name(`), and a closure
/// `use` only owns its group when it follows the closure's parameters.
pub(crate) fn paren_owner(tokens: &[Token], open: usize) -> Option<usize> {
    let prev = prev_significant(tokens, open)?;
    let kind = tokens[prev].kind;
    if kind == TokenKind::Use {
        let before = prev_significant(tokens, prev)?;
        return (tokens[before].kind == TokenKind::CloseParenthesis).then_some(prev);
    }
    if PARENTHESIS_OWNERS.contains(kind) {
        return Some(prev);
    }
    let before = prev_significant(tokens, prev)?;
    match (kind, tokens[before].kind) {
        (_, TokenKind::Function) if NAMES.contains(kind) => Some(before),
        (_, TokenKind::BitwiseAnd) if NAMES.contains(kind) => {
            let keyword = prev_significant(tokens, before)?;
            (tokens[keyword].kind == TokenKind::Function).then_some(keyword)
        }
        (TokenKind::BitwiseAnd, TokenKind::Function | TokenKind::Closure | TokenKind::Fn) => {
            Some(before)
        }
        _ => None,
    }
}

/// Kind of the construct a `{` at `open` belongs to.
///
/// Walks back over the declaration header. `paren_owner` reports the
/// owner kind of the parenthesis group a `)` closes.
pub(crate) fn curly_owner(
    tokens: &[Token],
    open: usize,
    paren_owner: impl Fn(usize) -> Option<TokenKind>,
) -> Option<TokenKind> {
    let mut i = open;
    while let Some(p) = prev_significant(tokens, i) {
        let kind = tokens[p].kind;
        match kind {
            TokenKind::Semicolon
            | TokenKind::OpenCurlyBracket
            | TokenKind::CloseCurlyBracket
            | TokenKind::OpenTag
            | TokenKind::CloseTag => return None,
            TokenKind::CloseParenthesis => {
                return paren_owner(p).map(|o| {
                    if o == TokenKind::Use {
                        TokenKind::Closure
                    } else {
                        o
                    }
                });
            }
            _ if SCOPE_OWNERS.contains(kind) => return Some(kind),
            _ => i = p,
        }
    }
    None
}

/// Innermost `{` enclosing position `at`, jumping over closed blocks.
pub(crate) fn enclosing_curly(tokens: &[Token], at: usize) -> Option<usize> {
    let mut i = at;
    while i > 0 {
        i -= 1;
        match tokens[i].kind {
            TokenKind::OpenCurlyBracket => return Some(i),
            TokenKind::CloseCurlyBracket => {
                if let Some(opener) = tokens[i].bracket.map(|b| b.opener) {
                    i = opener;
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(kinds: &[TokenKind]) -> Vec<Token> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let mut token = Token::new(k, "", i);
                token.position = i;
                token
            })
            .collect()
    }

    #[test]
    fn skips_empty_tokens() {
        let tokens = stream(&[
            TokenKind::If,
            TokenKind::Whitespace,
            TokenKind::Comment,
            TokenKind::OpenParenthesis,
        ]);
        assert_eq!(prev_significant(&tokens, 3), Some(0));
        assert_eq!(next_significant(&tokens, 0), Some(3));
        assert_eq!(next_significant(&tokens, 3), None);
    }

    #[test]
    fn named_function_owns_parameters() {
        let tokens = stream(&[
            TokenKind::Function,
            TokenKind::Whitespace,
            TokenKind::BitwiseAnd,
            TokenKind::String,
            TokenKind::OpenParenthesis,
        ]);
        assert_eq!(paren_owner(&tokens, 4), Some(0));
    }

    #[test]
    fn import_use_does_not_own() {
        let tokens = stream(&[TokenKind::Use, TokenKind::OpenParenthesis]);
        assert_eq!(paren_owner(&tokens, 1), None);
        let tokens = stream(&[
            TokenKind::CloseParenthesis,
            TokenKind::Use,
            TokenKind::OpenParenthesis,
        ]);
        assert_eq!(paren_owner(&tokens, 2), Some(1));
    }

    #[test]
    fn curly_owner_skips_header() {
        let tokens = stream(&[
            TokenKind::Class,
            TokenKind::String,
            TokenKind::Extends,
            TokenKind::String,
            TokenKind::OpenCurlyBracket,
        ]);
        assert_eq!(curly_owner(&tokens, 4, |_| None), Some(TokenKind::Class));
        let tokens = stream(&[
            TokenKind::CloseParenthesis,
            TokenKind::Colon,
            TokenKind::String,
            TokenKind::OpenCurlyBracket,
        ]);
        assert_eq!(
            curly_owner(&tokens, 3, |_| Some(TokenKind::Use)),
            Some(TokenKind::Closure)
        );
    }

    #[test]
    fn call_parenthesis_has_no_owner() {
        let tokens = stream(&[TokenKind::String, TokenKind::OpenParenthesis]);
        assert_eq!(paren_owner(&tokens, 1), None);
    }
}
