#![allow(dead_code)]

use phptokens::{Config, Token, TokenKind, TokenStore, normalizer, scanner, tokenize};

pub fn store(source: &str) -> TokenStore {
    tokenize(source, &Config::new())
}

/// Scan and normalize without mapping.
pub fn normalized(source: &str, config: &Config) -> Vec<Token> {
    normalizer::normalize(scanner::scan(source, config).tokens, config)
}

/// Kinds of every token that is neither trivia nor the open tag.
pub fn significant_kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens
        .iter()
        .filter(|t| !t.is_empty() && t.kind != TokenKind::OpenTag)
        .map(|t| t.kind)
        .collect()
}

/// Position of the `n`th token whose text is exactly `text`.
pub fn nth(store: &TokenStore, text: &str, n: usize) -> usize {
    store
        .iter()
        .enumerate()
        .filter(|(_, t)| t.text == text)
        .map(|(i, _)| i)
        .nth(n)
        .unwrap_or_else(|| panic!("no token {text:?} #{n}"))
}

/// Every parenthesis and bracket link reads the same from both ends.
pub fn assert_pairing(store: &TokenStore) {
    for token in store {
        if let Some(link) = token.parenthesis {
            if let Some(closer) = link.closer {
                assert_eq!(
                    store[link.opener].parenthesis,
                    Some(link),
                    "parenthesis opener of token {}",
                    token.position
                );
                assert_eq!(
                    store[closer].parenthesis,
                    Some(link),
                    "parenthesis closer of token {}",
                    token.position
                );
            }
        }
        if let Some(pair) = token.bracket {
            if let Some(closer) = pair.closer {
                assert_eq!(store[pair.opener].bracket, Some(pair));
                assert_eq!(store[closer].bracket, Some(pair));
            }
        }
    }
}

/// Scopes opened by `{` report the same triple on owner, opener and
/// closer.
pub fn assert_brace_scopes(store: &TokenStore) {
    for token in store {
        let Some(link) = token.scope.filter(|s| s.owner == token.position) else {
            continue;
        };
        if store[link.opener].kind != TokenKind::OpenCurlyBracket {
            continue;
        }
        assert_eq!(
            store[link.opener].scope,
            Some(link),
            "opener of {} at {}",
            token.kind,
            token.position
        );
        if let Some(closer) = link.closer {
            assert_eq!(
                store[closer].scope,
                Some(link),
                "closer of {} at {}",
                token.kind,
                token.position
            );
        }
    }
}

/// Tokens strictly inside a scope list its owner; tokens outside do not.
pub fn assert_nesting(store: &TokenStore) {
    for owner in store {
        let Some(link) = owner.scope.filter(|s| s.owner == owner.position) else {
            continue;
        };
        let end = link.closer.unwrap_or(store.len());
        for token in store {
            let inside = token.position > link.opener && token.position < end;
            let listed = token
                .enclosing_scopes
                .contains(&(owner.position, owner.kind));
            assert_eq!(
                inside, listed,
                "token {} vs scope of {} at {}",
                token.position, owner.kind, owner.position
            );
        }
    }
    for token in store {
        assert_eq!(token.nesting_level, token.enclosing_scopes.len());
    }
}
