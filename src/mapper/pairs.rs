//! Delimiter pairing.
//!
//! One forward pass over a single stack of open parentheses, square
//! brackets, braces and attribute openers. A closer pops back to the
//! innermost frame of its own group; frames skipped on the way, and
//! frames still open at end of input, keep a `None` closer. A closer with
//! no frame of its group is stray and stays unlinked.

use rustc_hash::FxHashMap;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::lookup::{paren_owner, prev_significant};
use crate::token::{NAMES, Pair, ParenLink, Token, TokenKind as K};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Paren,
    Square,
    Curly,
    Attribute,
}

#[derive(Debug, Clone, Copy)]
struct Open {
    group: Group,
    at: usize,
}

/// Link every delimiter in `tokens`, classify `[` as index or short array,
/// and fill the nesting lists. Attributes left open are reported.
pub(super) fn link(tokens: &mut [Token], diagnostics: &mut Vec<Diagnostic>) {
    let mut stack: Vec<Open> = Vec::new();
    let mut parens: FxHashMap<usize, usize> = FxHashMap::default();
    let mut attributes: FxHashMap<usize, usize> = FxHashMap::default();

    for i in 0..tokens.len() {
        match tokens[i].kind {
            K::OpenParenthesis | K::TypeOpenParenthesis => {
                record(&mut tokens[i], &stack);
                let owner = if tokens[i].kind == K::OpenParenthesis {
                    paren_owner(tokens, i)
                } else {
                    None
                };
                let link = ParenLink {
                    owner,
                    opener: i,
                    closer: None,
                };
                tokens[i].parenthesis = Some(link);
                if let Some(owner) = owner {
                    tokens[owner].parenthesis = Some(link);
                }
                stack.push(Open {
                    group: Group::Paren,
                    at: i,
                });
            }
            K::OpenSquareBracket | K::OpenShortArray | K::OpenCurlyBracket => {
                if tokens[i].kind == K::OpenSquareBracket && !is_index(tokens, i) {
                    tokens[i].kind = K::OpenShortArray;
                }
                record(&mut tokens[i], &stack);
                tokens[i].bracket = Some(Pair {
                    opener: i,
                    closer: None,
                });
                let group = if tokens[i].kind == K::OpenCurlyBracket {
                    Group::Curly
                } else {
                    Group::Square
                };
                stack.push(Open { group, at: i });
            }
            K::Attribute => {
                stack.push(Open {
                    group: Group::Attribute,
                    at: i,
                });
                record(&mut tokens[i], &stack);
            }
            K::CloseParenthesis | K::TypeCloseParenthesis => {
                if let Some(opener) = pop(&mut stack, Group::Paren) {
                    parens.insert(opener, i);
                    if let Some(mut link) = tokens[opener].parenthesis {
                        link.closer = Some(i);
                        tokens[opener].parenthesis = Some(link);
                        tokens[i].parenthesis = Some(link);
                        if let Some(owner) = link.owner {
                            tokens[owner].parenthesis = Some(link);
                        }
                    }
                }
                record(&mut tokens[i], &stack);
            }
            K::CloseSquareBracket | K::CloseShortArray | K::CloseCurlyBracket => {
                let group = if tokens[i].kind == K::CloseCurlyBracket {
                    Group::Curly
                } else {
                    Group::Square
                };
                if let Some(opener) = pop(&mut stack, group) {
                    match tokens[opener].kind {
                        K::OpenShortArray => tokens[i].kind = K::CloseShortArray,
                        K::OpenSquareBracket => tokens[i].kind = K::CloseSquareBracket,
                        _ => {}
                    }
                    let pair = Pair {
                        opener,
                        closer: Some(i),
                    };
                    tokens[opener].bracket = Some(pair);
                    tokens[i].bracket = Some(pair);
                }
                record(&mut tokens[i], &stack);
            }
            K::AttributeEnd => {
                record(&mut tokens[i], &stack);
                if let Some(opener) = pop(&mut stack, Group::Attribute) {
                    attributes.insert(opener, i);
                }
            }
            _ => record(&mut tokens[i], &stack),
        }
    }

    for token in tokens.iter_mut() {
        for pair in &mut token.nested_parenthesis {
            pair.closer = parens.get(&pair.opener).copied();
        }
        if let Some(pair) = &mut token.attribute {
            pair.closer = attributes.get(&pair.opener).copied();
        }
        for pair in &mut token.nested_attributes {
            pair.closer = attributes.get(&pair.opener).copied();
        }
    }

    for token in tokens.iter() {
        if token.kind == K::Attribute && !attributes.contains_key(&token.position) {
            let mut diagnostic = Diagnostic::new(
                DiagnosticKind::UnterminatedAttribute,
                token.offset,
                token.line,
                token.column,
            );
            diagnostic.position = token.position;
            diagnostics.push(diagnostic);
        }
    }

    link_doc_comments(tokens);
}

/// Pop back to the innermost frame of `group`, returning its opener.
fn pop(stack: &mut Vec<Open>, group: Group) -> Option<usize> {
    let depth = stack.iter().rposition(|o| o.group == group)?;
    let opener = stack[depth].at;
    stack.truncate(depth);
    Some(opener)
}

/// Copy the open parenthesis and attribute frames onto `token`. Closers
/// are filled in once the pass completes.
fn record(token: &mut Token, stack: &[Open]) {
    token.nested_parenthesis = stack
        .iter()
        .filter(|o| o.group == Group::Paren)
        .map(|o| Pair {
            opener: o.at,
            closer: None,
        })
        .collect();
    let attributes: Vec<Pair> = stack
        .iter()
        .filter(|o| o.group == Group::Attribute)
        .map(|o| Pair {
            opener: o.at,
            closer: None,
        })
        .collect();
    if let Some((innermost, outer)) = attributes.split_last() {
        token.attribute = Some(*innermost);
        token.nested_attributes = outer.to_vec();
    }
}

/// Whether the `[` at `open` indexes the expression before it rather than
/// opening a short array.
fn is_index(tokens: &[Token], open: usize) -> bool {
    let Some(prev) = prev_significant(tokens, open) else {
        return false;
    };
    let token = &tokens[prev];
    match token.kind {
        K::Variable
        | K::CloseParenthesis
        | K::CloseSquareBracket
        | K::CloseShortArray
        | K::ConstantEncapsedString
        | K::DoubleQuotedString
        | K::SelfKeyword
        | K::Parent
        | K::Static
        | K::ClassC
        | K::Dir
        | K::File
        | K::FuncC
        | K::Line
        | K::MethodC
        | K::NsC
        | K::TraitC
        | K::PropertyC => true,
        kind if NAMES.contains(kind) => true,
        // `$a->{'b'}[0]`, `${'a'}[0]`
        K::CloseCurlyBracket => token
            .bracket
            .and_then(|b| prev_significant(tokens, b.opener))
            .is_some_and(|p| {
                matches!(
                    tokens[p].kind,
                    K::ObjectOperator
                        | K::NullsafeObjectOperator
                        | K::DoubleColon
                        | K::Dollar
                        | K::Variable
                )
            }),
        _ => false,
    }
}

/// Pair doc-comment open and close tags and collect the tags between.
fn link_doc_comments(tokens: &mut [Token]) {
    let mut open: Option<usize> = None;
    let mut tags = Vec::new();
    for i in 0..tokens.len() {
        match tokens[i].kind {
            K::DocCommentOpenTag => {
                if let Some(opener) = open.replace(i) {
                    finish_doc_comment(tokens, opener, None, std::mem::take(&mut tags));
                }
                tags.clear();
            }
            K::DocCommentTag if open.is_some() => tags.push(i),
            K::DocCommentCloseTag => {
                if let Some(opener) = open.take() {
                    finish_doc_comment(tokens, opener, Some(i), std::mem::take(&mut tags));
                }
            }
            _ => {}
        }
    }
    if let Some(opener) = open {
        finish_doc_comment(tokens, opener, None, tags);
    }
}

fn finish_doc_comment(tokens: &mut [Token], opener: usize, closer: Option<usize>, tags: Vec<usize>) {
    let pair = Pair { opener, closer };
    tokens[opener].comment = Some(pair);
    tokens[opener].comment_tags = tags;
    if let Some(closer) = closer {
        tokens[closer].comment = Some(pair);
    }
}
