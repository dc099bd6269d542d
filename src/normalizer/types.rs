//! Type-declaration context detection.
//!
//! Decides whether a `?`, `|`, `&` or `(` sits inside a parameter,
//! return, property or constant type. Looks backwards through the
//! normalized output for the token that opens the declaration, then
//! forwards through the raw input for the token that must follow it.

use super::{Context, FrameKind};
use crate::lookup::{next_significant, prev_significant};
use crate::token::{FUNCTION_LIKE, KindSet, MODIFIERS, NAMES, OO_SCOPES, TokenKind as K};

/// Where a type declaration appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TypeSite {
    Param,
    Return,
    Property,
    Constant,
}

/// Tokens that may appear inside a normalized type.
pub(super) const TYPE_PARTS: KindSet = NAMES.union(KindSet::of(&[
    K::Array,
    K::Callable,
    K::Static,
    K::SelfKeyword,
    K::Parent,
    K::Null,
    K::False,
    K::True,
    K::NsSeparator,
    K::Nullable,
    K::TypeUnion,
    K::TypeIntersection,
    K::TypeOpenParenthesis,
    K::TypeCloseParenthesis,
]));

/// Raw base-grammar tokens that may continue a type.
const RAW_TYPE_PARTS: KindSet = TYPE_PARTS.union(KindSet::of(&[
    K::BitwiseOr,
    K::BitwiseAnd,
    K::InlineThen,
    K::OpenParenthesis,
    K::CloseParenthesis,
]));

/// The declaration the current token's type belongs to, if any.
pub(super) fn site_before(ctx: &Context<'_>) -> Option<TypeSite> {
    let out = ctx.out;
    let mut i = out.len();
    let p = loop {
        i = prev_significant(out, i)?;
        if !TYPE_PARTS.contains(out[i].kind) {
            break i;
        }
    };

    let frame = ctx.enclosing();
    let in_params =
        frame.kind == FrameKind::Paren && frame.owner.is_some_and(|o| FUNCTION_LIKE.contains(o));
    let in_members =
        frame.kind == FrameKind::Curly && frame.owner.is_some_and(|o| OO_SCOPES.contains(o));

    match out[p].kind {
        K::OpenParenthesis | K::Comma | K::AttributeEnd if in_params => Some(TypeSite::Param),
        K::Public | K::Private | K::Protected | K::Readonly if in_params => Some(TypeSite::Param),
        K::Colon => {
            let close = prev_significant(out, p)?;
            let owner = ctx.closed(close)?.owner?;
            (out[close].kind == K::CloseParenthesis
                && (FUNCTION_LIKE.contains(owner) || owner == K::Use))
                .then_some(TypeSite::Return)
        }
        K::Const => Some(TypeSite::Constant),
        kind if in_members && (MODIFIERS.contains(kind) || kind == K::AttributeEnd) => {
            Some(TypeSite::Property)
        }
        _ => None,
    }
}

/// Whether the raw input after the current token completes a declaration
/// of `site`. Running out of input counts as a fit.
pub(super) fn fits_after(ctx: &Context<'_>, site: TypeSite) -> bool {
    let input = ctx.input;
    let mut i = ctx.at;
    while let Some(n) = next_significant(input, i) {
        let kind = input[n].kind;
        if RAW_TYPE_PARTS.contains(kind) {
            i = n;
            continue;
        }
        return match site {
            TypeSite::Param => matches!(kind, K::Variable | K::Ellipsis),
            TypeSite::Property => kind == K::Variable,
            TypeSite::Return => matches!(
                kind,
                K::OpenCurlyBracket | K::Semicolon | K::DoubleArrow | K::FnArrow
            ),
            // The constant's own name is a name token, so it is skipped above.
            TypeSite::Constant => kind == K::Equal,
        };
    }
    true
}
