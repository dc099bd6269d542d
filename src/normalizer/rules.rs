//! The normalization rule table.
//!
//! Rules are tried in table order; the first one that fires wins. A rule
//! tagged with `since` only applies when the configured revision hint is
//! at least that revision. Merges carry no `since` tag.

use super::types::{TypeSite, fits_after, site_before};
use super::{Context, FrameKind};
use crate::config::{Config, PhpVersion};
use crate::scanner::numbers::classify_literal;
use crate::token::{FUNCTION_LIKE, KEYWORDS, KindSet, TokenKind as K};

/// How a rule rewrites the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rewrite {
    /// Change the kind of the current token.
    Retype(K),
    /// Fold the current token and the `count - 1` tokens after it into one.
    Merge { count: usize, kind: K },
}

pub(crate) struct Rule {
    pub name: &'static str,
    pub since: Option<PhpVersion>,
    pub trigger: KindSet,
    pub apply: fn(&Context<'_>) -> Option<Rewrite>,
}

const WORDS: KindSet = KEYWORDS.with(K::String);

const RULES: &[Rule] = &[
    Rule {
        name: "qualified_name",
        since: None,
        trigger: WORDS.with(K::NsSeparator).with(K::Namespace),
        apply: qualified_name,
    },
    Rule {
        name: "numeric_literal",
        since: None,
        trigger: KindSet::of(&[K::LNumber, K::DNumber]),
        apply: numeric_literal,
    },
    Rule {
        name: "nullsafe_operator",
        since: None,
        trigger: KindSet::of(&[K::InlineThen]),
        apply: nullsafe_operator,
    },
    Rule {
        name: "name_position",
        since: None,
        trigger: KEYWORDS,
        apply: name_position,
    },
    Rule {
        name: "named_argument",
        since: Some(PhpVersion::V8_0),
        trigger: WORDS,
        apply: named_argument,
    },
    Rule {
        name: "goto_label",
        since: None,
        trigger: KindSet::of(&[K::String]),
        apply: goto_label,
    },
    Rule {
        name: "colon",
        since: None,
        trigger: KindSet::of(&[K::Colon]),
        apply: colon,
    },
    Rule {
        name: "nullable",
        since: None,
        trigger: KindSet::of(&[K::InlineThen]),
        apply: nullable,
    },
    Rule {
        name: "double_arrow",
        since: None,
        trigger: KindSet::of(&[K::DoubleArrow]),
        apply: double_arrow,
    },
    Rule {
        name: "type_union",
        since: Some(PhpVersion::V8_0),
        trigger: KindSet::of(&[K::BitwiseOr]),
        apply: type_union,
    },
    Rule {
        name: "type_intersection",
        since: Some(PhpVersion::V8_1),
        trigger: KindSet::of(&[K::BitwiseAnd]),
        apply: type_intersection,
    },
    Rule {
        name: "type_parenthesis",
        since: Some(PhpVersion::V8_2),
        trigger: KindSet::of(&[K::OpenParenthesis]),
        apply: type_parenthesis,
    },
    Rule {
        name: "type_parenthesis_close",
        since: None,
        trigger: KindSet::of(&[K::CloseParenthesis]),
        apply: type_parenthesis_close,
    },
    Rule {
        name: "attribute_end",
        since: None,
        trigger: KindSet::of(&[K::CloseSquareBracket]),
        apply: attribute_end,
    },
    Rule {
        name: "array_type",
        since: None,
        trigger: KindSet::of(&[K::Array]),
        apply: array_type,
    },
    Rule {
        name: "closure",
        since: None,
        trigger: KindSet::of(&[K::Function]),
        apply: closure,
    },
    Rule {
        name: "anonymous_class",
        since: None,
        trigger: KindSet::of(&[K::Class]),
        apply: anonymous_class,
    },
    Rule {
        name: "enum_case",
        since: Some(PhpVersion::V8_1),
        trigger: KindSet::of(&[K::Case]),
        apply: enum_case,
    },
    Rule {
        name: "match_default",
        since: Some(PhpVersion::V8_0),
        trigger: KindSet::of(&[K::Default]),
        apply: match_default,
    },
    Rule {
        name: "arrow_function",
        since: Some(PhpVersion::V7_4),
        trigger: KindSet::of(&[K::String]),
        apply: arrow_function,
    },
    Rule {
        name: "match_expression",
        since: Some(PhpVersion::V8_0),
        trigger: KindSet::of(&[K::String]),
        apply: match_expression,
    },
    Rule {
        name: "enum_declaration",
        since: Some(PhpVersion::V8_1),
        trigger: KindSet::of(&[K::String]),
        apply: enum_declaration,
    },
    Rule {
        name: "readonly_modifier",
        since: Some(PhpVersion::V8_1),
        trigger: KindSet::of(&[K::String]),
        apply: readonly_modifier,
    },
    Rule {
        name: "literal_keyword",
        since: None,
        trigger: KindSet::of(&[K::String]),
        apply: literal_keyword,
    },
];

/// Names and revisions of every rule, in the order they are tried.
pub fn rule_names() -> impl Iterator<Item = (&'static str, Option<PhpVersion>)> {
    RULES.iter().map(|r| (r.name, r.since))
}

/// First rewrite any applicable rule produces for the current token.
pub(super) fn apply(ctx: &Context<'_>, config: &Config) -> Option<Rewrite> {
    let kind = ctx.current().kind;
    RULES
        .iter()
        .filter(|rule| rule.trigger.contains(kind) && config.allows(rule.since))
        .find_map(|rule| {
            let rewrite = (rule.apply)(ctx)?;
            tracing::trace!(rule = rule.name, position = ctx.out.len(), "rule fired");
            Some(rewrite)
        })
}

const fn retype(kind: K) -> Option<Rewrite> {
    Some(Rewrite::Retype(kind))
}

fn is_segment(kind: K) -> bool {
    WORDS.contains(kind)
}

/// `A\B`, `\A\B` and `namespace\A` spelled as adjacent tokens. Any
/// segment may be a reserved word, the first one included.
fn qualified_name(ctx: &Context<'_>) -> Option<Rewrite> {
    let input = ctx.input;
    let at = ctx.at;
    let kind = match input[at].kind {
        K::NsSeparator => K::NameFullyQualified,
        K::Namespace => K::NameRelative,
        _ => K::NameQualified,
    };
    let mut end = if kind == K::NameFullyQualified {
        at
    } else {
        at + 1
    };
    while input.get(end).is_some_and(|t| t.kind == K::NsSeparator)
        && input.get(end + 1).is_some_and(|t| is_segment(t.kind))
    {
        end += 2;
    }
    let count = end - at;
    (count >= 2).then_some(Rewrite::Merge { count, kind })
}

/// Digit separators and `0o` prefixes read by the base grammar as a
/// literal followed by name fragments.
fn numeric_literal(ctx: &Context<'_>) -> Option<Rewrite> {
    let run: Vec<&str> = ctx.input[ctx.at..]
        .iter()
        .take(8)
        .take_while(|t| matches!(t.kind, K::LNumber | K::DNumber | K::String))
        .map(|t| t.text.as_str())
        .collect();
    (2..=run.len()).rev().find_map(|count| {
        let kind = classify_literal(&run[..count].concat())?;
        Some(Rewrite::Merge { count, kind })
    })
}

fn nullsafe_operator(ctx: &Context<'_>) -> Option<Rewrite> {
    let next = ctx.input.get(ctx.at + 1)?;
    (next.kind == K::ObjectOperator).then_some(Rewrite::Merge {
        count: 2,
        kind: K::NullsafeObjectOperator,
    })
}

/// Whether the current word sits where only an identifier may appear:
/// after `->`, `?->`, `::`, `function`, `function &`, `const` or an enum
/// `case`, or before the `=` of a constant declaration.
fn in_name_position(ctx: &Context<'_>) -> bool {
    let Some(prev) = ctx.prev() else {
        return false;
    };
    match ctx.out[prev].kind {
        K::ObjectOperator
        | K::NullsafeObjectOperator
        | K::DoubleColon
        | K::Function
        | K::Const
        | K::EnumCase => true,
        K::BitwiseAnd => crate::lookup::prev_significant(ctx.out, prev)
            .is_some_and(|p| ctx.out[p].kind == K::Function),
        _ => declares_constant(ctx),
    }
}

/// `const A = 1, DEFAULT = 2` and `const string DEFAULT = 2`: a word
/// followed by `=` in a statement that began with `const`.
fn declares_constant(ctx: &Context<'_>) -> bool {
    if ctx.next_kind() != Some(K::Equal) {
        return false;
    }
    let mut depth = 0_usize;
    let mut i = ctx.out.len();
    while let Some(p) = crate::lookup::prev_significant(ctx.out, i) {
        match ctx.out[p].kind {
            K::CloseParenthesis
            | K::TypeCloseParenthesis
            | K::CloseSquareBracket
            | K::CloseShortArray
            | K::AttributeEnd => depth += 1,
            K::OpenParenthesis
            | K::TypeOpenParenthesis
            | K::OpenSquareBracket
            | K::OpenShortArray
            | K::Attribute => {
                let Some(outer) = depth.checked_sub(1) else {
                    return false;
                };
                depth = outer;
            }
            K::Semicolon | K::OpenCurlyBracket | K::CloseCurlyBracket | K::OpenTag | K::CloseTag
                if depth == 0 =>
            {
                return false;
            }
            K::Const if depth == 0 => return true,
            _ => {}
        }
        i = p;
    }
    false
}

fn name_position(ctx: &Context<'_>) -> Option<Rewrite> {
    in_name_position(ctx).then_some(Rewrite::Retype(K::String))
}

/// `name:` directly inside a call's argument list.
fn named_argument(ctx: &Context<'_>) -> Option<Rewrite> {
    let prev = ctx.prev_kind()?;
    let in_call = ctx.enclosing().kind == FrameKind::Paren
        && !ctx.enclosing().owner.is_some_and(|o| FUNCTION_LIKE.contains(o));
    (matches!(prev, K::OpenParenthesis | K::Comma) && in_call && ctx.next_kind() == Some(K::Colon))
        .then_some(Rewrite::Retype(K::ParamName))
}

/// `label:` at the start of a statement.
fn goto_label(ctx: &Context<'_>) -> Option<Rewrite> {
    let at_statement_start = match ctx.prev_kind() {
        None => true,
        Some(kind) => matches!(
            kind,
            K::Semicolon | K::OpenCurlyBracket | K::CloseCurlyBracket | K::OpenTag
        ),
    };
    let top = ctx.top();
    let block = matches!(top.kind, FrameKind::Root | FrameKind::Curly) && top.ternaries == 0;
    (at_statement_start && block && ctx.next_kind() == Some(K::Colon)).then_some(Rewrite::Retype(K::GotoLabel))
}

/// Ternary else, goto colon, or plain colon.
fn colon(ctx: &Context<'_>) -> Option<Rewrite> {
    let prev = ctx.prev();
    match prev.map(|p| ctx.out[p].kind) {
        Some(K::GotoLabel) => return retype(K::GotoColon),
        Some(K::ParamName | K::Else) => return None,
        Some(K::CloseParenthesis) => {
            let owner = prev.and_then(|p| ctx.closed(p)).and_then(|c| c.owner);
            let declares = owner.is_some_and(|o| {
                FUNCTION_LIKE.contains(o)
                    || matches!(
                        o,
                        K::Use
                            | K::If
                            | K::Elseif
                            | K::While
                            | K::For
                            | K::Foreach
                            | K::Switch
                            | K::Declare
                    )
            });
            if declares {
                return None;
            }
        }
        _ => {}
    }
    (ctx.top().ternaries > 0).then_some(Rewrite::Retype(K::InlineElse))
}

fn nullable(ctx: &Context<'_>) -> Option<Rewrite> {
    let site = site_before(ctx)?;
    fits_after(ctx, site).then_some(Rewrite::Retype(K::Nullable))
}

/// `=>` ending an arrow function signature, separating match arms, or
/// pairing array keys.
fn double_arrow(ctx: &Context<'_>) -> Option<Rewrite> {
    if ends_arrow_signature(ctx) {
        return retype(K::FnArrow);
    }
    let top = ctx.top();
    (top.kind == FrameKind::Curly && top.owner == Some(K::Match)).then_some(Rewrite::Retype(K::MatchArrow))
}

/// Whether the tokens before `=>` read `fn (...)` with an optional
/// return type.
fn ends_arrow_signature(ctx: &Context<'_>) -> bool {
    let mut i = ctx.out.len();
    while let Some(p) = crate::lookup::prev_significant(ctx.out, i) {
        match ctx.out[p].kind {
            K::CloseParenthesis => {
                return ctx
                    .closed(p)
                    .is_some_and(|c| c.owner == Some(K::Fn));
            }
            kind if super::types::TYPE_PARTS.contains(kind) || kind == K::Colon => i = p,
            _ => return false,
        }
    }
    false
}

fn type_union(ctx: &Context<'_>) -> Option<Rewrite> {
    let site = site_before(ctx)?;
    fits_after(ctx, site).then_some(Rewrite::Retype(K::TypeUnion))
}

/// `&` between two types; a `&` before a variable is a reference.
fn type_intersection(ctx: &Context<'_>) -> Option<Rewrite> {
    if matches!(ctx.next_kind(), Some(K::Variable | K::Ellipsis)) {
        return None;
    }
    let site = site_before(ctx)?;
    fits_after(ctx, site).then_some(Rewrite::Retype(K::TypeIntersection))
}

/// Parentheses grouping an intersection inside a union type.
fn type_parenthesis(ctx: &Context<'_>) -> Option<Rewrite> {
    let site = site_before(ctx)?;
    (site != TypeSite::Constant && fits_after(ctx, site)).then_some(Rewrite::Retype(K::TypeOpenParenthesis))
}

fn type_parenthesis_close(ctx: &Context<'_>) -> Option<Rewrite> {
    (ctx.top().kind == FrameKind::TypeParen).then_some(Rewrite::Retype(K::TypeCloseParenthesis))
}

fn attribute_end(ctx: &Context<'_>) -> Option<Rewrite> {
    (ctx.top().kind == FrameKind::Attribute).then_some(Rewrite::Retype(K::AttributeEnd))
}

/// `array` is a literal constructor only when a `(` follows.
fn array_type(ctx: &Context<'_>) -> Option<Rewrite> {
    (ctx.next_kind() != Some(K::OpenParenthesis)).then_some(Rewrite::Retype(K::String))
}

/// `function (` and `function &(` without a name.
fn closure(ctx: &Context<'_>) -> Option<Rewrite> {
    let next = ctx.next()?;
    let anonymous = match ctx.input[next].kind {
        K::OpenParenthesis => true,
        K::BitwiseAnd => crate::lookup::next_significant(ctx.input, next)
            .is_some_and(|n| ctx.input[n].kind == K::OpenParenthesis),
        _ => false,
    };
    anonymous.then_some(Rewrite::Retype(K::Closure))
}

/// `new class`, allowing modifiers and attributes in between.
fn anonymous_class(ctx: &Context<'_>) -> Option<Rewrite> {
    let mut i = ctx.out.len();
    while let Some(p) = crate::lookup::prev_significant(ctx.out, i) {
        match ctx.out[p].kind {
            K::New => return retype(K::AnonClass),
            K::Readonly | K::Final | K::Abstract => i = p,
            K::AttributeEnd => i = ctx.closed(p)?.opener,
            _ => return None,
        }
    }
    None
}

fn enum_case(ctx: &Context<'_>) -> Option<Rewrite> {
    let top = ctx.top();
    (top.kind == FrameKind::Curly && top.owner == Some(K::Enum)).then_some(Rewrite::Retype(K::EnumCase))
}

fn match_default(ctx: &Context<'_>) -> Option<Rewrite> {
    let top = ctx.top();
    (top.kind == FrameKind::Curly && top.owner == Some(K::Match)).then_some(Rewrite::Retype(K::MatchDefault))
}

/// Soft keywords only count outside name position.
fn soft_keyword(ctx: &Context<'_>, word: &str) -> bool {
    ctx.current().text_is(word) && !in_name_position(ctx)
}

fn arrow_function(ctx: &Context<'_>) -> Option<Rewrite> {
    (soft_keyword(ctx, "fn") && matches!(ctx.next_kind(), Some(K::OpenParenthesis | K::BitwiseAnd)))
        .then_some(Rewrite::Retype(K::Fn))
}

/// `match (...) {`.
fn match_expression(ctx: &Context<'_>) -> Option<Rewrite> {
    if !soft_keyword(ctx, "match") {
        return None;
    }
    let open = ctx.next()?;
    if ctx.input[open].kind != K::OpenParenthesis {
        return None;
    }
    let mut depth = 0usize;
    let mut close = None;
    for (i, token) in ctx.input.iter().enumerate().skip(open) {
        match token.kind {
            K::OpenParenthesis => depth += 1,
            K::CloseParenthesis => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let after = crate::lookup::next_significant(ctx.input, close?)?;
    (ctx.input[after].kind == K::OpenCurlyBracket).then_some(Rewrite::Retype(K::Match))
}

/// `enum Name {`, `enum Name: string` and `enum Name implements`.
fn enum_declaration(ctx: &Context<'_>) -> Option<Rewrite> {
    if !soft_keyword(ctx, "enum") {
        return None;
    }
    let name = ctx.next()?;
    if ctx.input[name].kind != K::String {
        return None;
    }
    let after = crate::lookup::next_significant(ctx.input, name)?;
    matches!(
        ctx.input[after].kind,
        K::OpenCurlyBracket | K::Colon | K::Implements
    )
    .then_some(Rewrite::Retype(K::Enum))
}

fn readonly_modifier(ctx: &Context<'_>) -> Option<Rewrite> {
    (soft_keyword(ctx, "readonly") && ctx.next_kind() != Some(K::OpenParenthesis))
        .then_some(Rewrite::Retype(K::Readonly))
}

/// `self`, `parent`, `true`, `false` and `null`.
fn literal_keyword(ctx: &Context<'_>) -> Option<Rewrite> {
    let kind = match ctx.current().text.to_ascii_lowercase().as_str() {
        "self" => K::SelfKeyword,
        "parent" => K::Parent,
        "true" => K::True,
        "false" => K::False,
        "null" => K::Null,
        _ => return None,
    };
    (!in_name_position(ctx)).then_some(Rewrite::Retype(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::scanner::scan;

    fn kinds_with(source: &str, config: &Config) -> Vec<K> {
        normalize(scan(source, config).tokens, config)
            .into_iter()
            .filter(|t| !t.is_empty() && t.kind != K::OpenTag)
            .map(|t| t.kind)
            .collect()
    }

    fn kinds(source: &str) -> Vec<K> {
        kinds_with(&format!("<?php {source}"), &Config::new())
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = rule_names().map(|(name, _)| name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn qualified_name_forms() {
        assert_eq!(kinds("A\\B;"), vec![K::NameQualified, K::Semicolon]);
        assert_eq!(kinds("\\A;"), vec![K::NameFullyQualified, K::Semicolon]);
        assert_eq!(kinds("namespace\\A;"), vec![K::NameRelative, K::Semicolon]);
        assert_eq!(
            kinds("namespace A;"),
            vec![K::Namespace, K::String, K::Semicolon]
        );
    }

    #[test]
    fn group_use_prefix_is_not_merged() {
        assert_eq!(
            kinds("use A\\{B};")[..4],
            [K::Use, K::String, K::NsSeparator, K::OpenCurlyBracket]
        );
    }

    #[test]
    fn numeric_separators_merge() {
        assert_eq!(kinds("1_000_000;"), vec![K::LNumber, K::Semicolon]);
        assert_eq!(kinds("0o17;"), vec![K::LNumber, K::Semicolon]);
        assert_eq!(kinds("1_000.5;"), vec![K::DNumber, K::Semicolon]);
        assert_eq!(kinds("1__0;"), vec![K::LNumber, K::String, K::Semicolon]);
    }

    #[test]
    fn keywords_in_name_position_become_names() {
        assert_eq!(kinds("$a->list;")[2], K::String);
        assert_eq!(kinds("A::class;")[2], K::String);
        assert_eq!(kinds("function &print() {}")[2], K::String);
    }

    #[test]
    fn soft_keywords_respect_revision() {
        let old = Config::new().php_version(PhpVersion::V7_3);
        let kinds = kinds_with("<?php fn($a) => $a;", &old);
        assert_eq!(kinds[0], K::String);
        assert_eq!(kinds[4], K::DoubleArrow);
        let kinds = kinds_with("<?php fn($a) => $a;", &Config::new());
        assert_eq!(kinds[0], K::Fn);
        assert_eq!(kinds[4], K::FnArrow);
    }

    #[test]
    fn ternary_and_goto_colons() {
        assert_eq!(
            kinds("$a ? $b : $c;"),
            vec![
                K::Variable,
                K::InlineThen,
                K::Variable,
                K::InlineElse,
                K::Variable,
                K::Semicolon
            ]
        );
        assert_eq!(
            kinds("end: goto end;"),
            vec![K::GotoLabel, K::GotoColon, K::Goto, K::String, K::Semicolon]
        );
    }

    #[test]
    fn closure_return_type_in_ternary() {
        let kinds = kinds("$f = $a ? function(): int { return 1; } : null;");
        assert!(kinds.contains(&K::Colon));
        assert!(kinds.contains(&K::InlineElse));
    }

    #[test]
    fn named_arguments() {
        assert_eq!(kinds("f(array: 1);")[2], K::ParamName);
        assert_eq!(kinds("f(a: 1, b: 2);")[6], K::ParamName);
    }

    #[test]
    fn nullable_and_union_types() {
        let kinds = kinds("function f(?int $a, A|B $b): ?C {}");
        assert_eq!(kinds[3], K::Nullable);
        assert_eq!(kinds[8], K::TypeUnion);
        assert_eq!(kinds[13], K::Nullable);
    }

    #[test]
    fn reference_is_not_intersection() {
        let kinds = kinds("function f(A&B $a, &$b, array &...$c) {}");
        assert_eq!(kinds[4], K::TypeIntersection);
        assert_eq!(kinds[8], K::BitwiseAnd);
        assert_eq!(kinds[12], K::BitwiseAnd);
    }

    #[test]
    fn dnf_type_parentheses() {
        let kinds = kinds("class A { public (B&C)|null $x; }");
        assert_eq!(
            kinds[4..11],
            [
                K::TypeOpenParenthesis,
                K::String,
                K::TypeIntersection,
                K::String,
                K::TypeCloseParenthesis,
                K::TypeUnion,
                K::Null,
            ]
        );
    }

    #[test]
    fn bitwise_outside_types() {
        assert_eq!(kinds("$a = A | B;")[3], K::BitwiseOr);
        assert_eq!(kinds("function f($a = A | B) {}")[6], K::BitwiseOr);
    }

    #[test]
    fn attribute_closer() {
        assert_eq!(
            kinds("#[A([1])] function f() {}")[..7],
            [
                K::Attribute,
                K::String,
                K::OpenParenthesis,
                K::OpenSquareBracket,
                K::LNumber,
                K::CloseSquareBracket,
                K::CloseParenthesis,
            ]
        );
        assert_eq!(kinds("#[A([1])] function f() {}")[7], K::AttributeEnd);
    }

    #[test]
    fn array_keyword_as_type() {
        assert_eq!(kinds("array(1);")[0], K::Array);
        assert_eq!(kinds("function f(array $a) {}")[3], K::String);
    }

    #[test]
    fn closures_and_anonymous_classes() {
        assert_eq!(kinds("$f = function () {};")[2], K::Closure);
        assert_eq!(kinds("$f = function &() {};")[2], K::Closure);
        assert_eq!(kinds("$o = new #[A] readonly class {};")[7], K::AnonClass);
    }

    #[test]
    fn enum_declaration_and_cases() {
        let kinds = kinds("enum Suit: string { case Hearts = 'H'; }");
        assert_eq!(kinds[0], K::Enum);
        assert_eq!(kinds[5], K::EnumCase);
        assert_eq!(kinds_with("<?php enum($x);", &Config::new())[0], K::String);
    }

    #[test]
    fn readonly_call_stays_a_name() {
        assert_eq!(kinds("readonly();")[0], K::String);
        assert_eq!(kinds("class A { readonly int $a; }")[3], K::Readonly);
    }

    #[test]
    fn literal_words() {
        assert_eq!(
            kinds("[self::A, parent::B, TRUE, false, null];")[..10],
            [
                K::OpenSquareBracket,
                K::SelfKeyword,
                K::DoubleColon,
                K::String,
                K::Comma,
                K::Parent,
                K::DoubleColon,
                K::String,
                K::Comma,
                K::True,
            ]
        );
        assert_eq!(kinds("$a->null;")[2], K::String);
    }
}
