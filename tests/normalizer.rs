//! Normalizer tests: revision-independent kinds for context-sensitive
//! constructs.

mod common;

use common::{normalized, significant_kinds};
use phptokens::normalizer::normalize;
use phptokens::{Config, PhpVersion, Token, TokenKind as K};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<K> {
    significant_kinds(&normalized(&format!("<?php {source}"), &Config::new()))
}

fn kinds_as(version: PhpVersion, source: &str) -> Vec<K> {
    let config = Config::new().php_version(version);
    significant_kinds(&normalized(&format!("<?php {source}"), &config))
}

fn kind_of(source: &str, text: &str) -> K {
    normalized(&format!("<?php {source}"), &Config::new())
        .into_iter()
        .find(|t| t.text == text)
        .map(|t| t.kind)
        .unwrap_or_else(|| panic!("no token {text:?}"))
}

// -----------------------------------------------------------
// Qualified names
// -----------------------------------------------------------

#[test]
fn split_and_single_token_names_normalize_alike() {
    let legacy = vec![
        Token::new(K::OpenTag, "<?php ", 0),
        Token::new(K::String, "Vendor", 6),
        Token::new(K::NsSeparator, "\\", 12),
        Token::new(K::String, "Sub", 13),
        Token::new(K::NsSeparator, "\\", 16),
        Token::new(K::String, "Name", 17),
        Token::new(K::Semicolon, ";", 21),
    ];
    let modern = vec![
        Token::new(K::OpenTag, "<?php ", 0),
        Token::new(K::NameQualified, "Vendor\\Sub\\Name", 6),
        Token::new(K::Semicolon, ";", 21),
    ];
    let config = Config::new();
    let legacy = normalize(legacy, &config);
    let modern = normalize(modern, &config);

    let shape = |tokens: &[Token]| -> Vec<(K, String)> {
        tokens.iter().map(|t| (t.kind, t.text.clone())).collect()
    };
    assert_eq!(shape(&legacy), shape(&modern));
    assert_eq!(legacy[1].kind, K::NameQualified);
    assert_eq!(legacy[1].offset, 6);
}

#[test]
fn names_merge_the_same_under_every_revision() {
    for version in [PhpVersion::V7_3, PhpVersion::V8_0, PhpVersion::V8_2] {
        assert_eq!(
            kinds_as(version, "new \\Vendor\\Sub\\Name();"),
            vec![
                K::New,
                K::NameFullyQualified,
                K::OpenParenthesis,
                K::CloseParenthesis,
                K::Semicolon
            ]
        );
    }
}

#[test]
fn reserved_first_segment_merges() {
    assert_eq!(
        kinds("new Default\\Foo; use List\\Item;"),
        vec![
            K::New,
            K::NameQualified,
            K::Semicolon,
            K::Use,
            K::NameQualified,
            K::Semicolon
        ]
    );
    assert_eq!(kind_of("new Default\\Foo;", "Default\\Foo"), K::NameQualified);
    assert_eq!(kind_of("echo List\\ITEM;", "List\\ITEM"), K::NameQualified);
}

// -----------------------------------------------------------
// Keywords as names
// -----------------------------------------------------------

#[test]
fn every_name_in_a_constant_list() {
    assert_eq!(
        kinds("const A = 1, DEFAULT = 2, LIST = [3, 4];"),
        vec![
            K::Const,
            K::String,
            K::Equal,
            K::LNumber,
            K::Comma,
            K::String,
            K::Equal,
            K::LNumber,
            K::Comma,
            K::String,
            K::Equal,
            K::OpenSquareBracket,
            K::LNumber,
            K::Comma,
            K::LNumber,
            K::CloseSquareBracket,
            K::Semicolon
        ]
    );
    assert_eq!(kind_of("const string DEFAULT = 'a';", "DEFAULT"), K::String);
    assert_eq!(kind_of("const X = [1], CASE = 2;", "CASE"), K::String);
    // Outside a constant declaration the keyword keeps its meaning.
    assert_eq!(kind_of("switch ($a) { default: $b = 1; }", "default"), K::Default);
}

#[test]
fn member_and_constant_names() {
    assert_eq!(kind_of("$q->print();", "print"), K::String);
    assert_eq!(kind_of("Foo::NEW;", "NEW"), K::String);
    assert_eq!(kind_of("const FOREACH = 1;", "FOREACH"), K::String);
    assert_eq!(kind_of("$a?->default;", "default"), K::String);
}

#[test]
fn soft_keywords_as_method_names() {
    assert_eq!(kind_of("$q->match($x);", "match"), K::String);
    assert_eq!(kind_of("function readonly() {}", "readonly"), K::String);
    assert_eq!(kind_of("$e->enum;", "enum"), K::String);
}

#[test]
fn literal_keywords() {
    assert_eq!(
        kinds("$a = [true, FALSE, null, self::X];")[3..10],
        [
            K::True,
            K::Comma,
            K::False,
            K::Comma,
            K::Null,
            K::Comma,
            K::SelfKeyword
        ]
    );
}

// -----------------------------------------------------------
// Revision gating
// -----------------------------------------------------------

#[test]
fn enums_need_8_1() {
    let source = "enum Suit: string { case Hearts = 'H'; }";
    let modern = kinds(source);
    assert_eq!(modern[0], K::Enum);
    assert!(modern.contains(&K::EnumCase));
    let old = kinds_as(PhpVersion::V8_0, source);
    assert_eq!(old[0], K::String);
    assert!(old.contains(&K::Case));
    assert!(!old.contains(&K::EnumCase));
}

#[test]
fn match_needs_8_0() {
    let source = "$r = match ($x) { 1 => 'a', default => 'b' };";
    let modern = kinds(source);
    assert!(modern.contains(&K::Match));
    assert!(modern.contains(&K::MatchDefault));
    let old = kinds_as(PhpVersion::V7_4, source);
    assert!(!old.contains(&K::Match));
    assert!(old.contains(&K::Default));
}

#[test]
fn named_arguments_need_8_0() {
    assert_eq!(kinds("foo(limit: 10);")[2], K::ParamName);
    assert_eq!(kinds_as(PhpVersion::V7_4, "foo(limit: 10);")[2], K::String);
}

#[test]
fn merges_ignore_the_revision() {
    let old = kinds_as(PhpVersion::V7_3, "$a?->b; 1_000;");
    assert_eq!(
        old,
        vec![
            K::Variable,
            K::NullsafeObjectOperator,
            K::String,
            K::Semicolon,
            K::LNumber,
            K::Semicolon
        ]
    );
}

// -----------------------------------------------------------
// Type declarations
// -----------------------------------------------------------

#[test]
fn nullable_types_versus_ternary() {
    let kinds = kinds("function f(?int $a): ?string { return $a ? 'x' : null; }");
    let nullables = kinds.iter().filter(|k| **k == K::Nullable).count();
    assert_eq!(nullables, 2);
    assert!(kinds.contains(&K::InlineThen));
    assert!(kinds.contains(&K::InlineElse));
}

#[test]
fn union_and_intersection_types() {
    let kinds = kinds("function f(int|string $a, A&B $b, array &$c): static|null {}");
    assert_eq!(kinds.iter().filter(|k| **k == K::TypeUnion).count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == K::TypeIntersection).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == K::BitwiseAnd).count(), 1);
}

#[test]
fn bitwise_operators_outside_types() {
    assert_eq!(
        kinds("$a = $b | $c & $d;"),
        vec![
            K::Variable,
            K::Equal,
            K::Variable,
            K::BitwiseOr,
            K::Variable,
            K::BitwiseAnd,
            K::Variable,
            K::Semicolon
        ]
    );
}

#[test]
fn disjunctive_normal_form_types() {
    let kinds = kinds("function f((A&B)|null $x) {}");
    assert_eq!(
        kinds[3..9],
        [
            K::TypeOpenParenthesis,
            K::String,
            K::TypeIntersection,
            K::String,
            K::TypeCloseParenthesis,
            K::TypeUnion
        ]
    );
}

#[test]
fn union_types_need_8_0() {
    let kinds = kinds_as(PhpVersion::V7_4, "function f(int|string $a) {}");
    assert!(kinds.contains(&K::BitwiseOr));
    assert!(!kinds.contains(&K::TypeUnion));
}

#[test]
fn array_keyword_as_type() {
    assert_eq!(kind_of("function f(array $a) {}", "array"), K::String);
    assert_eq!(kind_of("$a = array(1, 2);", "array"), K::Array);
}

// -----------------------------------------------------------
// Anonymous constructs
// -----------------------------------------------------------

#[test]
fn closures_and_anonymous_classes() {
    assert_eq!(kind_of("$f = function () {};", "function"), K::Closure);
    assert_eq!(kind_of("$f = function &() {};", "function"), K::Closure);
    assert_eq!(kind_of("function named() {}", "function"), K::Function);
    assert_eq!(kind_of("$o = new class {};", "class"), K::AnonClass);
    assert_eq!(kind_of("$o = new readonly class {};", "class"), K::AnonClass);
}

#[test]
fn arrow_function_markers() {
    let kinds = kinds("$f = fn($x) => [$x => 1];");
    assert_eq!(kinds[2], K::Fn);
    assert_eq!(kinds.iter().filter(|k| **k == K::FnArrow).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == K::DoubleArrow).count(), 1);
}

// -----------------------------------------------------------
// Idempotence
// -----------------------------------------------------------

#[test]
fn normalizing_twice_changes_nothing() {
    let sources = [
        "<?php namespace A\\B; use C\\D;",
        "<?php function f(?int $a, A|B $b, (C&D)|null $c): static|null {}",
        "<?php $f = fn($x) => fn($y) => $x?->m($y);",
        "<?php $r = match ($x) { 1, 2 => 'a', default => $b ? 1 : 2 };",
        "<?php enum E: int { case A = 1_000; }",
        "<?php foo(name: 1, other: $x ? $y : $z); end: goto end;",
        "<?php #[Attr(1)] final class C { public readonly int $a; const list = 0o17; }",
        "<?php $o = new class {}; $c = function &() use ($a): array { return []; };",
    ];
    let config = Config::new();
    for source in sources {
        let once = normalized(source, &config);
        let twice = normalize(once.clone(), &config);
        assert_eq!(once, twice, "source: {source}");
    }
}
