//! Token store queries and the fallible entry points.

mod common;

use common::{nth, store};
use phptokens::{
    Config, DecodeErrorKind, DiagnosticKind, Encoding, Error, TokenKind as K, tokenize_bytes,
    tokenize_file,
};

// -----------------------------------------------------------
// Searching
// -----------------------------------------------------------

#[test]
fn find_by_kind_and_text() {
    let store = store("<?php $a = foo($b); $c = bar($a);");
    let bar = store.find_next_text(K::String, "bar", 0);
    assert_eq!(bar, Some(nth(&store, "bar", 0)));
    assert_eq!(store.find_next_text(K::String, "baz", 0), None);
    let last_a = store.find_previous(K::Variable, store.len() - 1);
    assert_eq!(last_a, Some(nth(&store, "$a", 1)));
}

#[test]
fn text_search_case() {
    let store = store("<?php Foo::bar(); FOO::baz();");
    let exact = store.search(K::String).text("FOO").next(0);
    assert_eq!(exact, Some(nth(&store, "FOO", 0)));
    let any_case = store.search(K::String).text("FOO").case_insensitive().next(0);
    assert_eq!(any_case, Some(nth(&store, "Foo", 0)));
}

#[test]
fn excluded_and_skipped_kinds() {
    let store = store("<?php foo( /* c */ $x );");
    let open = nth(&store, "(", 0);
    let next = store
        .search([K::Whitespace, K::Comment])
        .exclude()
        .next(open + 1);
    assert_eq!(next, Some(nth(&store, "$x", 0)));
    let skipped = store
        .search([K::Variable, K::CloseParenthesis])
        .skip(K::Variable)
        .next(open);
    assert_eq!(skipped, Some(nth(&store, ")", 0)));
}

#[test]
fn local_backward_search_stops_at_previous_statement() {
    let store = store("<?php $a = 1; echo $b;");
    let echo = nth(&store, "echo", 0);
    assert_eq!(store.search(K::Variable).local().previous(echo), None);
    assert_eq!(
        store.search(K::Variable).previous(echo),
        Some(nth(&store, "$a", 0))
    );
}

#[test]
fn iteration_and_indexing_agree() {
    let store = store("<?php echo 1;");
    for (i, token) in store.iter().enumerate() {
        assert_eq!(token.position, i);
        assert_eq!(store.get(i), Some(&store[i]));
    }
    assert_eq!(store.get(store.len()), None);
    assert_eq!((&store).into_iter().count(), store.len());
}

#[test]
fn significant_neighbours_skip_doc_comments() {
    let store = store("<?php\n/** doc */\nfunction f() {}");
    let function = nth(&store, "function", 0);
    assert_eq!(store.previous_significant(function - 1), Some(0));
    assert_eq!(store.next_significant(1), Some(function));
}

// -----------------------------------------------------------
// Diagnostics
// -----------------------------------------------------------

#[test]
fn diagnostics_are_ordered_and_located() {
    let store = store("<?php #[Attr\n$a = \"\\u{x}\";\n$b = <<<EOT\nbody\n");
    let kinds: Vec<_> = store.diagnostics().iter().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnterminatedAttribute,
            DiagnosticKind::InvalidEscape,
            DiagnosticKind::UnterminatedHeredoc {
                label: "EOT".to_string()
            },
        ]
    );
    for diagnostic in store.diagnostics() {
        assert_eq!(store[diagnostic.position].offset, diagnostic.offset);
    }
    assert_eq!(store[store.diagnostics()[0].position].kind, K::Attribute);
}

// -----------------------------------------------------------
// Entry points
// -----------------------------------------------------------

#[test]
fn invalid_utf8_is_fatal() {
    let err = tokenize_bytes(b"<?php echo '\xc3\x28';", &Config::new()).unwrap_err();
    match err {
        Error::Decode(e) => {
            assert_eq!(e.kind, DecodeErrorKind::InvalidUtf8);
            assert_eq!(e.offset, 12);
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn latin1_input_tokenizes() {
    let config = Config::new().encoding(Encoding::Latin1);
    let store = tokenize_bytes(b"<?php $caf\xe9 = 1;", &config).expect("latin-1 decodes");
    assert_eq!(store[1].text, "$caf\u{e9}");
    assert!(store.diagnostics().is_empty());
}

#[test]
fn missing_file_reports_the_path() {
    let path = std::env::temp_dir().join("phptokens-missing-file.php");
    let err = tokenize_file(&path, &Config::new()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("phptokens-missing-file.php"));
}

#[test]
fn file_round_trip() {
    let path = std::env::temp_dir().join(format!("phptokens-{}.php", std::process::id()));
    let source = "<?php\nfunction f() {\n\treturn 1;\n}\n";
    std::fs::write(&path, source).expect("write temp file");
    let store = tokenize_file(&path, &Config::new().tab_width(4));
    std::fs::remove_file(&path).ok();
    let store = store.expect("tokenize file");
    assert_eq!(store.contents(), source);
    assert_eq!(store.config().tab_width, 4);
}
