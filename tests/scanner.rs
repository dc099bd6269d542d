//! Character scanner tests: token boundaries, locations and lexical
//! diagnostics, before any normalization.

use phptokens::scanner::scan;
use phptokens::{Config, DiagnosticKind, TokenKind};

fn texts(source: &str) -> Vec<String> {
    scan(source, &Config::new())
        .tokens
        .into_iter()
        .map(|t| t.text)
        .collect()
}

// -----------------------------------------------------------
// Open and close tags
// -----------------------------------------------------------

#[test]
fn bare_open_tag_at_end_of_input() {
    let scan = scan("<?php", &Config::new());
    assert_eq!(scan.tokens.len(), 1);
    assert_eq!(scan.tokens[0].kind, TokenKind::OpenTag);
    assert_eq!(scan.tokens[0].length, 5);
}

#[test]
fn html_only_file_is_one_token() {
    let scan = scan("<html>\n<body></body>\n</html>\n", &Config::new());
    assert_eq!(scan.tokens.len(), 1);
    assert_eq!(scan.tokens[0].kind, TokenKind::InlineHtml);
    assert!(scan.diagnostics.is_empty());
}

#[test]
fn close_tag_swallows_one_newline() {
    assert_eq!(
        texts("<?php echo 1 ?>\n\nafter"),
        vec!["<?php ", "echo", " ", "1", " ", "?>\n", "\nafter"]
    );
}

#[test]
fn open_tag_is_case_insensitive() {
    let scan = scan("<?PHP\n$a;", &Config::new());
    assert_eq!(scan.tokens[0].kind, TokenKind::OpenTag);
    assert_eq!(scan.tokens[0].text, "<?PHP\n");
    assert_eq!(scan.tokens[1].line, 2);
}

// -----------------------------------------------------------
// Literals
// -----------------------------------------------------------

#[test]
fn interpolated_string_is_a_single_token() {
    let source = r#"<?php echo "Hello {$user->name}, you have {$counts['new']} items";"#;
    let scan = scan(source, &Config::new());
    let strings: Vec<_> = scan
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::DoubleQuotedString)
        .collect();
    assert_eq!(strings.len(), 1);
    assert_eq!(
        strings[0].text,
        r#""Hello {$user->name}, you have {$counts['new']} items""#
    );
    assert_eq!(scan.tokens.last().map(|t| t.kind), Some(TokenKind::Semicolon));
}

#[test]
fn heredoc_body_keeps_lines_apart() {
    let scan = scan("<?php\n$a = <<<SQL\nSELECT *\nFROM t\nSQL;\n", &Config::new());
    let body: Vec<_> = scan
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Heredoc)
        .map(|t| (t.text.as_str(), t.line))
        .collect();
    assert_eq!(body, vec![("SELECT *\n", 3), ("FROM t\n", 4)]);
    let end = scan
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::EndHeredoc)
        .expect("closing label");
    assert_eq!((end.line, end.column), (5, 1));
}

#[test]
fn cast_spellings() {
    let kinds: Vec<_> = scan("<?php (integer)(boolean)(real)(binary)(unset)", &Config::new())
        .tokens
        .into_iter()
        .skip(1)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::IntCast,
            TokenKind::BoolCast,
            TokenKind::DoubleCast,
            TokenKind::BinaryCast,
            TokenKind::UnsetCast,
        ]
    );
}

// -----------------------------------------------------------
// Locations
// -----------------------------------------------------------

#[test]
fn multi_line_comment_advances_lines() {
    let scan = scan("<?php /* one\ntwo\nthree */ $x;", &Config::new());
    let comment = &scan.tokens[1];
    assert_eq!(comment.kind, TokenKind::Comment);
    assert_eq!(comment.line, 1);
    let x = &scan.tokens[3];
    assert_eq!(x.text, "$x");
    assert_eq!((x.line, x.column), (3, 10));
}

#[test]
fn columns_follow_tab_stops() {
    let scan = scan("<?php\n\t$a\t= 1;", &Config::new().tab_width(4));
    let a = scan.tokens.iter().find(|t| t.text == "$a").expect("$a");
    assert_eq!(a.column, 5);
    let eq = scan.tokens.iter().find(|t| t.text == "=").expect("=");
    assert_eq!(eq.column, 9);
}

#[test]
fn zero_tab_width_keeps_tabs() {
    let scan = scan("<?php\n\t$a;", &Config::new());
    assert_eq!(scan.tokens[1].text, "\t");
    assert_eq!(scan.tokens[1].orig_text, None);
    assert_eq!(scan.tokens[2].column, 2);
}

#[test]
fn offsets_are_byte_offsets() {
    let scan = scan("<?php $é = 'ü'; $b;", &Config::new());
    let b = scan.tokens.iter().find(|t| t.text == "$b").expect("$b");
    assert_eq!(b.offset, "<?php $é = 'ü'; ".len());
}

// -----------------------------------------------------------
// Diagnostics
// -----------------------------------------------------------

#[test]
fn independent_anomalies_are_all_reported() {
    let scan = scan("<?php $a = 089;\n$b = \"\\u{}\";\n$c = 'open", &Config::new());
    let kinds: Vec<_> = scan.diagnostics.iter().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::InvalidNumericLiteral,
            DiagnosticKind::InvalidEscape,
            DiagnosticKind::UnterminatedString,
        ]
    );
    assert_eq!(scan.diagnostics[2].line, 3);
    assert_eq!(scan.diagnostics[2].column, 6);
}

#[test]
fn unterminated_doc_comment() {
    let scan = scan("<?php /** @var int", &Config::new());
    assert_eq!(
        scan.diagnostics[0].kind,
        DiagnosticKind::UnterminatedDocComment
    );
    assert!(
        scan.tokens
            .iter()
            .all(|t| t.kind != TokenKind::DocCommentCloseTag)
    );
}
