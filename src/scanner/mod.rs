//! Character scanner: raw source text to provisional tokens.
//!
//! The scanner reads the base grammar only. Qualified names stay split
//! into name and separator tokens, `?->` is two tokens, digit separators
//! end a literal, and words such as `fn` or `match` are plain names. The
//! normalizer lifts this stream to the modern grammar afterwards.

mod doc_comment;
pub mod numbers;
mod strings;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::{TAB_EXPANDED, Token, TokenKind};

use numbers::{Grammar, scan_number};

/// Provisional tokens plus the anomalies found while reading them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan `source` into base-grammar tokens. Never fails: malformed input
/// degrades to best-effort tokens and diagnostics.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn scan(source: &str, config: &Config) -> Scan {
    let scan = Scanner::new(source, config.tab_width).run();
    tracing::debug!(
        tokens = scan.tokens.len(),
        diagnostics = scan.diagnostics.len(),
        "scanned"
    );
    scan
}

/// Operators by descending length so the first prefix match is the longest.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("===", TokenKind::IsIdentical),
    ("!==", TokenKind::IsNotIdentical),
    ("<=>", TokenKind::Spaceship),
    ("**=", TokenKind::PowEqual),
    ("...", TokenKind::Ellipsis),
    ("<<=", TokenKind::SlEqual),
    (">>=", TokenKind::SrEqual),
    ("??=", TokenKind::CoalesceEqual),
    ("==", TokenKind::IsEqual),
    ("!=", TokenKind::IsNotEqual),
    ("<>", TokenKind::IsNotEqual),
    ("<=", TokenKind::IsSmallerOrEqual),
    (">=", TokenKind::IsGreaterOrEqual),
    ("&&", TokenKind::BooleanAnd),
    ("||", TokenKind::BooleanOr),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::MulEqual),
    ("/=", TokenKind::DivEqual),
    (".=", TokenKind::ConcatEqual),
    ("%=", TokenKind::ModEqual),
    ("&=", TokenKind::AndEqual),
    ("|=", TokenKind::OrEqual),
    ("^=", TokenKind::XorEqual),
    ("<<", TokenKind::Sl),
    (">>", TokenKind::Sr),
    ("??", TokenKind::Coalesce),
    ("->", TokenKind::ObjectOperator),
    ("::", TokenKind::DoubleColon),
    ("=>", TokenKind::DoubleArrow),
    ("**", TokenKind::Pow),
    ("=", TokenKind::Equal),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    ("!", TokenKind::BooleanNot),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulus),
    (".", TokenKind::StringConcat),
    ("&", TokenKind::BitwiseAnd),
    ("|", TokenKind::BitwiseOr),
    ("^", TokenKind::BitwiseXor),
    ("~", TokenKind::BitwiseNot),
    ("?", TokenKind::InlineThen),
    (":", TokenKind::Colon),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    ("(", TokenKind::OpenParenthesis),
    (")", TokenKind::CloseParenthesis),
    ("[", TokenKind::OpenSquareBracket),
    ("]", TokenKind::CloseSquareBracket),
    ("{", TokenKind::OpenCurlyBracket),
    ("}", TokenKind::CloseCurlyBracket),
    ("@", TokenKind::Asperand),
    ("$", TokenKind::Dollar),
    ("\\", TokenKind::NsSeparator),
];

pub(crate) const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

pub(crate) const fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// End of the identifier starting at `i`.
fn ident_end(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|&b| is_ident_char(b)) {
        i += 1;
    }
    i
}

/// Length of the line break at `i`: 2 for `\r\n`, 1 for `\n` or `\r`.
fn newline_len(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => 2,
        Some(b'\r' | b'\n') => 1,
        _ => 0,
    }
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    tab_width: usize,
    in_php: bool,
    halt_pending: bool,
    halted: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, tab_width: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            tab_width,
            in_php: false,
            halt_pending: false,
            halted: false,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> Scan {
        while self.pos < self.bytes.len() {
            if self.halted {
                self.emit(TokenKind::InlineHtml, self.bytes.len());
            } else if self.in_php {
                self.php();
            } else {
                self.inline_html();
            }
        }
        Scan {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Columns a tab advances from `col`.
    const fn tab_advance(&self, col: usize) -> usize {
        if self.tab_width == 0 {
            1
        } else {
            self.tab_width - (col - 1) % self.tab_width
        }
    }

    /// Emit the token covering `pos..end` and move past it.
    fn emit(&mut self, kind: TokenKind, end: usize) {
        let raw = &self.src[self.pos..end];
        let expand = self.tab_width > 0 && TAB_EXPANDED.contains(kind) && raw.contains('\t');
        let mut expanded = String::new();
        let (mut line, mut col, mut length) = (self.line, self.col, 0);
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() != Some(&'\n') {
                        line += 1;
                        col = 1;
                    }
                }
                '\n' => {
                    line += 1;
                    col = 1;
                }
                '\t' => {
                    let width = self.tab_advance(col);
                    if expand {
                        expanded.extend(std::iter::repeat_n(' ', width));
                    }
                    col += width;
                    length += width;
                    continue;
                }
                _ => {
                    col += 1;
                    length += 1;
                }
            }
            if expand {
                expanded.push(c);
            }
        }

        let mut token = Token::new(kind, raw, self.pos);
        if expand {
            token.orig_text = Some(std::mem::replace(&mut token.text, expanded));
        }
        token.position = self.tokens.len();
        token.line = self.line;
        token.column = self.col;
        token.length = length;
        self.tokens.push(token);

        self.pos = end;
        self.line = line;
        self.col = col;

        match kind {
            TokenKind::HaltCompiler => self.halt_pending = true,
            TokenKind::Semicolon | TokenKind::CloseTag if self.halt_pending => self.halted = true,
            _ => {}
        }
    }

    /// Record an anomaly at the start of the token about to be emitted.
    fn diagnose(&mut self, kind: DiagnosticKind) {
        self.diagnostics
            .push(Diagnostic::new(kind, self.pos, self.line, self.col));
    }

    fn inline_html(&mut self) {
        let mut from = self.pos;
        while let Some(at) = find(self.bytes, from, b"<?") {
            if let Some(tag_len) = self.open_tag_len(at) {
                if at > self.pos {
                    self.emit(TokenKind::InlineHtml, at);
                }
                let kind = if self.bytes.get(at + 2) == Some(&b'=') {
                    TokenKind::OpenTagWithEcho
                } else {
                    TokenKind::OpenTag
                };
                self.emit(kind, at + tag_len);
                self.in_php = true;
                return;
            }
            from = at + 2;
        }
        self.emit(TokenKind::InlineHtml, self.bytes.len());
    }

    /// Length of an open tag at `at`, including the one whitespace
    /// character `<?php` absorbs.
    fn open_tag_len(&self, at: usize) -> Option<usize> {
        let rest = &self.bytes[at..];
        if rest.starts_with(b"<?=") {
            return Some(3);
        }
        if rest.len() < 5 || !rest[2..5].eq_ignore_ascii_case(b"php") {
            return None;
        }
        match rest.get(5) {
            None => Some(5),
            Some(b' ' | b'\t') => Some(6),
            Some(b'\r' | b'\n') => Some(5 + newline_len(rest, 5)),
            Some(_) => None,
        }
    }

    fn php(&mut self) {
        let b = self.bytes[self.pos];
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => self.whitespace(),
            b'?' if self.peek_at(1) == Some(b'>') => {
                let end = self.pos + 2;
                self.emit(TokenKind::CloseTag, end + newline_len(self.bytes, end));
                self.in_php = false;
            }
            b'#' if self.peek_at(1) == Some(b'[') => {
                self.emit(TokenKind::Attribute, self.pos + 2);
            }
            b'#' => self.line_comment(),
            b'/' if self.peek_at(1) == Some(b'/') => self.line_comment(),
            b'/' if self.peek_at(1) == Some(b'*') => self.block_comment(),
            b'$' if self.peek_at(1).is_some_and(is_ident_start) => {
                self.emit(TokenKind::Variable, ident_end(self.bytes, self.pos + 1));
            }
            b'\'' | b'"' | b'`' => self.quoted_string(0),
            b'b' | b'B' if matches!(self.peek_at(1), Some(b'\'' | b'"')) => {
                self.quoted_string(1);
            }
            b'b' | b'B' if self.bytes[self.pos + 1..].starts_with(b"<<<") => {
                if !self.heredoc(1) {
                    self.word();
                }
            }
            b'<' if self.bytes[self.pos..].starts_with(b"<<<") => {
                if !self.heredoc(0) {
                    self.operator();
                }
            }
            b'0'..=b'9' => self.number(),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
            b'(' => {
                if !self.cast() {
                    self.emit(TokenKind::OpenParenthesis, self.pos + 1);
                }
            }
            _ if is_ident_start(b) => self.word(),
            _ => self.operator(),
        }
    }

    /// Blanks up to and including at most one line break.
    fn whitespace(&mut self) {
        let mut end = self.pos;
        while matches!(self.bytes.get(end), Some(b' ' | b'\t')) {
            end += 1;
        }
        end += newline_len(self.bytes, end);
        self.emit(TokenKind::Whitespace, end);
    }

    /// `//` and `#` comments keep their line break but stop before `?>`.
    fn line_comment(&mut self) {
        let mut end = self.pos;
        while end < self.bytes.len() {
            match self.bytes[end] {
                b'\r' | b'\n' => {
                    end += newline_len(self.bytes, end);
                    break;
                }
                b'?' if self.bytes.get(end + 1) == Some(&b'>') => break,
                _ => end += 1,
            }
        }
        self.emit(TokenKind::Comment, end);
    }

    fn block_comment(&mut self) {
        let doc = self.bytes[self.pos..].starts_with(b"/**")
            && self.peek_at(3).is_some_and(|b| b.is_ascii_whitespace());
        let close = find(self.bytes, self.pos + 2, b"*/");
        let end = close.map_or(self.bytes.len(), |c| c + 2);

        if doc {
            if close.is_none() {
                self.diagnose(DiagnosticKind::UnterminatedDocComment);
            }
            let src = self.src;
            for (kind, len) in doc_comment::split(&src[self.pos..end], close.is_some()) {
                self.emit(kind, self.pos + len);
            }
            return;
        }

        if close.is_none() {
            self.diagnose(DiagnosticKind::UnterminatedComment);
        }
        self.emit(TokenKind::Comment, end);
    }

    fn number(&mut self) {
        let scan = scan_number(&self.bytes[self.pos..], Grammar::Base);
        if !scan.valid {
            self.diagnose(DiagnosticKind::InvalidNumericLiteral);
        }
        self.emit(scan.kind, self.pos + scan.len);
    }

    /// `(int)`, `( string )` and friends. Returns `false` when the
    /// parenthesis is not a cast.
    fn cast(&mut self) -> bool {
        let blanks = |mut i: usize| {
            while matches!(self.bytes.get(i), Some(b' ' | b'\t')) {
                i += 1;
            }
            i
        };
        let word_start = blanks(self.pos + 1);
        let mut word_end = word_start;
        while self.bytes.get(word_end).is_some_and(u8::is_ascii_alphabetic) {
            word_end += 1;
        }
        let close = blanks(word_end);
        if word_end == word_start || self.bytes.get(close) != Some(&b')') {
            return false;
        }
        let kind = match self.src[word_start..word_end].to_ascii_lowercase().as_str() {
            "int" | "integer" => TokenKind::IntCast,
            "bool" | "boolean" => TokenKind::BoolCast,
            "float" | "double" | "real" => TokenKind::DoubleCast,
            "string" => TokenKind::StringCast,
            "binary" => TokenKind::BinaryCast,
            "array" => TokenKind::ArrayCast,
            "object" => TokenKind::ObjectCast,
            "unset" => TokenKind::UnsetCast,
            _ => return false,
        };
        self.emit(kind, close + 1);
        true
    }

    fn word(&mut self) {
        let end = ident_end(self.bytes, self.pos);
        let src = self.src;
        match TokenKind::reserved(&src[self.pos..end]) {
            Some(TokenKind::Yield) => match self.yield_from(end) {
                Some(from_end) => self.emit(TokenKind::YieldFrom, from_end),
                None => self.emit(TokenKind::Yield, end),
            },
            Some(kind) => self.emit(kind, end),
            None => self.emit(TokenKind::String, end),
        }
    }

    /// End of `from` when `yield` at the current position reads `yield from`.
    fn yield_from(&self, mut i: usize) -> Option<usize> {
        let start = i;
        while matches!(self.bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        let word = self.bytes.get(i..i + 4)?;
        (i > start
            && word.eq_ignore_ascii_case(b"from")
            && !self.bytes.get(i + 4).is_some_and(|&b| is_ident_char(b)))
        .then_some(i + 4)
    }

    fn operator(&mut self) {
        let rest = &self.bytes[self.pos..];
        if let Some(&(op, kind)) = OPERATORS
            .iter()
            .find(|(op, _)| rest.starts_with(op.as_bytes()))
        {
            self.emit(kind, self.pos + op.len());
            return;
        }

        let ch = self.src[self.pos..].chars().next().unwrap_or('\u{fffd}');
        self.diagnose(DiagnosticKind::UnexpectedCharacter(ch));
        self.emit(TokenKind::BadCharacter, self.pos + ch.len_utf8());
    }
}
