//! Quoted strings, shell strings and heredoc/nowdoc bodies.
//!
//! Interpolated literals stay one token. Their embedded expressions are
//! only walked far enough to find the real closing quote.

use super::{Scanner, ident_end, is_ident_char, is_ident_start, newline_len};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::TokenKind;

/// Where a quoted literal ends and what it contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Quoted {
    /// Index just past the closing quote, `None` when input ran out.
    end: Option<usize>,
    interpolated: bool,
    bad_escape: bool,
}

/// Walk a literal body starting just after its opening `quote`.
fn quoted(bytes: &[u8], mut i: usize, quote: u8) -> Quoted {
    let interpolating = quote != b'\'';
    let mut q = Quoted::default();
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if interpolating && bytes.get(i + 1) == Some(&b'u') && bytes.get(i + 2) == Some(&b'{')
                {
                    let digits = bytes
                        .get(i + 3..)
                        .unwrap_or_default()
                        .iter()
                        .take_while(|b| b.is_ascii_hexdigit())
                        .count();
                    if digits == 0 || bytes.get(i + 3 + digits) != Some(&b'}') {
                        q.bad_escape = true;
                    }
                }
                i += 2;
            }
            b if b == quote => {
                q.end = Some(i + 1);
                return q;
            }
            b'$' if interpolating && bytes.get(i + 1).is_some_and(|&b| is_ident_start(b)) => {
                q.interpolated = true;
                i = ident_end(bytes, i + 1);
            }
            b'$' if interpolating && bytes.get(i + 1) == Some(&b'{') => {
                q.interpolated = true;
                i = expression_end(bytes, i + 2);
            }
            b'{' if interpolating && bytes.get(i + 1) == Some(&b'$') => {
                q.interpolated = true;
                i = expression_end(bytes, i + 1);
            }
            _ => i += 1,
        }
    }
    q
}

/// Index just past the `}` closing an embedded expression that started
/// with one open brace, skipping nested braces and nested strings.
fn expression_end(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 1usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            q @ (b'\'' | b'"' | b'`') => match quoted(bytes, i + 1, q).end {
                Some(end) => {
                    i = end;
                    continue;
                }
                None => return bytes.len(),
            },
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

impl Scanner<'_> {
    /// Single-quoted, double-quoted or backtick literal. `prefix` counts
    /// the bytes before the quote (a `b` binary prefix).
    pub(super) fn quoted_string(&mut self, prefix: usize) {
        let quote = self.bytes[self.pos + prefix];
        let q = quoted(self.bytes, self.pos + prefix + 1, quote);
        let kind = match quote {
            b'`' => TokenKind::ShellExec,
            _ if q.interpolated => TokenKind::DoubleQuotedString,
            _ => TokenKind::ConstantEncapsedString,
        };
        if q.bad_escape {
            self.diagnose(DiagnosticKind::InvalidEscape);
        }
        if q.end.is_none() {
            self.diagnose(DiagnosticKind::UnterminatedString);
        }
        self.emit(kind, q.end.unwrap_or(self.bytes.len()));
    }

    /// Heredoc or nowdoc starting at the current position (after `prefix`
    /// bytes). Returns `false` without consuming anything when the
    /// `<<<` does not introduce a valid label line.
    pub(super) fn heredoc(&mut self, prefix: usize) -> bool {
        let (src, bytes) = (self.src, self.bytes);
        let mut i = self.pos + prefix + 3;
        while matches!(bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        let quote = match bytes.get(i) {
            Some(&q @ (b'\'' | b'"')) => {
                i += 1;
                Some(q)
            }
            _ => None,
        };
        if !bytes.get(i).is_some_and(|&b| is_ident_start(b)) {
            return false;
        }
        let label_start = i;
        i = ident_end(bytes, i);
        let label = &src[label_start..i];
        if let Some(q) = quote {
            if bytes.get(i) != Some(&q) {
                return false;
            }
            i += 1;
        }
        let nl = newline_len(bytes, i);
        if nl == 0 {
            return false;
        }

        let (start, body, end) = if quote == Some(b'\'') {
            (TokenKind::StartNowdoc, TokenKind::Nowdoc, TokenKind::EndNowdoc)
        } else {
            (
                TokenKind::StartHeredoc,
                TokenKind::Heredoc,
                TokenKind::EndHeredoc,
            )
        };
        let opened = (self.pos, self.line, self.col);
        self.emit(start, i + nl);

        while self.pos < bytes.len() {
            let indent = bytes[self.pos..]
                .iter()
                .take_while(|b| matches!(**b, b' ' | b'\t'))
                .count();
            let at = self.pos + indent;
            if bytes[at..].starts_with(label.as_bytes())
                && !bytes
                    .get(at + label.len())
                    .is_some_and(|&b| is_ident_char(b))
            {
                self.emit(end, at + label.len());
                return true;
            }
            let mut line_end = self.pos;
            while line_end < bytes.len() && !matches!(bytes[line_end], b'\r' | b'\n') {
                line_end += 1;
            }
            self.emit(body, line_end + newline_len(bytes, line_end));
        }

        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnterminatedHeredoc {
                label: label.to_string(),
            },
            opened.0,
            opened.1,
            opened.2,
        ));
        true
    }
}
