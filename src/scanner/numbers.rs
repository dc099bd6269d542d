//! Numeric literal grammar.
//!
//! The scanner reads literals with the base grammar (no digit separators,
//! no `0o` prefix); the normalizer re-reads candidate merges with the
//! modern grammar through [`classify_literal`].

use crate::token::TokenKind;

/// Result of reading one numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberScan {
    pub len: usize,
    pub kind: TokenKind,
    /// `false` for literals such as `089` that no revision accepts.
    pub valid: bool,
}

/// Which grammar revision to read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Base,
    Modern,
}

/// Read a numeric literal at the start of `bytes`.
///
/// `bytes` must start with an ASCII digit, or with `.` followed by one.
#[must_use]
pub fn scan_number(bytes: &[u8], grammar: Grammar) -> NumberScan {
    let modern = grammar == Grammar::Modern;
    if bytes.first() == Some(&b'0') {
        let prefixed = match bytes.get(1) {
            Some(b'x' | b'X') => Some((16, u8::is_ascii_hexdigit as fn(&u8) -> bool)),
            Some(b'b' | b'B') => Some((2, is_binary as fn(&u8) -> bool)),
            Some(b'o' | b'O') if modern => Some((8, is_octal as fn(&u8) -> bool)),
            _ => None,
        };
        if let Some((radix, pred)) = prefixed {
            let digits = digit_run(&bytes[2..], pred, modern);
            if digits > 0 {
                let len = 2 + digits;
                return NumberScan {
                    len,
                    kind: integer_kind(&bytes[2..len], radix),
                    valid: true,
                };
            }
        }
    }

    let mut len = digit_run(bytes, u8::is_ascii_digit, modern);
    let mut float = false;
    if bytes.get(len) == Some(&b'.') {
        let fraction = digit_run(&bytes[len + 1..], u8::is_ascii_digit, modern);
        if len > 0 || fraction > 0 {
            float = true;
            len += 1 + fraction;
        }
    }
    if len > 0 && matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = digit_run(&bytes[(len + 1 + sign).min(bytes.len())..], u8::is_ascii_digit, modern);
        if exponent > 0 {
            float = true;
            len += 1 + sign + exponent;
        }
    }

    if float {
        return NumberScan {
            len,
            kind: TokenKind::DNumber,
            valid: true,
        };
    }

    let text = &bytes[..len];
    if text.len() > 1 && text[0] == b'0' {
        // Legacy octal: a leading zero makes every digit octal.
        let octal = &text[1..];
        let valid = octal.iter().all(|b| is_octal(b) || *b == b'_');
        let kind = if valid {
            integer_kind(octal, 8)
        } else {
            TokenKind::LNumber
        };
        return NumberScan { len, kind, valid };
    }

    NumberScan {
        len,
        kind: integer_kind(text, 10),
        valid: true,
    }
}

/// Classify `text` as a complete modern numeric literal.
#[must_use]
pub fn classify_literal(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let starts_numeric = match bytes.first() {
        Some(b) if b.is_ascii_digit() => true,
        Some(b'.') => bytes.get(1).is_some_and(u8::is_ascii_digit),
        _ => false,
    };
    if !starts_numeric {
        return None;
    }
    let scan = scan_number(bytes, Grammar::Modern);
    (scan.len == bytes.len() && scan.valid).then_some(scan.kind)
}

/// Length of a digit run, allowing single `_` separators between digits
/// under the modern grammar.
fn digit_run(bytes: &[u8], pred: fn(&u8) -> bool, separators: bool) -> usize {
    let mut i = 0;
    while i < bytes.len() {
        if pred(&bytes[i]) {
            i += 1;
        } else if separators
            && bytes[i] == b'_'
            && i > 0
            && bytes.get(i + 1).is_some_and(|b| pred(b))
        {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Integers past the signed 64-bit range are floats.
fn integer_kind(digits: &[u8], radix: u32) -> TokenKind {
    let mut value: u128 = 0;
    for &b in digits {
        if b == b'_' {
            continue;
        }
        let Some(d) = char::from(b).to_digit(radix) else {
            return TokenKind::LNumber;
        };
        value = value.saturating_mul(u128::from(radix)).saturating_add(u128::from(d));
    }
    if value > i64::MAX as u128 {
        TokenKind::DNumber
    } else {
        TokenKind::LNumber
    }
}

const fn is_binary(b: &u8) -> bool {
    matches!(*b, b'0' | b'1')
}

const fn is_octal(b: &u8) -> bool {
    matches!(*b, b'0'..=b'7')
}
