//! Doc-block splitting.

use super::newline_len;
use crate::token::TokenKind;

const fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'\\')
}

/// Split a `/** ... */` comment into `(kind, byte length)` parts.
///
/// `closed` is `false` when the comment ran to end of input, in which
/// case no close tag is produced.
pub(super) fn split(text: &str, closed: bool) -> Vec<(TokenKind, usize)> {
    let bytes = text.as_bytes();
    let body_end = if closed { bytes.len() - 2 } else { bytes.len() };
    let mut parts = vec![(TokenKind::DocCommentOpenTag, 3)];
    let mut i = 3;
    let mut line_start = false;
    let mut word_start = true;

    while i < body_end {
        let rest = &bytes[i..body_end];
        let part = match rest[0] {
            b' ' | b'\t' | b'\r' | b'\n' => {
                let blanks = rest
                    .iter()
                    .take_while(|b| matches!(**b, b' ' | b'\t'))
                    .count();
                let nl = newline_len(rest, blanks);
                line_start |= nl > 0;
                word_start = true;
                (TokenKind::DocCommentWhitespace, blanks + nl)
            }
            b'*' if line_start => {
                line_start = false;
                word_start = true;
                (TokenKind::DocCommentStar, 1)
            }
            b'@' if word_start && rest.get(1).is_some_and(|&b| is_tag_char(b)) => {
                line_start = false;
                word_start = false;
                let len = 1 + rest[1..].iter().take_while(|&&b| is_tag_char(b)).count();
                (TokenKind::DocCommentTag, len)
            }
            _ => {
                line_start = false;
                word_start = false;
                let line = rest
                    .iter()
                    .position(|b| matches!(*b, b'\r' | b'\n'))
                    .unwrap_or(rest.len());
                let trimmed = rest[..line]
                    .iter()
                    .rposition(|b| !matches!(*b, b' ' | b'\t'))
                    .map_or(line, |p| p + 1);
                (TokenKind::DocCommentString, trimmed)
            }
        };
        i += part.1;
        parts.push(part);
    }

    if closed {
        parts.push((TokenKind::DocCommentCloseTag, 2));
    }
    parts
}
