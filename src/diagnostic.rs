//! Recoverable anomalies found while tokenizing.

use std::fmt;

/// Classifies a recoverable lexical or structural anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Quoted string still open at end of input.
    UnterminatedString,
    /// Block comment still open at end of input.
    UnterminatedComment,
    /// Doc comment still open at end of input.
    UnterminatedDocComment,
    /// Heredoc or nowdoc whose closing label never appeared.
    UnterminatedHeredoc { label: String },
    /// Attribute region (`#[`) never closed.
    UnterminatedAttribute,
    /// Numeric literal with digits its radix does not allow.
    InvalidNumericLiteral,
    /// Malformed `\u{...}` escape sequence.
    InvalidEscape,
    /// Byte that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedComment => write!(f, "unterminated comment"),
            Self::UnterminatedDocComment => write!(f, "unterminated doc comment"),
            Self::UnterminatedHeredoc { label } => {
                write!(
                    f,
                    "unterminated heredoc, \
                     expected closing label: {label}"
                )
            }
            Self::UnterminatedAttribute => write!(f, "unterminated attribute"),
            Self::InvalidNumericLiteral => write!(f, "invalid numeric literal"),
            Self::InvalidEscape => write!(f, "invalid unicode escape sequence"),
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {}", ch.escape_default())
            }
        }
    }
}

/// A low-severity finding attached to a token position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Position of the token containing the anomaly.
    pub position: usize,
    /// Byte offset of the anomaly in the decoded source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(kind: DiagnosticKind, offset: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            position: 0,
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind, self.line, self.column
        )
    }
}
