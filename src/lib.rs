//! PHP tokenizer and structural annotator.
//!
//! Turns PHP source into an indexed stream of `T_*` tokens annotated with
//! scope, parenthesis, bracket and attribute links, for rule engines that
//! inspect code token by token.
//!
//! The pipeline has three stages, each consuming the previous one's
//! output: [`scanner::scan`] reads characters into base-grammar tokens,
//! [`normalizer::normalize`] rewrites them into one modern grammar, and
//! [`mapper::map`] links delimiters and scopes. The result is an
//! immutable [`TokenStore`].
//!
//! # Quick start
//!
//! ```
//! use phptokens::{Config, TokenKind, tokenize};
//!
//! let store = tokenize("<?php function f($a) { return $a?->b; }", &Config::new());
//! let function = store.find_next(TokenKind::Function, 0).unwrap();
//! let opener = store.scope_opener(function).unwrap();
//! let closer = store.scope_closer(function).unwrap();
//! assert_eq!(store[opener].text, "{");
//! assert_eq!(store[closer].text, "}");
//!
//! let nullsafe = store.find_next(TokenKind::NullsafeObjectOperator, 0).unwrap();
//! assert_eq!(store.conditions(nullsafe), &[(function, TokenKind::Function)]);
//! ```
//!
//! ## Targeting an older revision
//!
//! ```
//! use phptokens::{Config, PhpVersion, TokenKind, tokenize};
//!
//! let config = Config::new().php_version(PhpVersion::V7_4);
//! let store = tokenize("<?php $m = match($x) {};", &config);
//! assert!(store.find_next(TokenKind::Match, 0).is_none());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod diagnostic;
mod lookup;
pub mod mapper;
pub mod normalizer;
pub mod overlay;
pub mod scanner;
pub mod store;
pub mod token;

use std::path::Path;

pub use config::{Config, DecodeError, DecodeErrorKind, Encoding, PhpVersion, VersionParseError};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use overlay::Overlay;
pub use store::{Search, TokenStore};
pub use token::{KindSet, Pair, ParenLink, ScopeLink, Token, TokenKind};

/// Unified error type for the fallible entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input bytes could not be decoded.
    #[error("{0}")]
    Decode(#[from] DecodeError),
    /// A revision hint could not be parsed.
    #[error("{0}")]
    Version(#[from] VersionParseError),
    /// A file could not be read.
    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

/// Tokenize decoded source text. Never fails: anomalies are reported as
/// diagnostics and unresolved links as `None`.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn tokenize(source: &str, config: &Config) -> TokenStore {
    let scanned = scanner::scan(source, config);
    let tokens = normalizer::normalize(scanned.tokens, config);
    let mapped = mapper::map(tokens);
    let mut diagnostics = scanned.diagnostics;
    diagnostics.extend(mapped.diagnostics);
    TokenStore::new(mapped.tokens, diagnostics, config.clone())
}

/// Decode `bytes` with the configured encoding, then tokenize.
pub fn tokenize_bytes(bytes: &[u8], config: &Config) -> Result<TokenStore, Error> {
    let source = config.encoding.decode(bytes)?;
    Ok(tokenize(&source, config))
}

/// Read and tokenize a file.
pub fn tokenize_file(path: &Path, config: &Config) -> Result<TokenStore, Error> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tokenize_bytes(&bytes, config)
}
