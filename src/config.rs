//! Tokenizer configuration and input decoding.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A language revision, ordered by `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhpVersion {
    pub major: u8,
    pub minor: u8,
}

impl PhpVersion {
    pub const V7_3: Self = Self::new(7, 3);
    pub const V7_4: Self = Self::new(7, 4);
    pub const V8_0: Self = Self::new(8, 0);
    pub const V8_1: Self = Self::new(8, 1);
    pub const V8_2: Self = Self::new(8, 2);

    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error produced when a version hint cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid PHP version: {input}")]
pub struct VersionParseError {
    pub input: String,
}

impl FromStr for PhpVersion {
    type Err = VersionParseError;

    /// Accepts `8.1`, `8.1.12` and the integer form `80100`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError {
            input: s.to_string(),
        };
        let s = s.trim();
        if !s.contains('.') {
            let id: u32 = s.parse().map_err(|_| err())?;
            let major = u8::try_from(id / 10_000).map_err(|_| err())?;
            let minor = u8::try_from((id / 100) % 100).map_err(|_| err())?;
            if major == 0 {
                return Err(err());
            }
            return Ok(Self::new(major, minor));
        }
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(err)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(err)?;
        if let Some(patch) = parts.next() {
            patch.parse::<u32>().map_err(|_| err())?;
        }
        if parts.next().is_some() || major == 0 {
            return Err(err());
        }
        Ok(Self::new(major, minor))
    }
}

/// Declared text encoding of the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

impl FromStr for Encoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            _ => Err(DecodeError {
                kind: DecodeErrorKind::UnsupportedEncoding(s.to_string()),
                offset: 0,
            }),
        }
    }
}

/// Classifies a fatal decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Bytes are not valid UTF-8.
    InvalidUtf8,
    /// The declared encoding is not supported.
    UnsupportedEncoding(String),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "input is not valid UTF-8"),
            Self::UnsupportedEncoding(name) => write!(f, "unsupported encoding: {name}"),
        }
    }
}

/// The only error that stops tokenization: input that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

impl Encoding {
    /// Decode raw bytes into source text.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` when the bytes are invalid for this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, DecodeError> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| DecodeError {
                    kind: DecodeErrorKind::InvalidUtf8,
                    offset: e.valid_up_to(),
                }),
            Self::Latin1 => Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
        }
    }
}

/// Settings for one tokenization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tab_width: usize,
    pub php_version: Option<PhpVersion>,
    pub extensions: BTreeSet<String>,
    pub encoding: Encoding,
}

impl Config {
    /// Default configuration: no tab expansion, modern output, `.php`/`.inc`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab_width: 0,
            php_version: None,
            extensions: ["php", "inc"].iter().map(|e| (*e).to_string()).collect(),
            encoding: Encoding::Utf8,
        }
    }

    /// Expand tabs to the next multiple of `width` columns (0 disables).
    #[must_use]
    pub const fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Target an older language revision.
    #[must_use]
    pub const fn php_version(mut self, version: PhpVersion) -> Self {
        self.php_version = Some(version);
        self
    }

    /// Accept another file extension (without the dot).
    #[must_use]
    pub fn extension(mut self, ext: &str) -> Self {
        self.extensions.insert(ext.trim_start_matches('.').to_ascii_lowercase());
        self
    }

    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Whether a rule introduced in `since` applies under this configuration.
    #[must_use]
    pub fn allows(&self, since: Option<PhpVersion>) -> bool {
        match (since, self.php_version) {
            (Some(since), Some(target)) => target >= since,
            _ => true,
        }
    }

    /// Whether `path` has one of the configured extensions.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_ascii_lowercase()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
