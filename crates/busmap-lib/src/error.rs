use thiserror::Error;

/// Convenient result alias for the busmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the input stream ends in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Raised when a list is not terminated before the stream ends.
    #[error("unterminated list")]
    MalformedList,

    /// Raised when a mapping entry is not shaped `"key": value`.
    #[error("malformed mapping: {reason}")]
    MalformedMap { reason: &'static str },

    /// Raised when a string literal is unterminated or contains a bad
    /// escape or a raw line break.
    #[error("bad string literal: {reason}")]
    BadStringLiteral { reason: &'static str },

    /// Raised when a `true`/`false`/`null` keyword is misspelled.
    #[error("bad literal, expected `{expected}`")]
    BadLiteral { expected: &'static str },

    /// Raised when numeric text cannot be interpreted as a number.
    #[error("bad number `{text}`")]
    BadNumber { text: String },

    /// Raised when a value is accessed as a shape it does not hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Raised when a mapping lacks a key the document schema requires.
    #[error("missing key `{key}` in request document")]
    MissingKey { key: &'static str },

    /// Raised when a request carries a type tag other than "Stop" or "Bus".
    #[error("unknown request type `{kind}`")]
    UnknownRequestType { kind: String },

    /// Raised when a color specification is neither a 3/4-channel list nor
    /// a string, or a channel is out of range.
    #[error("invalid color specification")]
    BadColor,

    /// Raised when render settings declare an empty color palette.
    #[error("color palette must not be empty")]
    EmptyPalette,

    /// Raised when a map is requested from a document without render settings.
    #[error("document has no render_settings section")]
    MissingRenderSettings,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
