use core::fmt;

use thiserror::Error;

/// Why a single read, or a scan, stopped.
///
/// Every variant is recoverable: the reader that produced it has already
/// restored the cursor to where the read began.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The cursor was exhausted before a token could start.
    #[error("unexpected end of input")]
    EndOfInput,
    /// Expected content was absent (e.g. no digits after an optional sign).
    #[error("no token")]
    NoToken,
    /// The value does not fit the target width.
    #[error("value out of range")]
    OutOfRange,
    /// A literal format byte disagrees with the input.
    #[error("expected '{}', found '{}'", .expected.escape_ascii(), .found.escape_ascii())]
    LiteralMismatch {
        /// Byte required by the format.
        expected: u8,
        /// Byte found in the input.
        found: u8,
    },
    /// A non-whitespace byte appeared before the expected newline.
    #[error("expected newline, found '{}'", .found.escape_ascii())]
    UnterminatedNewlineMatch {
        /// The offending byte (left unconsumed).
        found: u8,
    },
    /// The conversion at `index` has no output slot.
    #[error("no output slot for conversion {index}")]
    MissingSlot {
        /// Zero-based conversion index.
        index: usize,
    },
    /// The output slot at `index` cannot hold the conversion's value.
    #[error("output slot {index} does not match its conversion")]
    SlotMismatch {
        /// Zero-based conversion index.
        index: usize,
    },
}

/// The field of a [`Record`](crate::Record) a failed read was working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// The leading `:` marker.
    Marker,
    /// Progressive number (hex).
    Prog,
    /// Secondary id, in brackets.
    Number,
    /// `short` scalar.
    Short,
    /// `unsigned short` scalar.
    UShort,
    /// `int` scalar.
    Int,
    /// Hexadecimal `unsigned short`.
    HexUShort,
    /// Hexadecimal `unsigned long`.
    HexULong,
    /// Single-precision float.
    Float,
    /// Extended-precision float.
    LongDouble,
    /// Bounded string token.
    Token,
    /// `DD/MM/YYYY` date.
    Date,
    /// `HH:MM:SS` time.
    Time,
    /// Trailing newline.
    LineEnd,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Marker => "marker",
            Self::Prog => "progressive number",
            Self::Number => "secondary id",
            Self::Short => "short",
            Self::UShort => "unsigned short",
            Self::Int => "int",
            Self::HexUShort => "hex unsigned short",
            Self::HexULong => "hex unsigned long",
            Self::Float => "float",
            Self::LongDouble => "long double",
            Self::Token => "token",
            Self::Date => "date",
            Self::Time => "time",
            Self::LineEnd => "line end",
        })
    }
}

/// A record could not be read. Nothing of it was stored.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{field}: {source} at byte {offset}")]
pub struct RecordError {
    /// Field being read when the failure happened.
    pub field: RecordField,
    /// Cursor position at the failed read.
    pub offset: usize,
    /// Underlying reader failure.
    pub source: ScanError,
}
