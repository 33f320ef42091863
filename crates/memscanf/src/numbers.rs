//! Conversion of lexed numeric tokens into typed values.
//!
//! The readers hand over the exact bytes of a token (sign included); parsing
//! here is strict: a value that does not fit the target is
//! [`ScanError::OutOfRange`], never a truncation.

use core::num::IntErrorKind;

use bstr::ByteSlice;

use crate::error::ScanError;

/// Digit alphabet of an integer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// `[0-9]`
    Decimal,
    /// `[0-9A-Fa-f]`
    Hex,
}

impl Radix {
    #[inline]
    pub(crate) fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    #[inline]
    pub(crate) fn is_digit(self, b: u8) -> bool {
        match self {
            Radix::Decimal => b.is_ascii_digit(),
            Radix::Hex => b.is_ascii_hexdigit(),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Integer types a token can be converted into.
pub trait ScanInt: Copy + sealed::Sealed {
    /// Parses an already lexed token (`[+-]?digits`).
    ///
    /// # Errors
    ///
    /// [`ScanError::OutOfRange`] if the value does not fit `Self`.
    fn from_lexeme(lexeme: &[u8], radix: Radix) -> Result<Self, ScanError>;
}

macro_rules! impl_scan_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl ScanInt for $t {
                fn from_lexeme(lexeme: &[u8], radix: Radix) -> Result<Self, ScanError> {
                    let text = lexeme.to_str().map_err(|_| ScanError::NoToken)?;
                    <$t>::from_str_radix(text, radix.base()).map_err(|e| match e.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            ScanError::OutOfRange
                        }
                        // `-n` into an unsigned target
                        IntErrorKind::InvalidDigit if text.starts_with('-') => {
                            ScanError::OutOfRange
                        }
                        _ => ScanError::NoToken,
                    })
                }
            }
        )*
    };
}

impl_scan_int!(i16, u16, i32, u32, i64, u64);

/// Floating-point types a token can be converted into.
pub trait ScanFloat: Copy + sealed::Sealed {
    /// Narrows an `f64` into `Self`; `None` if a finite value overflows.
    fn narrow(value: f64) -> Option<Self>;

    /// Parses an already lexed token through `f64`, then narrows.
    ///
    /// # Errors
    ///
    /// [`ScanError::NoToken`] if the bytes are not a float literal,
    /// [`ScanError::OutOfRange`] if the value overflows `Self`.
    fn from_lexeme(lexeme: &[u8]) -> Result<Self, ScanError> {
        let text = lexeme.to_str().map_err(|_| ScanError::NoToken)?;
        let wide: f64 = text.parse().map_err(|_| ScanError::NoToken)?;
        if wide.is_infinite() {
            return Err(ScanError::OutOfRange);
        }
        Self::narrow(wide).ok_or(ScanError::OutOfRange)
    }
}

impl sealed::Sealed for f32 {}

impl ScanFloat for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn narrow(value: f64) -> Option<Self> {
        let narrow = value as f32;
        narrow.is_finite().then_some(narrow)
    }
}

impl sealed::Sealed for f64 {}

impl ScanFloat for f64 {
    fn narrow(value: f64) -> Option<Self> {
        Some(value)
    }
}
