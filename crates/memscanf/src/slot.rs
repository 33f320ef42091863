//! Typed output destinations for the format interpreter.

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::{BStr, ByteSlice};

use crate::format::{Conversion, FloatWidth, IntWidth};

/// Capacity of a [`Token`], terminator slot included.
pub const TOKEN_CAPACITY: usize = 64;

/// A bounded byte string stored inline, holding at most
/// `TOKEN_CAPACITY - 1` bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token {
    bytes: [u8; TOKEN_CAPACITY],
    len: u8,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            bytes: [0; TOKEN_CAPACITY],
            len: 0,
        }
    }
}

impl Token {
    /// Builds a token from `bytes`, truncated to the capacity.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut token = Self::default();
        token.set(bytes);
        token
    }

    /// Replaces the content with `bytes`, truncated to the capacity.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(TOKEN_CAPACITY - 1);
        self.bytes[..len].copy_from_slice(&bytes[..len]);
        self.len = len as u8;
    }

    /// The stored bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// The stored bytes as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// Removes one leading and one trailing quote (`'` or `"`), if present.
    pub fn strip_quotes(&mut self) {
        let mut bytes = self.as_bytes();
        if let [b'\'' | b'"', rest @ ..] = bytes {
            bytes = rest;
        }
        if let [rest @ .., b'\'' | b'"'] = bytes {
            bytes = rest;
        }
        let stripped = Self::new(bytes);
        *self = stripped;
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Token {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_bytes().to_str_lossy())
    }
}

/// Where one conversion's value goes.
///
/// Each variant borrows the caller's destination; the interpreter checks that
/// a slot agrees with its conversion before reading anything.
///
/// | conversion | slot |
/// |---|---|
/// | `%hd` / `%d` / `%ld` | `I16` / `I32` / `I64` |
/// | `%hu` `%hx` / `%u` `%x` / `%lu` `%lx` | `U16` / `U32` / `U64` |
/// | `%f` / `%lf` / `%Lf` | `F32` / `F64` / `Extended` |
/// | `%c` | `Byte` |
/// | `%s` | `Bytes`, `Text` or `Token` |
#[derive(Debug)]
pub enum OutputSlot<'a> {
    /// `short`
    I16(&'a mut i16),
    /// `unsigned short`
    U16(&'a mut u16),
    /// `int`
    I32(&'a mut i32),
    /// `unsigned int`
    U32(&'a mut u32),
    /// `long`
    I64(&'a mut i64),
    /// `unsigned long`
    U64(&'a mut u64),
    /// `float`
    F32(&'a mut f32),
    /// `double`
    F64(&'a mut f64),
    /// `long double`, carried as `f64`.
    Extended(&'a mut f64),
    /// `char`
    Byte(&'a mut u8),
    /// String destination; replaced with the (capped) token bytes.
    Bytes(&'a mut Vec<u8>),
    /// String destination; replaced with the (capped) token, lossily decoded.
    Text(&'a mut String),
    /// Inline string destination, additionally capped at its own capacity.
    Token(&'a mut Token),
}

impl OutputSlot<'_> {
    /// Whether this slot can receive the value of `conversion`.
    #[must_use]
    pub fn accepts(&self, conversion: Conversion) -> bool {
        use Conversion as C;
        use FloatWidth as F;
        use IntWidth as W;

        matches!(
            (conversion, self),
            (C::Decimal(W::Short), Self::I16(_))
                | (C::Decimal(W::Int), Self::I32(_))
                | (C::Decimal(W::Long), Self::I64(_))
                | (C::Unsigned(W::Short) | C::Hex(W::Short), Self::U16(_))
                | (C::Unsigned(W::Int) | C::Hex(W::Int), Self::U32(_))
                | (C::Unsigned(W::Long) | C::Hex(W::Long), Self::U64(_))
                | (C::Float(F::Single), Self::F32(_))
                | (C::Float(F::Double), Self::F64(_))
                | (C::Float(F::Extended), Self::Extended(_))
                | (C::Char, Self::Byte(_))
                | (
                    C::String { .. },
                    Self::Bytes(_) | Self::Text(_) | Self::Token(_)
                )
        )
    }

    /// Stores a string token into a string slot. Returns `false` for any
    /// other slot.
    pub(crate) fn store_bytes(&mut self, bytes: &[u8]) -> bool {
        match self {
            Self::Bytes(dst) => {
                dst.clear();
                dst.extend_from_slice(bytes);
            }
            Self::Text(dst) => {
                dst.clear();
                dst.push_str(&bytes.to_str_lossy());
            }
            Self::Token(dst) => dst.set(bytes),
            _ => return false,
        }
        true
    }
}

macro_rules! impl_from_slot {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $t> for OutputSlot<'a> {
                fn from(dst: &'a mut $t) -> Self {
                    OutputSlot::$variant(dst)
                }
            }
        )*
    };
}

// `f64` maps to `F64`; `%Lf` destinations use `OutputSlot::Extended` directly.
impl_from_slot!(
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    u8 => Byte,
    Vec<u8> => Bytes,
    String => Text,
    Token => Token,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_truncates_to_capacity() {
        let long = [b'a'; 100];
        let token = Token::new(&long);
        assert_eq!(token.as_bytes().len(), TOKEN_CAPACITY - 1);
    }

    #[test]
    fn strip_quotes_removes_one_pair_at_most() {
        let mut t = Token::new(b"\"tok'");
        t.strip_quotes();
        assert_eq!(t.as_bytes(), b"tok");

        let mut t = Token::new(b"''");
        t.strip_quotes();
        assert_eq!(t.as_bytes(), b"");

        let mut t = Token::new(b"'");
        t.strip_quotes();
        assert_eq!(t.as_bytes(), b"");

        let mut t = Token::new(b"plain");
        t.strip_quotes();
        assert_eq!(t.as_bytes(), b"plain");
    }

    #[test]
    fn slots_match_conversions() {
        let mut short = 0i16;
        let mut long = 0.0f64;
        assert!(OutputSlot::from(&mut short).accepts(Conversion::Decimal(IntWidth::Short)));
        assert!(!OutputSlot::from(&mut short).accepts(Conversion::Unsigned(IntWidth::Short)));
        assert!(OutputSlot::from(&mut long).accepts(Conversion::Float(FloatWidth::Double)));
        assert!(!OutputSlot::from(&mut long).accepts(Conversion::Float(FloatWidth::Extended)));
        assert!(OutputSlot::Extended(&mut long).accepts(Conversion::Float(FloatWidth::Extended)));
    }

    #[test]
    fn string_slots_replace_content() {
        let mut text = alloc::string::String::from("old");
        assert!(OutputSlot::Text(&mut text).store_bytes(b"new"));
        assert_eq!(text, "new");
        let mut n = 0u32;
        assert!(!OutputSlot::U32(&mut n).store_bytes(b"1"));
    }
}
