//! Token readers: one lexical token per call.
//!
//! Contract shared by every reader
//! - Success: the converted value is returned and the cursor sits just past
//!   the token.
//! - Failure: a [`ScanError`] is returned and the cursor is back where the
//!   call found it, including any leading whitespace the reader skipped.
//!
//! Readers lex first, borrowing the token straight from the buffer via
//! [`Cursor::token`], then convert it; nothing is copied on the way.

use crate::{
    cursor::{Cursor, is_space},
    error::ScanError,
    numbers::{Radix, ScanFloat, ScanInt},
};

/// Runs `read`, restoring the cursor position if it fails.
#[inline]
fn attempt<'src, T>(
    cursor: &mut Cursor<'src>,
    read: impl FnOnce(&mut Cursor<'src>) -> Result<T, ScanError>,
) -> Result<T, ScanError> {
    let start = cursor.position();
    let result = read(cursor);
    if result.is_err() {
        cursor.rewind(start);
    }
    result
}

#[inline]
fn is_sign(b: Option<u8>) -> bool {
    matches!(b, Some(b'+' | b'-'))
}

/// Reads a signed decimal integer: `[+-]?[0-9]+`.
///
/// ```
/// use memscanf::{Cursor, readers};
///
/// let mut cursor = Cursor::new(b"  -42]");
/// assert_eq!(readers::read_signed::<i16>(&mut cursor), Ok(-42));
/// assert_eq!(cursor.peek(), Some(b']'));
/// ```
///
/// # Errors
///
/// [`ScanError::EndOfInput`] if only whitespace remains,
/// [`ScanError::NoToken`] if no digit follows the optional sign,
/// [`ScanError::OutOfRange`] if the value does not fit `T`.
pub fn read_signed<T: ScanInt>(cursor: &mut Cursor<'_>) -> Result<T, ScanError> {
    read_integer(cursor, Radix::Decimal, true)
}

/// Reads an unsigned decimal integer: `[0-9]+`.
///
/// # Errors
///
/// As [`read_signed`].
pub fn read_unsigned<T: ScanInt>(cursor: &mut Cursor<'_>) -> Result<T, ScanError> {
    read_integer(cursor, Radix::Decimal, false)
}

/// Reads a hexadecimal integer without prefix: `[0-9A-Fa-f]+`.
///
/// # Errors
///
/// As [`read_signed`].
pub fn read_hex<T: ScanInt>(cursor: &mut Cursor<'_>) -> Result<T, ScanError> {
    read_integer(cursor, Radix::Hex, false)
}

/// Reads an integer token of the given radix, with an optional leading sign
/// when `allow_sign` is set, and converts it into `T`.
///
/// # Errors
///
/// As [`read_signed`].
pub fn read_integer<T: ScanInt>(
    cursor: &mut Cursor<'_>,
    radix: Radix,
    allow_sign: bool,
) -> Result<T, ScanError> {
    attempt(cursor, |c| {
        c.skip_whitespace();
        c.begin_read();
        if c.at_end() {
            return Err(ScanError::EndOfInput);
        }
        if allow_sign && is_sign(c.peek()) {
            c.advance();
        }
        if c.consume_while(|b| radix.is_digit(b)).is_empty() {
            return Err(ScanError::NoToken);
        }
        T::from_lexeme(c.token(), radix)
    })
}

/// Reads a floating-point literal and converts it into `T`.
///
/// Grammar: `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least
/// one mantissa digit. An exponent marker that is not followed by digits is
/// pushed back and left for the next read, as is its sign.
///
/// A lone sign is rejected with [`ScanError::NoToken`].
///
/// ```
/// use memscanf::{Cursor, readers};
///
/// let mut cursor = Cursor::new(b"-1.25e2x");
/// assert_eq!(readers::read_float::<f64>(&mut cursor), Ok(-125.0));
/// assert_eq!(cursor.remaining(), b"x");
/// ```
///
/// # Errors
///
/// [`ScanError::EndOfInput`] if only whitespace remains,
/// [`ScanError::NoToken`] if no mantissa digit was found,
/// [`ScanError::OutOfRange`] if the value overflows `T`.
pub fn read_float<T: ScanFloat>(cursor: &mut Cursor<'_>) -> Result<T, ScanError> {
    attempt(cursor, |c| {
        c.skip_whitespace();
        c.begin_read();
        if c.at_end() {
            return Err(ScanError::EndOfInput);
        }
        if is_sign(c.peek()) {
            c.advance();
        }
        let mut digits = c.consume_while(|b| b.is_ascii_digit()).len();
        if c.peek() == Some(b'.') {
            c.advance();
            digits += c.consume_while(|b| b.is_ascii_digit()).len();
        }
        if digits == 0 {
            return Err(ScanError::NoToken);
        }
        if matches!(c.peek(), Some(b'e' | b'E')) {
            c.advance();
            let signed = is_sign(c.peek());
            if signed {
                c.advance();
            }
            if c.consume_while(|b| b.is_ascii_digit()).is_empty() {
                if signed {
                    c.retreat_one();
                }
                c.retreat_one();
            }
        }
        T::from_lexeme(c.token())
    })
}

/// Reads exactly one byte, whitespace included.
///
/// # Errors
///
/// [`ScanError::EndOfInput`] at the end of the buffer.
pub fn read_char(cursor: &mut Cursor<'_>) -> Result<u8, ScanError> {
    cursor.begin_read();
    cursor.advance().ok_or(ScanError::EndOfInput)
}

/// Skips whitespace, then reads a maximal run of non-whitespace bytes.
///
/// `max_len` is the capacity of the destination including the C terminator
/// slot: the returned slice holds at most `max_len - 1` bytes. Bytes past the
/// cap are still consumed.
///
/// ```
/// use memscanf::{Cursor, readers};
///
/// let mut cursor = Cursor::new(b"abcdef ");
/// assert_eq!(readers::read_string(&mut cursor, 4), Ok(&b"abc"[..]));
/// assert_eq!(cursor.position(), 6);
/// ```
///
/// # Errors
///
/// [`ScanError::EndOfInput`] if only whitespace remains.
pub fn read_string<'src>(
    cursor: &mut Cursor<'src>,
    max_len: usize,
) -> Result<&'src [u8], ScanError> {
    attempt(cursor, |c| {
        c.skip_whitespace();
        c.begin_read();
        let token = c.consume_while(|b| !is_space(b));
        if token.is_empty() {
            return Err(ScanError::EndOfInput);
        }
        Ok(&token[..token.len().min(max_len.saturating_sub(1))])
    })
}

/// Reads one byte and requires it to be `expected`. A mismatching byte is
/// pushed back.
///
/// # Errors
///
/// [`ScanError::EndOfInput`] at the end of the buffer,
/// [`ScanError::LiteralMismatch`] on any other byte.
pub fn expect_byte(cursor: &mut Cursor<'_>, expected: u8) -> Result<(), ScanError> {
    match read_char(cursor)? {
        b if b == expected => Ok(()),
        found => {
            cursor.retreat_one();
            Err(ScanError::LiteralMismatch { expected, found })
        }
    }
}

/// Consumes whitespace up to and including the next `\n`. Running out of
/// input before the newline is accepted.
///
/// Unlike the token readers, whitespace consumed before a failure stays
/// consumed; only the offending byte is pushed back.
///
/// # Errors
///
/// [`ScanError::UnterminatedNewlineMatch`] if a non-whitespace byte comes
/// first.
pub fn match_newline(cursor: &mut Cursor<'_>) -> Result<(), ScanError> {
    cursor.begin_read();
    loop {
        match cursor.advance() {
            None | Some(b'\n') => return Ok(()),
            Some(b) if is_space(b) => {}
            Some(found) => {
                cursor.retreat_one();
                return Err(ScanError::UnterminatedNewlineMatch { found });
            }
        }
    }
}
