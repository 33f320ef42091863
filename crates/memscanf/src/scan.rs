//! The format interpreter.
//!
//! A [`FormatProgram`] runs left to right in lockstep with a [`Cursor`],
//! dispatching each conversion to its token reader and storing the value into
//! the next [`OutputSlot`]. The first failure halts the run; values stored
//! before it stay stored.

use crate::{
    cursor::Cursor,
    error::ScanError,
    format::{Conversion, FormatProgram, Instruction},
    numbers::Radix,
    readers,
    slot::OutputSlot,
};

/// Result of running a [`FormatProgram`] over a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Conversions that completed, `0..=program.conversions()`.
    pub matched: usize,
    /// Cursor position when the run ended.
    pub position: usize,
    /// Why the run stopped early, if it did.
    pub halted: Option<ScanError>,
}

impl ScanOutcome {
    /// Whether every instruction ran.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}

impl FormatProgram {
    /// Runs the program, taking one slot per conversion in order.
    ///
    /// The cursor is left where the run stopped. Individual readers never
    /// leave a half-read token behind, but the run as a whole is not rolled
    /// back.
    ///
    /// ```
    /// use memscanf::{Cursor, FormatProgram, OutputSlot};
    ///
    /// let program = FormatProgram::compile("%hd/%hd/%hd");
    /// let (mut d, mut m, mut y) = (0i16, 0i16, 0i16);
    /// let mut cursor = Cursor::new(b"01/12/2020 rest");
    /// let outcome = program.scan(
    ///     &mut cursor,
    ///     &mut [(&mut d).into(), (&mut m).into(), (&mut y).into()],
    /// );
    /// assert_eq!(outcome.matched, 3);
    /// assert_eq!((d, m, y), (1, 12, 2020));
    /// assert_eq!(cursor.remaining(), b" rest");
    /// ```
    pub fn scan(&self, cursor: &mut Cursor<'_>, slots: &mut [OutputSlot<'_>]) -> ScanOutcome {
        let mut matched = 0;
        let mut halted = None;
        for instruction in self.instructions() {
            let step = match *instruction {
                Instruction::Literal(expected) => readers::expect_byte(cursor, expected),
                Instruction::WhitespaceSkip => {
                    cursor.skip_whitespace();
                    Ok(())
                }
                Instruction::NewlineMatch => readers::match_newline(cursor),
                Instruction::Unsupported { .. } => Ok(()),
                Instruction::Convert(conversion) => {
                    convert_into(cursor, conversion, slots, matched).map(|()| matched += 1)
                }
            };
            if let Err(err) = step {
                halted = Some(err);
                break;
            }
        }
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            matched <= self.conversions() && cursor.position() <= cursor.limit(),
            "Internal error: scan overran its program or buffer"
        );
        ScanOutcome {
            matched,
            position: cursor.position(),
            halted,
        }
    }
}

fn convert_into(
    cursor: &mut Cursor<'_>,
    conversion: Conversion,
    slots: &mut [OutputSlot<'_>],
    index: usize,
) -> Result<(), ScanError> {
    let slot = slots
        .get_mut(index)
        .ok_or(ScanError::MissingSlot { index })?;
    if !slot.accepts(conversion) {
        return Err(ScanError::SlotMismatch { index });
    }
    let mismatch = ScanError::SlotMismatch { index };
    match conversion {
        Conversion::Decimal(_) => store_integer(cursor, slot, Radix::Decimal, true, mismatch),
        Conversion::Unsigned(_) => store_integer(cursor, slot, Radix::Decimal, false, mismatch),
        Conversion::Hex(_) => store_integer(cursor, slot, Radix::Hex, false, mismatch),
        Conversion::Float(_) => match slot {
            OutputSlot::F32(dst) => readers::read_float(cursor).map(|v| **dst = v),
            OutputSlot::F64(dst) | OutputSlot::Extended(dst) => {
                readers::read_float(cursor).map(|v| **dst = v)
            }
            _ => Err(mismatch),
        },
        Conversion::Char => match slot {
            OutputSlot::Byte(dst) => readers::read_char(cursor).map(|v| **dst = v),
            _ => Err(mismatch),
        },
        Conversion::String { capacity } => {
            let token = readers::read_string(cursor, capacity)?;
            if slot.store_bytes(token) {
                Ok(())
            } else {
                Err(mismatch)
            }
        }
    }
}

fn store_integer(
    cursor: &mut Cursor<'_>,
    slot: &mut OutputSlot<'_>,
    radix: Radix,
    allow_sign: bool,
    mismatch: ScanError,
) -> Result<(), ScanError> {
    match slot {
        OutputSlot::I16(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        OutputSlot::U16(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        OutputSlot::I32(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        OutputSlot::U32(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        OutputSlot::I64(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        OutputSlot::U64(dst) => **dst = readers::read_integer(cursor, radix, allow_sign)?,
        _ => return Err(mismatch),
    }
    Ok(())
}

/// Scans `buffer` from `*position` with `format`, writing the final position
/// back into `position` and returning the number of conversions stored.
///
/// This is the buffer-level entry point: it reports only a count. Use
/// [`FormatProgram::scan`] for the reason a scan stopped.
///
/// ```
/// use memscanf::{OutputSlot, scan_buffer};
///
/// let buffer = b"7 beta\n8 gamma\n";
/// let mut position = 0;
/// let mut n = 0i32;
/// let mut name = String::new();
/// let matched = scan_buffer(
///     buffer,
///     &mut position,
///     "%d %s\n",
///     &mut [OutputSlot::I32(&mut n), OutputSlot::Text(&mut name)],
/// );
/// assert_eq!((matched, n, name.as_str(), position), (2, 7, "beta", 7));
/// ```
pub fn scan_buffer(
    buffer: &[u8],
    position: &mut usize,
    format: &str,
    slots: &mut [OutputSlot<'_>],
) -> usize {
    scan_buffer_with(buffer, position, &FormatProgram::compile(format), slots)
}

/// Like [`scan_buffer`], with a precompiled program.
pub fn scan_buffer_with(
    buffer: &[u8],
    position: &mut usize,
    program: &FormatProgram,
    slots: &mut [OutputSlot<'_>],
) -> usize {
    let mut cursor = Cursor::at(buffer, *position);
    let outcome = program.scan(&mut cursor, slots);
    *position = outcome.position;
    outcome.matched
}

/// Scans a buffer with a format and a list of destinations, converting each
/// destination into an [`OutputSlot`].
///
/// ```
/// use memscanf::scan;
///
/// let (mut a, mut b) = (0u16, 0u64);
/// let mut position = 0;
/// let matched = scan!(b"ff:10", &mut position, "%hx:%lu", &mut a, &mut b);
/// assert_eq!((matched, a, b), (2, 255, 10));
/// ```
#[macro_export]
macro_rules! scan {
    ($buffer:expr, $position:expr, $format:expr $(, $slot:expr)* $(,)?) => {
        $crate::scan_buffer(
            $buffer,
            $position,
            $format,
            &mut [$($crate::OutputSlot::from($slot)),*],
        )
    };
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use alloc::{string::String, vec::Vec};

    use super::*;

    #[test]
    fn partial_match_keeps_earlier_values() {
        let program = FormatProgram::compile("%d %d %d");
        let (mut a, mut b, mut c) = (0i32, 0i32, -1i32);
        let mut cursor = Cursor::new(b"1 2 x");
        let outcome = program.scan(
            &mut cursor,
            &mut [
                OutputSlot::I32(&mut a),
                OutputSlot::I32(&mut b),
                OutputSlot::I32(&mut c),
            ],
        );
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.halted, Some(ScanError::NoToken));
        assert_eq!((a, b, c), (1, 2, -1));
        // The whitespace directive ran; the failed reader restored its own start.
        assert_eq!(outcome.position, 4);
    }

    #[test]
    fn first_failure_matches_zero() {
        let mut n = 0i32;
        let mut position = 0;
        assert_eq!(scan!(b"abc", &mut position, "%d", &mut n), 0);
        assert_eq!(position, 0);
    }

    #[test]
    fn literal_mismatch_pushes_back_and_halts() {
        let program = FormatProgram::compile("%hd]%hd");
        let (mut a, mut b) = (0i16, 0i16);
        let mut cursor = Cursor::new(b"5)6");
        let outcome = program.scan(&mut cursor, &mut [(&mut a).into(), (&mut b).into()]);
        assert_eq!(outcome.matched, 1);
        assert_eq!(
            outcome.halted,
            Some(ScanError::LiteralMismatch {
                expected: b']',
                found: b')'
            })
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn literal_does_not_skip_whitespace() {
        let mut n = 0i32;
        let mut position = 0;
        assert_eq!(scan!(b"1 :", &mut position, "%d:", &mut n), 1);
        assert_eq!(position, 1);
        position = 0;
        assert_eq!(scan!(b"1 :", &mut position, "%d :", &mut n), 1);
        assert_eq!(position, 3);
    }

    #[test]
    fn unsupported_specifier_is_a_no_op() {
        let (mut a, mut b) = (0i32, 0i32);
        let mut position = 0;
        let matched = scan!(b"4 5", &mut position, "%d %q%d", &mut a, &mut b);
        assert_eq!((matched, a, b), (2, 4, 5));
    }

    #[test]
    fn newline_directive_stops_on_trailing_garbage() {
        let program = FormatProgram::compile("%d\n%d");
        let (mut a, mut b) = (0i32, 0i32);
        let mut cursor = Cursor::new(b"1  x\n2");
        let outcome = program.scan(&mut cursor, &mut [(&mut a).into(), (&mut b).into()]);
        assert_eq!(outcome.matched, 1);
        assert_eq!(
            outcome.halted,
            Some(ScanError::UnterminatedNewlineMatch { found: b'x' })
        );
        assert_eq!(cursor.remaining(), b"x\n2");
    }

    #[test]
    fn slot_problems_halt_before_reading() {
        let mut wrong = 0u32;
        let mut cursor = Cursor::new(b"-3");
        let program = FormatProgram::compile("%d");
        let outcome = program.scan(&mut cursor, &mut [OutputSlot::U32(&mut wrong)]);
        assert_eq!(outcome.halted, Some(ScanError::SlotMismatch { index: 0 }));
        assert_eq!(cursor.position(), 0);

        let outcome = program.scan(&mut cursor, &mut []);
        assert_eq!(outcome.halted, Some(ScanError::MissingSlot { index: 0 }));
        assert_eq!(outcome.matched, 0);
    }

    #[test]
    fn string_slots_and_char() {
        let mut bytes = Vec::new();
        let mut text = String::new();
        let mut c = 0u8;
        let mut position = 0;
        let matched = scan!(
            b"abcdef xyz!",
            &mut position,
            "%4s %s%c",
            &mut bytes,
            &mut text,
            &mut c
        );
        assert_eq!(matched, 2);
        assert_eq!(bytes, b"abc");
        assert_eq!(text, "xyz!");
        assert_eq!(c, 0);

        let (mut c1, mut c2) = (0u8, 0u8);
        position = 0;
        let matched = scan!(b"a b", &mut position, "%c%c%c", &mut c, &mut c1, &mut c2);
        assert_eq!((matched, c, c1, c2), (3, b'a', b' ', b'b'));
    }

    #[test]
    fn float_widths() {
        let (mut f, mut d, mut e) = (0f32, 0f64, 0f64);
        let mut position = 0;
        let matched = scan!(
            b"0.5 -2e3 1.25",
            &mut position,
            "%f %lf %Lf",
            &mut f,
            &mut d,
            OutputSlot::Extended(&mut e)
        );
        assert_eq!((matched, f, d, e), (3, 0.5, -2000.0, 1.25));
    }

    #[test]
    fn position_is_clamped_into_the_buffer() {
        let mut n = 0i32;
        let mut position = 99;
        assert_eq!(scan!(b"12", &mut position, "%d", &mut n), 0);
        assert_eq!(position, 2);
    }
}
