//! The fixed-schema record reader.
//!
//! One record per line:
//!
//! ```text
//! :<hex>[<short>]( <short> <ushort> <int> <hex> <hex> <float> <float> <token> DD/MM/YYYY HH:MM:SS
//! ```
//!
//! [`read_record`] is a hard-coded sequence of token reader calls equivalent
//! to scanning [`Record::FORMAT`], without format dispatch. Unlike the
//! interpreter it is all or nothing: a record is returned complete or not at
//! all, and a failed read leaves the cursor at the start of the record.

use crate::{
    cursor::Cursor,
    error::{RecordError, RecordField, ScanError},
    options::{MalformedRecord, ScanOptions},
    readers::{
        expect_byte, match_newline, read_float, read_hex, read_signed, read_string, read_unsigned,
    },
    slot::{OutputSlot, TOKEN_CAPACITY, Token},
};

/// A `DD/MM/YYYY` date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Date {
    /// Day of month.
    pub day: i16,
    /// Month.
    pub month: i16,
    /// Year.
    pub year: i16,
}

/// An `HH:MM:SS` time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Time {
    /// Hour.
    pub hour: i16,
    /// Minute.
    pub minute: i16,
    /// Second.
    pub second: i16,
}

/// One parsed line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Record {
    /// Progressive number, hexadecimal in the input.
    pub pn_prog: u64,
    /// Secondary identifier, between brackets.
    pub pn_n: i16,
    /// Signed `short`, after the opening parenthesis.
    pub field_short: i16,
    /// `unsigned short`.
    pub field_ushort: u16,
    /// `int`.
    pub field_int: i32,
    /// Hexadecimal in the input.
    pub field_hex_ushort: u16,
    /// Hexadecimal in the input.
    pub field_hex_ulong: u64,
    /// `float`.
    pub field_float: f32,
    /// C `long double`, carried as `f64`.
    pub field_ldouble: f64,
    /// Bounded string token, quotes stripped.
    pub token: Token,
    /// Date field.
    pub date: Date,
    /// Time field.
    pub time: Time,
}

impl Record {
    /// Format string that fills a record through [`Record::slots`].
    ///
    /// `%64s` matches the [`Token`] capacity, so the stored token is as long
    /// as the one [`read_record`] stores. Scanning it does not strip quotes
    /// from the token.
    pub const FORMAT: &'static str =
        ":%lx[%hd]( %hd %hu %d %hx %lx %f %Lf %64s %hd/%hd/%hd %hd:%hd:%hd\n";

    /// Output slots matching [`Record::FORMAT`], in order.
    pub fn slots(&mut self) -> [OutputSlot<'_>; 16] {
        let Record {
            pn_prog,
            pn_n,
            field_short,
            field_ushort,
            field_int,
            field_hex_ushort,
            field_hex_ulong,
            field_float,
            field_ldouble,
            token,
            date: Date { day, month, year },
            time: Time {
                hour,
                minute,
                second,
            },
        } = self;
        [
            OutputSlot::U64(pn_prog),
            OutputSlot::I16(pn_n),
            OutputSlot::I16(field_short),
            OutputSlot::U16(field_ushort),
            OutputSlot::I32(field_int),
            OutputSlot::U16(field_hex_ushort),
            OutputSlot::U64(field_hex_ulong),
            OutputSlot::F32(field_float),
            OutputSlot::Extended(field_ldouble),
            OutputSlot::Token(token),
            OutputSlot::I16(day),
            OutputSlot::I16(month),
            OutputSlot::I16(year),
            OutputSlot::I16(hour),
            OutputSlot::I16(minute),
            OutputSlot::I16(second),
        ]
    }
}

/// Runs one field read, tagging a failure with the field and position.
fn field<'src, T>(
    cursor: &mut Cursor<'src>,
    field: RecordField,
    read: impl FnOnce(&mut Cursor<'src>) -> Result<T, ScanError>,
) -> Result<T, RecordError> {
    read(cursor).map_err(|source| RecordError {
        field,
        offset: cursor.position(),
        source,
    })
}

/// Reads `DD/MM/YYYY`.
///
/// # Errors
///
/// Any reader failure; the cursor may be left after a partial date.
pub fn read_date(cursor: &mut Cursor<'_>) -> Result<Date, ScanError> {
    let day = read_signed(cursor)?;
    expect_byte(cursor, b'/')?;
    let month = read_signed(cursor)?;
    expect_byte(cursor, b'/')?;
    let year = read_signed(cursor)?;
    Ok(Date { day, month, year })
}

/// Reads `HH:MM:SS`.
///
/// # Errors
///
/// Any reader failure; the cursor may be left after a partial time.
pub fn read_time(cursor: &mut Cursor<'_>) -> Result<Time, ScanError> {
    let hour = read_signed(cursor)?;
    expect_byte(cursor, b':')?;
    let minute = read_signed(cursor)?;
    expect_byte(cursor, b':')?;
    let second = read_signed(cursor)?;
    Ok(Time {
        hour,
        minute,
        second,
    })
}

/// Reads one record with default options.
///
/// ```
/// use memscanf::{Cursor, read_record};
///
/// let line = b":1f[5]( -3 4 5 a b 0.5 0.25 \"tok\" 01/02/2020 10:20:30\n";
/// let mut cursor = Cursor::new(line);
/// let record = read_record(&mut cursor).unwrap();
/// assert_eq!(record.pn_prog, 0x1f);
/// assert_eq!(record.token.as_bytes(), b"tok");
/// assert!(cursor.at_end());
/// ```
///
/// # Errors
///
/// [`RecordError`] naming the first field that failed. The cursor is
/// restored to where the record started.
pub fn read_record(cursor: &mut Cursor<'_>) -> Result<Record, RecordError> {
    read_record_with(cursor, &ScanOptions::default())
}

/// Reads one record into `out`. On failure `out` is left untouched.
///
/// # Errors
///
/// As [`read_record`].
pub fn read_record_into(cursor: &mut Cursor<'_>, out: &mut Record) -> Result<(), RecordError> {
    *out = read_record(cursor)?;
    Ok(())
}

/// Reads one record.
///
/// # Errors
///
/// As [`read_record`].
pub fn read_record_with(
    cursor: &mut Cursor<'_>,
    options: &ScanOptions,
) -> Result<Record, RecordError> {
    let start = cursor.position();
    let result = parse_record(cursor, options);
    if result.is_err() {
        cursor.rewind(start);
    }
    result
}

fn parse_record(cursor: &mut Cursor<'_>, options: &ScanOptions) -> Result<Record, RecordError> {
    use RecordField as F;

    field(cursor, F::Marker, |c| expect_byte(c, b':'))?;
    let pn_prog = field(cursor, F::Prog, read_hex::<u64>)?;
    let pn_n = field(cursor, F::Number, |c| {
        expect_byte(c, b'[')?;
        let n = read_signed::<i16>(c)?;
        expect_byte(c, b']')?;
        Ok(n)
    })?;
    let field_short = field(cursor, F::Short, |c| {
        expect_byte(c, b'(')?;
        read_signed::<i16>(c)
    })?;
    let field_ushort = field(cursor, F::UShort, read_unsigned::<u16>)?;
    let field_int = field(cursor, F::Int, read_signed::<i32>)?;
    let field_hex_ushort = field(cursor, F::HexUShort, read_hex::<u16>)?;
    let field_hex_ulong = field(cursor, F::HexULong, read_hex::<u64>)?;
    let field_float = field(cursor, F::Float, read_float::<f32>)?;
    let field_ldouble = field(cursor, F::LongDouble, read_float::<f64>)?;
    let token = field(cursor, F::Token, |c| {
        let mut token = Token::new(read_string(c, TOKEN_CAPACITY)?);
        if options.strip_token_quotes {
            token.strip_quotes();
        }
        Ok(token)
    })?;
    let date = field(cursor, F::Date, read_date)?;
    let time = field(cursor, F::Time, read_time)?;
    field(cursor, F::LineEnd, match_newline)?;

    Ok(Record {
        pn_prog,
        pn_n,
        field_short,
        field_ushort,
        field_int,
        field_hex_ushort,
        field_hex_ulong,
        field_float,
        field_ldouble,
        token,
        date,
        time,
    })
}

/// Iterates over the records of a buffer.
///
/// Yields `Ok` per well-formed record. On a malformed record it yields the
/// error and then, per [`ScanOptions::malformed_record`], either stops or
/// skips the rest of the line and carries on.
///
/// ```
/// use memscanf::RecordReader;
///
/// let buffer = b":0[5]( 0 0 0 0 0 0.0 0.0 t 01/01/2020 00:00:00\n\
///                :1[5]( 1 1 1 1 1 0.1 0.01 t 01/01/2020 01:01:01\n";
/// let records: Result<Vec<_>, _> = RecordReader::new(buffer).collect();
/// assert_eq!(records.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RecordReader<'src> {
    cursor: Cursor<'src>,
    options: ScanOptions,
    stopped: bool,
}

impl<'src> RecordReader<'src> {
    /// Reads `buffer` from the start with default options.
    #[must_use]
    pub fn new(buffer: &'src [u8]) -> Self {
        Self::with_options(buffer, ScanOptions::default())
    }

    /// Reads `buffer` from the start.
    #[must_use]
    pub fn with_options(buffer: &'src [u8], options: ScanOptions) -> Self {
        Self::from_cursor(Cursor::new(buffer), options)
    }

    /// Continues from an existing cursor.
    #[must_use]
    pub fn from_cursor(cursor: Cursor<'src>, options: ScanOptions) -> Self {
        Self {
            cursor,
            options,
            stopped: false,
        }
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Gives the cursor back, e.g. to continue with another reader.
    #[must_use]
    pub fn into_cursor(self) -> Cursor<'src> {
        self.cursor
    }

    /// Reads the next record regardless of any earlier failure.
    ///
    /// # Errors
    ///
    /// As [`read_record`].
    pub fn next_record(&mut self) -> Result<Record, RecordError> {
        read_record_with(&mut self.cursor, &self.options)
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped || self.cursor.at_end() {
            return None;
        }
        let result = self.next_record();
        if result.is_err() {
            match self.options.malformed_record {
                MalformedRecord::Stop => self.stopped = true,
                MalformedRecord::SkipLine => {
                    self.cursor.skip_line();
                }
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    const LINE: &[u8] = b":a[5]( -1 2 3 ff 10 0.5 0.25 'quoted' 07/08/2021 12:34:56\n";

    #[test]
    fn reads_every_field() {
        let mut cursor = Cursor::new(LINE);
        let r = read_record(&mut cursor).unwrap();
        assert_eq!(r.pn_prog, 10);
        assert_eq!(r.pn_n, 5);
        assert_eq!((r.field_short, r.field_ushort, r.field_int), (-1, 2, 3));
        assert_eq!((r.field_hex_ushort, r.field_hex_ulong), (0xff, 0x10));
        assert_eq!((r.field_float, r.field_ldouble), (0.5, 0.25));
        assert_eq!(r.token.as_bytes(), b"quoted");
        assert_eq!(
            r.date,
            Date {
                day: 7,
                month: 8,
                year: 2021
            }
        );
        assert_eq!(
            r.time,
            Time {
                hour: 12,
                minute: 34,
                second: 56
            }
        );
        assert!(cursor.at_end());
    }

    #[test]
    fn quotes_kept_when_disabled() {
        let options = ScanOptions {
            strip_token_quotes: false,
            ..ScanOptions::default()
        };
        let r = read_record_with(&mut Cursor::new(LINE), &options).unwrap();
        assert_eq!(r.token.as_bytes(), b"'quoted'");
    }

    #[test]
    fn last_line_needs_no_newline() {
        let line = &LINE[..LINE.len() - 1];
        assert!(read_record(&mut Cursor::new(line)).is_ok());
    }

    #[test]
    fn trailing_whitespace_before_newline_is_tolerated() {
        let line = b":a[5]( -1 2 3 ff 10 0.5 0.25 t 07/08/2021 12:34:56  \t\r\nnext";
        let mut cursor = Cursor::new(line);
        read_record(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), b"next");
    }

    #[test]
    fn garbage_before_newline_fails_the_record() {
        let line = b":a[5]( -1 2 3 ff 10 0.5 0.25 t 07/08/2021 12:34:56 x\n";
        let mut cursor = Cursor::new(line);
        let err = read_record(&mut cursor).unwrap_err();
        assert_eq!(err.field, RecordField::LineEnd);
        assert_eq!(
            err.source,
            ScanError::UnterminatedNewlineMatch { found: b'x' }
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn truncated_record_is_not_stored() {
        let line = b":a[5]( -1 2 3 ff 10 0.5 0.25 t 07/08/2021\n";
        let mut out = Record::default();
        let mut cursor = Cursor::new(line);
        let err = read_record_into(&mut cursor, &mut out).unwrap_err();
        assert_eq!(err.field, RecordField::Time);
        assert_eq!(err.source, ScanError::EndOfInput);
        assert_eq!(out, Record::default());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn error_names_field_and_offset() {
        let line = b":a[x]";
        let err = read_record(&mut Cursor::new(line)).unwrap_err();
        assert_eq!(
            err,
            RecordError {
                field: RecordField::Number,
                offset: 3,
                source: ScanError::NoToken,
            }
        );
        assert_eq!(
            alloc::string::ToString::to_string(&err),
            "secondary id: no token at byte 3"
        );
    }

    #[test]
    fn skip_line_recovers() {
        let buffer = b":1[5]( 1 1 1 1 1 1 1 t 01/01/2020 01:01:01\n\
                       garbage line\n\
                       :2[5]( 2 2 2 2 2 2 2 t 01/01/2020 02:02:02\n";
        let stop: alloc::vec::Vec<_> = RecordReader::new(buffer).collect();
        assert_eq!(stop.len(), 2);
        assert!(stop[1].is_err());

        let options = ScanOptions {
            malformed_record: MalformedRecord::SkipLine,
            ..ScanOptions::default()
        };
        let skip: alloc::vec::Vec<_> = RecordReader::with_options(buffer, options).collect();
        assert_eq!(skip.len(), 3);
        assert!(skip[1].is_err());
        assert_eq!(skip[2].as_ref().map(|r| r.pn_prog), Ok(2));
    }
}
