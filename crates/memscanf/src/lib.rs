//! scanf-style formatted parsing over an in-memory byte buffer.
//!
//! The buffer is borrowed, never copied; a [`Cursor`] walks it and token
//! readers convert lexemes in place. Two front ends sit on the readers:
//!
//! - the format interpreter ([`FormatProgram`], [`scan_buffer`], [`scan!`]),
//!   which runs a compiled scanf-like format string, and
//! - the record reader ([`read_record`], [`RecordReader`]), a hard-coded
//!   sequence of reader calls for one fixed line layout.
//!
//! ```rust
//! use memscanf::{OutputSlot, Record, RecordReader, scan_buffer};
//!
//! let buffer = b":2a[5]( 1 2 3 4 5 0.5 0.25 \"tok\" 01/01/2020 10:20:30\n";
//!
//! let mut via_format = Record::default();
//! let mut position = 0;
//! let matched = scan_buffer(buffer, &mut position, Record::FORMAT, &mut via_format.slots());
//! assert_eq!(matched, 16);
//! assert_eq!(position, buffer.len());
//!
//! let via_reader = RecordReader::new(buffer).next().unwrap().unwrap();
//! assert_eq!(via_reader.pn_prog, via_format.pn_prog);
//! assert_eq!(via_reader.token.as_bytes(), b"tok");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod error;
mod format;
mod numbers;
mod options;
pub mod readers;
mod record;
mod scan;
mod slot;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, is_space};
pub use error::{RecordError, RecordField, ScanError};
pub use format::{Conversion, FloatWidth, FormatProgram, Instruction, IntWidth};
pub use numbers::{Radix, ScanFloat, ScanInt};
pub use options::{MalformedRecord, ScanOptions};
pub use record::{
    Date, Record, RecordReader, Time, read_date, read_record, read_record_into, read_record_with,
    read_time,
};
pub use scan::{ScanOutcome, scan_buffer, scan_buffer_with};
pub use slot::{OutputSlot, TOKEN_CAPACITY, Token};
