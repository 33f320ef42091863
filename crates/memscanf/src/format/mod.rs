//! Format programs: a scanf-like format string compiled into instructions.
//!
//! Grammar accepted by [`FormatProgram::compile`]
//! - `%` `[0-9.]*` `[hlL]?` specifier, with specifiers `d u x f g e c s`.
//!   A pure digit run is the width; only `s` honours it, as the capacity of
//!   the destination including the terminator slot.
//! - `\n` matches whitespace up to and including a newline.
//! - Any other whitespace byte matches a (possibly empty) whitespace run.
//! - Every other byte must match the input byte exactly.
//!
//! Unknown specifiers compile to [`Instruction::Unsupported`], which the
//! interpreter steps over without touching input, slots or the match count.

use alloc::vec::Vec;

use crate::{cursor::is_space, options::ScanOptions};

/// Storage width of an integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum IntWidth {
    /// `h`: `i16` / `u16`.
    Short,
    /// No modifier: `i32` / `u32`.
    Int,
    /// `l`: `i64` / `u64`.
    Long,
}

/// Storage width of a floating-point conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum FloatWidth {
    /// No modifier: `f32`.
    Single,
    /// `l`: `f64`.
    Double,
    /// `L`: C `long double`, carried as `f64`.
    Extended,
}

/// What one `%` specifier converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum Conversion {
    /// `%d`: signed decimal.
    Decimal(IntWidth),
    /// `%u`: unsigned decimal.
    Unsigned(IntWidth),
    /// `%x`: unsigned hexadecimal.
    Hex(IntWidth),
    /// `%f`, `%g`, `%e`.
    Float(FloatWidth),
    /// `%c`: one byte, no whitespace skipping.
    Char,
    /// `%s`: whitespace-delimited token.
    String {
        /// Destination capacity including the terminator slot.
        capacity: usize,
    },
}

/// One step of a [`FormatProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum Instruction {
    /// Input byte must equal this byte.
    Literal(u8),
    /// Consume a maximal, possibly empty, whitespace run.
    WhitespaceSkip,
    /// Consume whitespace through the next newline.
    NewlineMatch,
    /// Run a token reader and store into the next slot.
    Convert(Conversion),
    /// An unknown specifier; `None` when the format ended after `%`.
    Unsupported {
        /// The specifier byte, if any.
        specifier: Option<u8>,
    },
}

/// A compiled format string, reusable across any number of scans.
///
/// ```
/// use memscanf::{Conversion, FormatProgram, Instruction, IntWidth};
///
/// let program = FormatProgram::compile("[%hd]");
/// assert_eq!(
///     program.instructions(),
///     &[
///         Instruction::Literal(b'['),
///         Instruction::Convert(Conversion::Decimal(IntWidth::Short)),
///         Instruction::Literal(b']'),
///     ]
/// );
/// assert_eq!(program.conversions(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct FormatProgram {
    instructions: Vec<Instruction>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Modifier {
    None,
    Short,
    Long,
    LongDouble,
}

impl Modifier {
    fn int_width(self) -> IntWidth {
        match self {
            Modifier::Short => IntWidth::Short,
            Modifier::Long => IntWidth::Long,
            Modifier::None | Modifier::LongDouble => IntWidth::Int,
        }
    }

    fn float_width(self) -> FloatWidth {
        match self {
            Modifier::Long => FloatWidth::Double,
            Modifier::LongDouble => FloatWidth::Extended,
            Modifier::None | Modifier::Short => FloatWidth::Single,
        }
    }
}

impl FormatProgram {
    /// Compiles `format` with default options.
    #[must_use]
    pub fn compile(format: &str) -> Self {
        Self::compile_with(format, &ScanOptions::default())
    }

    /// Compiles `format`. Compilation never fails: anything the grammar does
    /// not know becomes [`Instruction::Unsupported`].
    #[must_use]
    pub fn compile_with(format: &str, options: &ScanOptions) -> Self {
        let bytes = format.as_bytes();
        let mut instructions = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            i += 1;
            let instruction = match b {
                b'%' => {
                    let (instruction, next) = compile_specifier(bytes, i, options);
                    i = next;
                    instruction
                }
                b'\n' => Instruction::NewlineMatch,
                b if is_space(b) => Instruction::WhitespaceSkip,
                b => Instruction::Literal(b),
            };
            instructions.push(instruction);
        }
        Self { instructions }
    }

    /// The compiled instructions, in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of [`Instruction::Convert`] steps, the upper bound of a scan's
    /// match count.
    #[must_use]
    pub fn conversions(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Convert(_)))
            .count()
    }
}

impl From<&str> for FormatProgram {
    fn from(format: &str) -> Self {
        Self::compile(format)
    }
}

/// Compiles the specifier that starts at `bytes[i]` (just after `%`).
/// Returns the instruction and the index following the specifier.
fn compile_specifier(bytes: &[u8], mut i: usize, options: &ScanOptions) -> (Instruction, usize) {
    let run_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    let width = parse_width(&bytes[run_start..i]);

    let modifier = match bytes.get(i) {
        Some(b'h') => Modifier::Short,
        Some(b'l') => Modifier::Long,
        Some(b'L') => Modifier::LongDouble,
        _ => Modifier::None,
    };
    if modifier != Modifier::None {
        i += 1;
    }

    let Some(&specifier) = bytes.get(i) else {
        return (Instruction::Unsupported { specifier: None }, i);
    };
    i += 1;

    let conversion = match specifier {
        b'd' => Conversion::Decimal(modifier.int_width()),
        b'u' => Conversion::Unsigned(modifier.int_width()),
        b'x' => Conversion::Hex(modifier.int_width()),
        b'f' | b'g' | b'e' => Conversion::Float(modifier.float_width()),
        b'c' => Conversion::Char,
        b's' => Conversion::String {
            capacity: width
                .filter(|&w| w > 0)
                .unwrap_or(options.default_string_capacity),
        },
        other => {
            return (
                Instruction::Unsupported {
                    specifier: Some(other),
                },
                i,
            );
        }
    };
    (Instruction::Convert(conversion), i)
}

/// A width is a non-empty pure digit run; precision (`.`) disables it.
fn parse_width(run: &[u8]) -> Option<usize> {
    if run.is_empty() || !run.iter().all(u8::is_ascii_digit) {
        return None;
    }
    run.iter().try_fold(0usize, |acc, &d| {
        acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
    })
}
