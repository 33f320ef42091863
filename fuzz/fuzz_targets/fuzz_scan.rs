#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use memscanf::{
    Conversion, Cursor, FloatWidth, FormatProgram, Instruction, IntWidth, MalformedRecord,
    OutputSlot, Record, RecordReader, ScanOptions, read_record,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    format: &'a str,
    buffer: &'a [u8],
    start: usize,
    skip_lines: bool,
    strip_quotes: bool,
}

/// Owned destination for one conversion.
enum Dst {
    Int(i64),
    UInt(u64),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Extended(f64),
    Byte(u8),
    Bytes(Vec<u8>),
}

impl Dst {
    fn new(conversion: Conversion) -> Self {
        match conversion {
            Conversion::Decimal(IntWidth::Short) => Dst::I16(0),
            Conversion::Decimal(IntWidth::Int) => Dst::I32(0),
            Conversion::Decimal(IntWidth::Long) => Dst::Int(0),
            Conversion::Unsigned(IntWidth::Short) | Conversion::Hex(IntWidth::Short) => Dst::U16(0),
            Conversion::Unsigned(IntWidth::Int) | Conversion::Hex(IntWidth::Int) => Dst::U32(0),
            Conversion::Unsigned(IntWidth::Long) | Conversion::Hex(IntWidth::Long) => Dst::UInt(0),
            Conversion::Float(FloatWidth::Single) => Dst::F32(0.0),
            Conversion::Float(FloatWidth::Double) => Dst::F64(0.0),
            Conversion::Float(FloatWidth::Extended) => Dst::Extended(0.0),
            Conversion::Char => Dst::Byte(0),
            Conversion::String { .. } => Dst::Bytes(Vec::new()),
        }
    }
}

fuzz_target!(|input: Input<'_>| {
    let options = ScanOptions {
        strip_token_quotes: input.strip_quotes,
        malformed_record: if input.skip_lines {
            MalformedRecord::SkipLine
        } else {
            MalformedRecord::Stop
        },
        ..ScanOptions::default()
    };

    // Arbitrary format over arbitrary bytes.
    let program = FormatProgram::compile_with(input.format, &options);
    let mut dsts: Vec<Dst> = program
        .instructions()
        .iter()
        .filter_map(|i| match i {
            Instruction::Convert(c) => Some(Dst::new(*c)),
            _ => None,
        })
        .collect();
    let mut slots: Vec<OutputSlot<'_>> = dsts
        .iter_mut()
        .map(|dst| match dst {
            Dst::Int(v) => OutputSlot::I64(v),
            Dst::UInt(v) => OutputSlot::U64(v),
            Dst::I16(v) => OutputSlot::I16(v),
            Dst::U16(v) => OutputSlot::U16(v),
            Dst::I32(v) => OutputSlot::I32(v),
            Dst::U32(v) => OutputSlot::U32(v),
            Dst::F32(v) => OutputSlot::F32(v),
            Dst::F64(v) => OutputSlot::F64(v),
            Dst::Extended(v) => OutputSlot::Extended(v),
            Dst::Byte(v) => OutputSlot::Byte(v),
            Dst::Bytes(v) => OutputSlot::Bytes(v),
        })
        .collect();

    let start = input.start % (input.buffer.len() + 1);
    let mut cursor = Cursor::at(input.buffer, start);
    let outcome = program.scan(&mut cursor, &mut slots);
    assert!(outcome.position >= start && outcome.position <= input.buffer.len());
    assert!(outcome.halted.is_some() || outcome.matched == program.conversions());

    // Record reader: atomic per record, always makes progress.
    let mut cursor = Cursor::new(input.buffer);
    if read_record(&mut cursor).is_err() {
        assert_eq!(cursor.position(), 0);
    }

    let mut last = 0;
    let mut reader = RecordReader::with_options(input.buffer, options);
    while let Some(result) = reader.next() {
        if result.is_ok() || input.skip_lines {
            assert!(reader.position() > last);
        }
        last = reader.position();
    }

    // The record format through the interpreter never overruns either.
    let mut record = Record::default();
    let outcome = FormatProgram::compile(Record::FORMAT)
        .scan(&mut Cursor::new(input.buffer), &mut record.slots());
    assert!(outcome.matched <= 16);
});
