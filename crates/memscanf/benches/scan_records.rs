//! Benchmark: format interpreter vs. record reader over the same buffer.
#![allow(missing_docs)]

use std::{fmt::Write as _, hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memscanf::{FormatProgram, Record, RecordReader, scan_buffer, scan_buffer_with};

/// `count` deterministic record lines.
#[allow(clippy::cast_precision_loss)]
fn make_records(count: u64) -> String {
    let mut out = String::with_capacity(usize::try_from(count).unwrap_or(0) * 80);
    for n in 0..count {
        writeln!(
            out,
            ":{n:x}[5]( {} {} {n} {:x} {n:x} {:.6} {:.6} token 01/01/2020 {:02}:{:02}:{:02}",
            n % 32767,
            n % 65535,
            n % 65535,
            n as f64 * 0.1,
            n as f64 * 0.01,
            n % 24,
            n % 60,
            n % 60,
        )
        .unwrap();
    }
    out
}

fn run_interpreter(buffer: &[u8], program: &FormatProgram) -> usize {
    let mut record = Record::default();
    let mut position = 0;
    let mut records = 0;
    while position < buffer.len() {
        if scan_buffer_with(buffer, &mut position, program, &mut record.slots()) != 16 {
            break;
        }
        records += 1;
    }
    records
}

fn run_recompiling(buffer: &[u8]) -> usize {
    let mut record = Record::default();
    let mut position = 0;
    let mut records = 0;
    while position < buffer.len() {
        if scan_buffer(buffer, &mut position, Record::FORMAT, &mut record.slots()) != 16 {
            break;
        }
        records += 1;
    }
    records
}

fn run_reader(buffer: &[u8]) -> usize {
    RecordReader::new(buffer).map_while(Result::ok).count()
}

fn bench_scan_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_records");
    group
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));

    let program = FormatProgram::compile(Record::FORMAT);
    for &count in &[1_000u64, 100_000] {
        let payload = make_records(count);
        let buffer = payload.as_bytes();
        group.throughput(Throughput::Bytes(buffer.len() as u64));

        group.bench_with_input(BenchmarkId::new("record_reader", count), buffer, |b, buf| {
            b.iter(|| black_box(run_reader(black_box(buf))));
        });
        group.bench_with_input(BenchmarkId::new("interpreter", count), buffer, |b, buf| {
            b.iter(|| black_box(run_interpreter(black_box(buf), &program)));
        });
        group.bench_with_input(
            BenchmarkId::new("interpreter_recompiling", count),
            buffer,
            |b, buf| {
                b.iter(|| black_box(run_recompiling(black_box(buf))));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scan_records);
criterion_main!(benches);
