#![allow(missing_docs, dead_code)]

use std::fmt::Write as _;

/// The line for record number `n`, laid out as the record reader expects.
pub fn record_line(n: u64) -> String {
    let mut line = String::new();
    write_record_line(&mut line, n, "token");
    line
}

/// Appends the line for record number `n` with the given token.
#[allow(clippy::cast_precision_loss)]
pub fn write_record_line(out: &mut String, n: u64, token: &str) {
    writeln!(
        out,
        ":{n:x}[5]( {} {} {} {:x} {n:x} {:.6} {:.6} {token} {:02}/{:02}/{:04} {:02}:{:02}:{:02}",
        n % 32767,
        n % 65535,
        n % 2_147_483_647,
        n % 65535,
        n as f64 * 0.1,
        n as f64 * 0.01,
        1,
        1,
        2020,
        n % 24,
        n % 60,
        n % 60,
    )
    .expect("writing to a String cannot fail");
}

/// `count` consecutive records starting at zero.
pub fn record_buffer(count: u64) -> String {
    let mut out = String::new();
    for n in 0..count {
        write_record_line(&mut out, n, "token");
    }
    out
}
