//! Snapshot of a fully parsed record, to catch unintended changes in how any
//! field is read.

use insta::assert_yaml_snapshot;

use crate::{Cursor, read_record};

#[test]
fn snapshot_record_fields() {
    let line = b":2a[5]( -3 65535 -70000 ff 1a2b3c 1.5 0.25 \"token\" 07/08/2021 23:59:01\n";
    let record = read_record(&mut Cursor::new(line)).expect("well-formed record");

    assert_yaml_snapshot!(record, @r"
    pn_prog: 42
    pn_n: 5
    field_short: -3
    field_ushort: 65535
    field_int: -70000
    field_hex_ushort: 255
    field_hex_ulong: 1715004
    field_float: 1.5
    field_ldouble: 0.25
    token: token
    date:
      day: 7
      month: 8
      year: 2021
    time:
      hour: 23
      minute: 59
      second: 1
    ");
}
