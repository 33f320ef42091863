/// Configuration for format compilation and record reading.
///
/// # Examples
///
/// ```rust
/// use memscanf::{MalformedRecord, RecordReader, ScanOptions};
///
/// let options = ScanOptions {
///     malformed_record: MalformedRecord::SkipLine,
///     ..Default::default()
/// };
/// let reader = RecordReader::with_options(b"", options);
/// assert_eq!(reader.position(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Capacity, terminator slot included, of a `%s` conversion that has no
    /// explicit width. At most `default_string_capacity - 1` bytes of a token
    /// are stored; the rest is consumed and dropped.
    ///
    /// # Default
    ///
    /// `1024`
    pub default_string_capacity: usize,

    /// Whether the record reader strips one leading and one trailing quote
    /// (`'` or `"`) from the string token.
    ///
    /// # Default
    ///
    /// `true`
    pub strip_token_quotes: bool,

    /// What [`RecordReader`](crate::RecordReader) does after a malformed
    /// record.
    ///
    /// # Default
    ///
    /// [`MalformedRecord::Stop`]
    pub malformed_record: MalformedRecord,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            default_string_capacity: 1024,
            strip_token_quotes: true,
            malformed_record: MalformedRecord::Stop,
        }
    }
}

/// Recovery policy for a record that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecord {
    /// Report the error and end iteration.
    #[default]
    Stop,
    /// Report the error, skip the rest of the offending line and continue.
    SkipLine,
}
