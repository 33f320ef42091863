//! Cursor: an exclusive read position over a caller-owned byte buffer.
//!
//! What it does
//! - Walks a borrowed `&'src [u8]` via `peek()`/`advance()` without copying.
//! - Anchors the start of the current read (`begin_read()`), so push-back via
//!   `retreat_one()` can never move before the byte the read started at.
//! - Hands out borrowed slices of consumed bytes (`consume_while`), which the
//!   token readers convert in place.
//!
//! Invariants
//! - `anchor <= pos <= limit <= buf.len()` at all times.
//! - The buffer is never written to or reallocated.

/// Whitespace as classified by the C locale's `isspace`: space, `\t`, `\n`,
/// `\v`, `\f` and `\r`.
#[inline]
#[must_use]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// A read position over an in-memory buffer.
///
/// ```
/// use memscanf::Cursor;
///
/// let mut cursor = Cursor::new(b"  ab");
/// cursor.skip_whitespace();
/// assert_eq!(cursor.advance(), Some(b'a'));
/// assert_eq!(cursor.position(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    buf: &'src [u8],
    pos: usize,
    limit: usize,
    anchor: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `buf`, bounded by its length.
    #[must_use]
    pub fn new(buf: &'src [u8]) -> Self {
        Self::bounded(buf, 0, buf.len())
    }

    /// Creates a cursor at `position` (clamped to the buffer length).
    #[must_use]
    pub fn at(buf: &'src [u8], position: usize) -> Self {
        Self::bounded(buf, position, buf.len())
    }

    /// Creates a cursor at `position` that never reads at or past `limit`.
    ///
    /// Both values are clamped so that `position <= limit <= buf.len()`.
    #[must_use]
    pub fn bounded(buf: &'src [u8], position: usize, limit: usize) -> Self {
        let limit = limit.min(buf.len());
        let pos = position.min(limit);
        Self {
            buf,
            pos,
            limit,
            anchor: pos,
        }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Offset one past the last readable byte.
    #[inline]
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The unread bytes up to the limit.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'src [u8] {
        &self.buf[self.pos..self.limit]
    }

    /// Returns `true` if no byte remains before the limit.
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.limit
    }

    /// Returns the next byte without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        if self.at_end() {
            None
        } else {
            Some(self.buf[self.pos])
        }
    }

    /// Consumes and returns the next byte. At the limit, returns `None` and
    /// leaves the position unchanged.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consumes a maximal (possibly empty) run of whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.consume_while(is_space);
    }

    /// Marks the current position as the start of a read. Push-back through
    /// [`retreat_one`](Self::retreat_one) stops here.
    #[inline]
    pub fn begin_read(&mut self) -> usize {
        self.anchor = self.pos;
        self.pos
    }

    /// Moves back one byte, to push back a byte that did not belong to the
    /// current token. Clamped at the start of the current read.
    #[inline]
    pub fn retreat_one(&mut self) {
        if self.pos > self.anchor {
            self.pos -= 1;
        }
    }

    /// Restores a position previously returned by [`position`](Self::position)
    /// or [`begin_read`](Self::begin_read).
    #[inline]
    pub fn rewind(&mut self, to: usize) {
        self.pos = to.min(self.limit);
        self.anchor = self.anchor.min(self.pos);
    }

    /// The bytes consumed since the start of the current read.
    #[inline]
    #[must_use]
    pub fn token(&self) -> &'src [u8] {
        &self.buf[self.anchor..self.pos]
    }

    /// Consumes bytes while `pred` holds and returns them as a slice borrowed
    /// from the buffer.
    #[inline]
    pub fn consume_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src [u8] {
        let start = self.pos;
        let n = self.remaining().iter().take_while(|&&b| pred(b)).count();
        self.pos += n;
        &self.buf[start..self.pos]
    }

    /// Consumes up to and including the next `\n`, or to the limit if there
    /// is none. Returns `true` if input remains afterwards.
    pub fn skip_line(&mut self) -> bool {
        self.consume_while(|b| b != b'\n');
        self.advance();
        !self.at_end()
    }
}
