//! Destinations for encoded bytes.

use crate::{Encode, Error};

/// A destination for encoded bytes.
///
/// Encoders hand their output to `put` in chunks; a scalar is always a single chunk.
pub trait Sink {
    /// Appends `bytes`, or fails without appending anything.
    fn put(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

impl<S> Sink for &mut S
where
    S: Sink + ?Sized,
{
    fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).put(bytes)
    }
}

/// A bounded write position in a caller-owned buffer.
///
/// # Example
///
/// ```
/// use wirepack::{Cursor, Encode};
///
/// let mut buf = [0u8; 6];
/// let mut cursor = Cursor::new(&mut buf);
/// 0x12345678u32.encode(&mut cursor).unwrap();
/// assert_eq!(cursor.remaining(), 2);
///
/// // a u32 no longer fits, and nothing of it is written
/// assert!(0xdeadbeefu32.encode(&mut cursor).is_err());
/// assert_eq!(cursor.written(), &[0x78, 0x56, 0x34, 0x12]);
/// ```
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The total size of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The number of bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Encodes a whole value, or nothing of it.
    ///
    /// The value is measured first, so a value that does not fit or whose encoder fails leaves
    /// the buffer untouched. Returns the number of bytes written.
    pub fn write_value<T>(&mut self, value: &T) -> Result<usize, Error>
    where
        T: Encode + ?Sized,
    {
        let needed = SizeCounter::try_measure(value)?;
        let available = self.remaining();
        if needed > available {
            return Err(Error::buffer_too_small(needed, available));
        }

        let start = self.pos;
        if let Err(error) = value.encode(self) {
            self.pos = start;
            return Err(error);
        }
        Ok(self.pos - start)
    }
}

impl Sink for Cursor<'_> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let available = self.remaining();
        if bytes.len() > available {
            return Err(Error::buffer_too_small(bytes.len(), available));
        }
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// A sink that only counts the bytes it is given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SizeCounter {
    len: usize,
}

impl SizeCounter {
    /// Creates a counter at zero.
    pub const fn new() -> Self {
        Self { len: 0 }
    }

    /// Runs `value`'s encoder against a fresh counter and returns the count.
    ///
    /// A failing custom encoder stops the count where it failed. Use
    /// [`try_measure`](Self::try_measure) to see the failure.
    pub fn measure<T>(value: &T) -> usize
    where
        T: Encode + ?Sized,
    {
        let mut counter = Self::new();
        let _ = value.encode(&mut counter);
        counter.len
    }

    /// Like [`measure`](Self::measure), but returns the encoder's error.
    pub fn try_measure<T>(value: &T) -> Result<usize, Error>
    where
        T: Encode + ?Sized,
    {
        if let Some(len) = T::ENCODED_LEN {
            return Ok(len);
        }
        let mut counter = Self::new();
        value.encode(&mut counter)?;
        Ok(counter.len)
    }

    /// The number of bytes counted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing was counted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Sink for SizeCounter {
    fn put(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.len += bytes.len();
        Ok(())
    }
}

/// Sums fixed encoded lengths; `None` as soon as one of them is not fixed.
pub const fn sum_lens(lens: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut i = 0;
    while i < lens.len() {
        match lens[i] {
            Some(len) => total += len,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}
