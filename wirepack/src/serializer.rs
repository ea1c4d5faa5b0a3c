use crate::sink::sum_lens;
use crate::{Cursor, Encode, Error, SizeCounter};

/// An ordered, non-empty tuple of values held by a [`Serializer`].
///
/// Implemented for tuples of one to sixteen [`Encode`] values. The empty tuple is deliberately
/// not a `Values`, so a serializer always holds something.
pub trait Values {
    /// The number of held values.
    const ARITY: usize;

    /// The total encoded length, when every held value has a fixed length.
    const ENCODED_LEN: Option<usize>;

    /// The number of bytes the held values encode to, up to the first value whose encoder fails.
    fn encoded_len(&self) -> usize;

    /// Writes each held value in order, stopping at the first one that does not fit.
    fn write_each(&self, cursor: &mut Cursor<'_>) -> Result<(), Error>;
}

macro_rules! impl_values {
    ($arity:literal; $($name:ident $index:tt),+) => {
        impl<$($name),+> Values for ($($name,)+)
        where
            $($name: Encode,)+
        {
            const ARITY: usize = $arity;
            const ENCODED_LEN: Option<usize> = sum_lens(&[$(<$name as Encode>::ENCODED_LEN),+]);

            fn encoded_len(&self) -> usize {
                let mut total = 0;
                $(
                    match SizeCounter::try_measure(&self.$index) {
                        Ok(len) => total += len,
                        Err(_) => return total,
                    }
                )+
                total
            }

            fn write_each(&self, cursor: &mut Cursor<'_>) -> Result<(), Error> {
                $(
                    cursor
                        .write_value(&self.$index)
                        .map_err(|e| e.at_held_value($index))?;
                )+
                Ok(())
            }
        }
    };
}

impl_values!(1; A 0);
impl_values!(2; A 0, B 1);
impl_values!(3; A 0, B 1, C 2);
impl_values!(4; A 0, B 1, C 2, D 3);
impl_values!(5; A 0, B 1, C 2, D 3, E 4);
impl_values!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_values!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_values!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_values!(9; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_values!(10; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_values!(11; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_values!(12; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
impl_values!(13; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12);
impl_values!(14; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13);
impl_values!(15; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14);
impl_values!(16; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15);

/// An immutable holder of values to encode.
///
/// Usually built with the [`serialize!`](crate::serialize) macro.
///
/// # Example
///
/// ```
/// use wirepack::Serializer;
///
/// let holder = Serializer::new((0xFFu8, 0x0102u16));
/// assert_eq!(holder.size(), 3);
///
/// let mut buf = [0u8; 3];
/// assert_eq!(holder.write_array(&mut buf), 3);
/// assert_eq!(buf, [0xFF, 0x02, 0x01]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Serializer<V> {
    values: V,
}

impl<V> Serializer<V>
where
    V: Values,
{
    /// The total encoded length, known at compile time when every held value has a fixed length.
    pub const ENCODED_LEN: Option<usize> = V::ENCODED_LEN;

    /// Captures `values`, in order.
    pub const fn new(values: V) -> Self {
        Self { values }
    }

    /// The held values.
    pub fn values(&self) -> &V {
        &self.values
    }

    /// Returns the held values.
    pub fn into_inner(self) -> V {
        self.values
    }

    /// The number of bytes [`write`](Self::write) produces given enough room.
    ///
    /// A value whose custom encoder fails is never written, so it and the values after it are not
    /// counted.
    pub fn size(&self) -> usize {
        match V::ENCODED_LEN {
            Some(len) => len,
            None => self.values.encoded_len(),
        }
    }

    /// Writes every held value into `buf`, in order, and returns the number of bytes written.
    ///
    /// If a value does not fit in the space left, nothing of it is written and writing stops
    /// there: the result is then smaller than [`size`](Self::size).
    pub fn write(&self, buf: &mut [u8]) -> usize {
        let (written, result) = self.write_into(buf);
        if let Err(error) = result {
            log::debug!("truncated write after {} bytes: {}", written, error);
        }
        written
    }

    /// Like [`write`](Self::write), but reports a value that did not fit as an error.
    ///
    /// ```
    /// use wirepack::{serialize, ErrorKind};
    ///
    /// let holder = serialize!(1u8, 2u32);
    /// let error = holder.try_write(&mut [0u8; 3]).unwrap_err();
    /// assert_eq!(error.held_value(), Some(1));
    /// assert_eq!(error.kind(), ErrorKind::BufferTooSmall { needed: 4, available: 2 });
    /// ```
    pub fn try_write(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let (written, result) = self.write_into(buf);
        result.map(|()| written)
    }

    /// Writes into a fixed-size buffer, exactly as [`write`](Self::write) does with its capacity.
    pub fn write_array<const N: usize>(&self, buf: &mut [u8; N]) -> usize {
        self.write(buf)
    }

    /// Encodes into a new vector of exactly [`size`](Self::size) bytes.
    #[cfg(feature = "alloc")]
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        let mut bytes = alloc::vec![0; self.size()];
        let written = self.write(&mut bytes);
        bytes.truncate(written);
        bytes
    }

    fn write_into(&self, buf: &mut [u8]) -> (usize, Result<(), Error>) {
        let mut cursor = Cursor::new(buf);
        let result = self.values.write_each(&mut cursor);
        log::trace!(
            "wrote {} of {} bytes for {} held values",
            cursor.position(),
            cursor.capacity(),
            V::ARITY
        );
        (cursor.position(), result)
    }
}
