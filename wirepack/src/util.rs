//! Utilities that aren't part of the "core" of wirepack, but may be useful in reducing boilerplate.

use crate::{Category, Encode, Error, Sink};
use zerocopy::{Immutable, IntoBytes};

/// Raw memory image wrapper for fixed-layout types.
///
/// Encodes the inner value by copying its in-memory representation verbatim, with no per-field
/// traversal. Only types whose layout is fixed and free of padding qualify: they must implement
/// zerocopy's `IntoBytes` and `Immutable`, usually through its derives on a `#[repr(C)]` struct.
///
/// Multi-byte fields keep the host's byte order. Prefer `#[derive(Encode)]` when the stream must
/// be little-endian on every host.
///
/// # Example
///
/// ```
/// use wirepack::util::Raw;
/// use wirepack::Encode;
/// use zerocopy::{Immutable, IntoBytes};
///
/// #[derive(IntoBytes, Immutable)]
/// #[repr(C)]
/// struct Header {
///     kind: u8,
///     flags: u8,
///     len: [u8; 2],
/// }
///
/// let header = Raw(Header { kind: 1, flags: 0x80, len: [0, 4] });
///
/// let mut bytes = Vec::new();
/// bytes.resize(header.encoded_len(), 0);
/// header.encode(&mut wirepack::Cursor::new(&mut bytes)).unwrap();
///
/// assert_eq!(bytes, &[1, 0x80, 0, 4]);
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Raw<T>(pub T);

impl<T> Encode for Raw<T>
where
    T: IntoBytes + Immutable,
{
    const CATEGORY: Category = Category::Aggregate;
    const ENCODED_LEN: Option<usize> = Some(core::mem::size_of::<T>());

    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        sink.put(self.0.as_bytes())
    }
}

impl<T> From<T> for Raw<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Raw<T> {
    /// Unwraps and returns the inner `T` value.
    pub fn into_inner(self) -> T {
        self.0
    }
}
