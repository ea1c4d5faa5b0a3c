//! A compile-time-typed binary encoder.
//!
//! A [`Serializer`] captures a fixed, heterogeneous list of values when it is built, computes
//! exactly how many bytes they occupy, and writes them into a buffer owned by the caller. Nothing
//! is allocated and nothing is framed: the output is the concatenation of each value's canonical
//! encoding, in the order the values were given.
//!
//! ```
//! use wirepack::serialize;
//!
//! let holder = serialize!(0xFFu8, 0x0102u16, [1u8, 2, 3], c"ab");
//! assert_eq!(holder.size(), 8);
//!
//! let mut buf = [0u8; 16];
//! let written = holder.write(&mut buf);
//! assert_eq!(&buf[..written], &[0xFF, 0x02, 0x01, 1, 2, 3, b'a', b'b']);
//! ```
//!
//! # Value categories
//!
//! Every encodable type belongs to exactly one [`Category`]:
//!
//! - **Scalars** (integers, floats, `bool`, `char`) are written little-endian, whatever the host.
//! - **Enumerations** (`#[derive(Encode)]` on an enum) are written as their integer id.
//! - **Arrays** `[T; N]` are written element by element.
//! - **Aggregates** are either `#[derive(Encode)]` structs, written field by field, or
//!   [`util::Raw`] values whose memory image is copied verbatim.
//! - **Strings** ([`CStr`](core::ffi::CStr)) are written up to, but not including, the nul
//!   terminator.
//!
//! Anything else is rejected when the program is compiled:
//!
//! ```compile_fail
//! let holder = wirepack::serialize!(String::from("no terminator"));
//! ```
//!
//! A serializer must hold at least one value:
//!
//! ```compile_fail
//! let holder = wirepack::serialize!();
//! ```
//!
//! # Truncation
//!
//! [`Serializer::write`] never writes a partial value. When the next held value does not fit in
//! the remaining space it stops, and the returned count is smaller than [`Serializer::size`].
//! [`Serializer::try_write`] reports the same situation as an [`Error`].

#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod derive;
pub mod util;

mod error;
mod macros;
mod serializer;
mod sink;

#[cfg(feature = "derive")]
pub use wirepack_derive::Encode;

pub use self::error::{Error, ErrorKind};
pub use self::serializer::{Serializer, Values};
pub use self::sink::{Cursor, Sink, SizeCounter};

use core::ffi::CStr;
use core::mem;

#[doc(hidden)]
pub mod export {
    //! Items used by the code generated by `#[derive(Encode)]`.
    pub use crate::sink::sum_lens;
}

/// The encoding strategy selected for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Integers, floats, `bool` and `char`, written little-endian.
    Scalar,
    /// Enums, written as their integer id.
    Enumeration,
    /// Fixed-size arrays, written element by element.
    Array,
    /// Structs and raw memory images.
    Aggregate,
    /// Null-terminated strings, written without the terminator.
    String,
}

/// A type that can be encoded into a [`Sink`].
///
/// The same `encode` routine produces both the bytes (against a [`Cursor`]) and the byte count
/// (against a [`SizeCounter`]), so the two cannot disagree.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a supported wirepack value",
    label = "no encoding for this type",
    note = "supported values are scalars, `#[derive(Encode)]` enums and structs, fixed-size arrays, `Raw<T>` and `CStr`"
)]
pub trait Encode {
    /// The category this type is encoded as.
    const CATEGORY: Category;

    /// The encoded length, when it is the same for every value of the type.
    const ENCODED_LEN: Option<usize> = None;

    /// Encodes `&self` into the given sink.
    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized;

    /// The number of bytes `encode` produces for this value.
    fn encoded_len(&self) -> usize {
        match Self::ENCODED_LEN {
            Some(len) => len,
            None => SizeCounter::measure(self),
        }
    }
}

impl<T> Encode for &T
where
    T: Encode + ?Sized,
{
    const CATEGORY: Category = T::CATEGORY;
    const ENCODED_LEN: Option<usize> = T::ENCODED_LEN;

    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        (**self).encode(sink)
    }

    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }
}

impl<T, const N: usize> Encode for [T; N]
where
    T: Encode,
{
    const CATEGORY: Category = Category::Array;
    const ENCODED_LEN: Option<usize> = match T::ENCODED_LEN {
        Some(len) => Some(len * N),
        None => None,
    };

    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        for elem in self {
            elem.encode(sink)?;
        }
        Ok(())
    }
}

impl Encode for CStr {
    const CATEGORY: Category = Category::String;

    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        sink.put(self.to_bytes())
    }
}

#[cfg(feature = "alloc")]
impl Encode for alloc::ffi::CString {
    const CATEGORY: Category = Category::String;

    fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        self.as_c_str().encode(sink)
    }
}

macro_rules! impl_scalar {
    ($($t:ty)*) => {$(
        impl Encode for $t {
            const CATEGORY: Category = Category::Scalar;
            const ENCODED_LEN: Option<usize> = Some(mem::size_of::<$t>());

            fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
            where
                S: Sink + ?Sized,
            {
                sink.put(&self.to_le_bytes())
            }
        }
    )*}
}

impl_scalar! {
    u8 u16 u32 u64 u128 i8 i16 i32 i64 i128 f32 f64
}

// `usize` and `isize` always take 8 bytes so the stream does not depend on the host.
// `bool` and `char` are written as their integer value.
macro_rules! impl_widened_scalar {
    ($($t:ty => $wide:ty)*) => {$(
        impl Encode for $t {
            const CATEGORY: Category = Category::Scalar;
            const ENCODED_LEN: Option<usize> = <$wide as Encode>::ENCODED_LEN;

            fn encode<S>(&self, sink: &mut S) -> Result<(), Error>
            where
                S: Sink + ?Sized,
            {
                (*self as $wide).encode(sink)
            }
        }
    )*}
}

impl_widened_scalar! {
    usize => u64
    isize => i64
    bool => u8
    char => u32
}
