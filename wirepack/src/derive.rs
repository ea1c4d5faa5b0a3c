//! Derive macros.
//!
//! **Note:** The macro itself is not contained in this module; it is at the top level of the
//! crate. This module is used to document it.
//!
//! The `Encode` macro generates an implementation of the [`Encode`](crate::Encode) trait.
//! For structs, each field of the struct is encoded in the order they are listed, and the struct
//! is an [`Aggregate`](crate::Category::Aggregate). For enums, the variant's integer id is
//! encoded first, as the type given by the `repr` attribute, followed by the variant's fields if
//! it has any; the enum is an [`Enumeration`](crate::Category::Enumeration).
//!
//! ```
//! use wirepack::{serialize, Encode};
//!
//! #[derive(Clone, Copy, Encode)]
//! #[repr(u16)]
//! #[wirepack(repr = "u16")]
//! enum Command {
//!     Reset = 0x0001,
//!     Start = 0x0102,
//! }
//!
//! #[derive(Encode)]
//! struct Request {
//!     command: Command,
//!     args: [u8; 2],
//! }
//!
//! let request = Request { command: Command::Start, args: [7, 8] };
//! assert_eq!(Request::ENCODED_LEN, Some(4));
//!
//! let holder = serialize!(request);
//! let mut buf = [0u8; 4];
//! holder.write(&mut buf);
//! assert_eq!(buf, [0x02, 0x01, 7, 8]);
//! ```
//!
//! # Attributes
//!
//! The implementation can be modified by attributes at several levels:
//!
//! - **Container** attributes are applied to the outside of the struct or enum.
//! - **Variant** attributes are applied to the outside of an enum variant.
//! - **Field** attributes are prepended to the field declaration.
//!
//! Unless otherwise specified, the attributes listed are optional.
//!
//! ## Attribute Expressions
//!
//! Some attributes accept values in the form of _expressions_. These should be provided
//! as a string literal (surrounded by quotes), and they have access to the values (by reference)
//! of the fields of the value being encoded. Field values can be accessed by the field's name,
//! or by `field_0`, `field_1`, etc. if it is a tuple struct or variant.
//!
//! ## Container Attributes
//!
//! - **`crate_path`** - Specify a custom path to the `wirepack` crate. If you use the `wirepack`
//! crate under a different name, this must be set to that path for the `derive` to successfully
//! compile.
//!
//! - **`repr`** (Required for enums) - The integer type the variant id is encoded as. For enums
//! without fields it should match the enum's `#[repr]`; an explicit discriminant that does not
//! fit in it is a compilation error.
//!
//! ## Variant Attributes
//!
//! - **`id`** - An expression giving the variant id. When absent, the variant's discriminant is
//! used, which is only possible when every variant of the enum is a unit variant:
//!
//! ```
//! use wirepack::Encode;
//!
//! #[derive(Encode)]
//! #[wirepack(repr = "u8")]
//! enum Event {
//!     #[wirepack(id = "0x10")]
//!     Tick,
//!     #[wirepack(id = "0x20")]
//!     Moved { x: i16, y: i16 },
//! }
//! ```
//!
//! ## Field Attributes
//!
//! - **`skip`** - The field is not encoded. Useful for markers like `PhantomData`, or for fields
//! of types that have no encoding.
//!
//! - **`skip_if`** (Conflicts with `skip`) - If the given expression evaluates true, the field is
//! not encoded:
//!
//! ```
//! use wirepack::Encode;
//!
//! #[derive(Encode)]
//! struct OptionalExtraData {
//!     tag: u8,
//!
//!     #[wirepack(skip_if = "*tag != 2")]
//!     extra_data: u32,
//! }
//!
//! let value = OptionalExtraData { tag: 1, extra_data: 5 };
//! assert_eq!(value.encoded_len(), 1);
//! ```
//!
//! - **`with`** (Conflicts with `encode_with`) - Uses the given helper module to encode the field
//! instead of the field type's `Encode` implementation. Should be a path to a module with this
//! definition:
//!
//! ```
//! # type T = ();
//! use wirepack::{Error, Sink};
//!
//! fn encode<S>(val: &T, sink: &mut S) -> Result<(), Error>
//! where
//!     S: Sink + ?Sized,
//! {
//! # todo!()
//!     /* ... */
//! }
//! ```
//!
//! where `T` is the field type. The helper is used for both writing and measuring, so it must
//! only emit bytes through `sink`.
//!
//! - **`encode_with`** (Conflicts with `with`) - Uses the given helper function to encode the
//! field instead of the field type's `Encode` implementation. Should be a path to a function with
//! the signature `fn<S: Sink + ?Sized>(&T, &mut S) -> Result<(), wirepack::Error>`.
//!
//! Fields using `skip_if`, `with` or `encode_with` have no fixed length, so neither has the
//! container: its `ENCODED_LEN` is `None` and its length is measured when needed.
