use std::ffi::CStr;
use std::marker::PhantomData;
use wirepack::{Category, Cursor, Encode, Error, ErrorKind, Sink, SizeCounter};

#[derive(Debug, PartialEq, Encode)]
struct UnitStruct;

#[derive(Debug, PartialEq, Encode)]
struct TupleStruct(u8, u32);

#[derive(Debug, PartialEq, Encode)]
struct Struct {
    x: u8,
    y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Encode)]
#[repr(u16)]
#[wirepack(repr = "u16")]
enum Command {
    Reset = 0x0001,
    Start = 0x0102,
    Stop = 0x0a0b,
}

#[derive(Debug, PartialEq, Encode)]
#[wirepack(repr = "u8")]
enum Implicit {
    First,
    Second,
    Third,
}

#[derive(Debug, PartialEq, Encode)]
#[wirepack(repr = "u8")]
enum Enum {
    #[wirepack(id = "0")]
    Unit,
    #[wirepack(id = "1")]
    Tuple(u8, u32),
    #[wirepack(id = "2")]
    Struct { x: u8, y: u32 },
}

fn test_encode<T>(input: T, expected: &[u8])
where
    T: Encode,
{
    let mut buf = [0u8; 64];
    let mut cursor = Cursor::new(&mut buf);
    input.encode(&mut cursor).unwrap();
    assert_eq!(cursor.written(), expected);
    assert_eq!(input.encoded_len(), expected.len());
    assert_eq!(SizeCounter::measure(&input), expected.len());
}

#[test]
fn test_unit_struct() {
    test_encode(UnitStruct, &[]);
    assert_eq!(UnitStruct::ENCODED_LEN, Some(0));
}

#[test]
fn test_tuple_struct() {
    test_encode(
        TupleStruct(0xab, 0xdeadbeef),
        &[0xab, 0xef, 0xbe, 0xad, 0xde],
    );
}

#[test]
fn test_struct_encode() {
    test_encode(
        Struct {
            x: 0xab,
            y: 0xdeadbeef,
        },
        &[0xab, 0xef, 0xbe, 0xad, 0xde],
    );
    assert_eq!(Struct::ENCODED_LEN, Some(5));
    assert_eq!(Struct::CATEGORY, Category::Aggregate);
}

#[test]
fn test_fieldless_enum_uses_discriminant() {
    test_encode(Command::Reset, &[0x01, 0x00]);
    test_encode(Command::Start, &[0x02, 0x01]);
    test_encode(Command::Stop, &[0x0b, 0x0a]);
    assert_eq!(Command::ENCODED_LEN, Some(2));
    assert_eq!(Command::CATEGORY, Category::Enumeration);
}

#[test]
fn test_implicit_discriminants() {
    test_encode(Implicit::First, &[0x00]);
    test_encode(Implicit::Second, &[0x01]);
    test_encode(Implicit::Third, &[0x02]);
}

#[test]
fn test_unit_enum() {
    test_encode(Enum::Unit, &[0x00]);
}

#[test]
fn test_tuple_enum() {
    test_encode(
        Enum::Tuple(0xab, 0xdeadbeef),
        &[0x01, 0xab, 0xef, 0xbe, 0xad, 0xde],
    );
}

#[test]
fn test_struct_enum() {
    test_encode(
        Enum::Struct {
            x: 0xab,
            y: 0xdeadbeef,
        },
        &[0x02, 0xab, 0xef, 0xbe, 0xad, 0xde],
    );
    assert_eq!(Enum::ENCODED_LEN, None);
    assert_eq!(Enum::CATEGORY, Category::Enumeration);
}

#[derive(Encode)]
struct Frame<'a> {
    command: Command,
    payload: [u16; 2],
    label: &'a CStr,
    inner: Struct,
}

#[test]
fn test_nested() {
    let frame = Frame {
        command: Command::Start,
        payload: [0x0304, 0x0506],
        label: c"ok",
        inner: Struct { x: 7, y: 8 },
    };
    test_encode(
        &frame,
        &[
            0x02, 0x01, 0x04, 0x03, 0x06, 0x05, b'o', b'k', 0x07, 0x08, 0x00, 0x00, 0x00,
        ],
    );
    assert_eq!(Frame::ENCODED_LEN, None);
}

#[derive(Encode)]
struct Pair<T: Encode> {
    first: T,
    second: T,
}

#[test]
fn test_generic_struct() {
    test_encode(
        Pair {
            first: 0x0102u16,
            second: 0x0304,
        },
        &[0x02, 0x01, 0x04, 0x03],
    );
    assert_eq!(Pair::<u32>::ENCODED_LEN, Some(8));
    assert_eq!(Pair::<&CStr>::ENCODED_LEN, None);
}

#[derive(Encode)]
struct Skipped<T> {
    value: u8,
    #[wirepack(skip)]
    marker: PhantomData<T>,
    #[wirepack(skip)]
    note: String,
}

#[test]
fn test_skip() {
    test_encode(
        Skipped::<String> {
            value: 9,
            marker: PhantomData,
            note: "not encoded".into(),
        },
        &[9],
    );
    assert_eq!(Skipped::<()>::ENCODED_LEN, Some(1));
}

#[derive(Encode)]
struct OptionalExtraData {
    tag: u8,

    #[wirepack(skip_if = "*tag != 2")]
    extra_data: u32,
}

#[test]
fn test_skip_if() {
    test_encode(
        OptionalExtraData {
            tag: 1,
            extra_data: 0xdeadbeef,
        },
        &[0x01],
    );
    test_encode(
        OptionalExtraData {
            tag: 2,
            extra_data: 0xdeadbeef,
        },
        &[0x02, 0xef, 0xbe, 0xad, 0xde],
    );
    assert_eq!(OptionalExtraData::ENCODED_LEN, None);
}

mod u24 {
    use wirepack::{Error, Sink};

    pub fn encode<S>(value: &u32, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        if *value > 0x00ff_ffff {
            return Err(Error::new("value does not fit in 24 bits"));
        }
        sink.put(&value.to_le_bytes()[..3])
    }
}

fn encode_flag<S>(value: &bool, sink: &mut S) -> Result<(), Error>
where
    S: Sink + ?Sized,
{
    sink.put(if *value { b"Y" } else { b"N" })
}

#[derive(Encode)]
struct Custom {
    #[wirepack(with = "u24")]
    offset: u32,
    #[wirepack(encode_with = "encode_flag")]
    enabled: bool,
}

#[test]
fn test_custom_encoders() {
    test_encode(
        Custom {
            offset: 0x010203,
            enabled: true,
        },
        &[0x03, 0x02, 0x01, b'Y'],
    );
    assert_eq!(Custom::ENCODED_LEN, None);
}

#[test]
fn test_field_error_context() {
    let custom = Custom {
        offset: 0x0100_0000,
        enabled: false,
    };
    let mut buf = [0u8; 8];
    let error = custom.encode(&mut Cursor::new(&mut buf)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Custom("value does not fit in 24 bits"));
    assert_eq!(error.context(), Some("error encoding field offset"));
}

#[derive(Encode)]
struct Outer {
    header: u8,
    custom: Custom,
}

#[test]
fn test_innermost_context_is_kept() {
    let outer = Outer {
        header: 1,
        custom: Custom {
            offset: u32::MAX,
            enabled: true,
        },
    };
    let error = outer.encode(&mut SizeCounter::new()).unwrap_err();
    assert_eq!(error.context(), Some("error encoding field offset"));
}

#[test]
fn test_derived_values_in_serializer() {
    let holder = wirepack::serialize!(Command::Stop, Enum::Tuple(1, 2), Struct { x: 3, y: 4 });
    let mut buf = [0u8; 16];
    let written = holder.write(&mut buf);
    assert_eq!(written, holder.size());
    assert_eq!(
        &buf[..written],
        &[0x0b, 0x0a, 0x01, 0x01, 0x02, 0x00, 0x00, 0x00, 0x03, 0x04, 0x00, 0x00, 0x00]
    );
}
