/// Builds a [`Serializer`](crate::Serializer) holding the given values, in order.
///
/// At least one value is required; `serialize!()` does not compile.
///
/// # Example
///
/// ```
/// use wirepack::serialize;
///
/// let holder = serialize!(0x12345678u32);
/// assert_eq!(holder.size(), 4);
///
/// let mut buf = [0u8; 4];
/// holder.write(&mut buf);
/// assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]);
/// ```
#[macro_export]
macro_rules! serialize {
    () => {
        compile_error!("at least one value must be specified")
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Serializer::new(($($value,)+))
    };
}
