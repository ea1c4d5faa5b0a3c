use core::fmt;

/// What went wrong while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The output buffer cannot hold the next value.
    BufferTooSmall {
        /// Bytes the value needs.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },
    /// An error raised by a custom field encoder.
    Custom(&'static str),
}

/// Encoding errors.
///
/// Errors are small `Copy` values and never allocate, so they are usable without `alloc`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    context: Option<&'static str>,
    held_value: Option<usize>,
}

impl Error {
    /// Creates a new `Error` with the given message.
    pub const fn new(message: &'static str) -> Self {
        Self::from_kind(ErrorKind::Custom(message))
    }

    /// Creates an error for a value of `needed` bytes that did not fit in `available` bytes.
    pub const fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::from_kind(ErrorKind::BufferTooSmall { needed, available })
    }

    /// Wraps `error` with a context message.
    ///
    /// Only the innermost context is kept: it names the field closest to the failure.
    pub fn with_context(message: &'static str, error: Error) -> Self {
        Self {
            context: Some(error.context.unwrap_or(message)),
            ..error
        }
    }

    /// Records the position of the held value that failed inside a [`Serializer`](crate::Serializer).
    pub fn at_held_value(self, index: usize) -> Self {
        Self {
            held_value: Some(index),
            ..self
        }
    }

    /// The kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The innermost context message, if any.
    pub fn context(&self) -> Option<&'static str> {
        self.context
    }

    /// The position of the held value that failed, if the error came from a serializer.
    pub fn held_value(&self) -> Option<usize> {
        self.held_value
    }

    const fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            held_value: None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // defer to Display
        write!(f, "{}", self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(index) = self.held_value {
            write!(f, "held value {}: ", index)?;
        }
        if let Some(context) = self.context {
            write!(f, "{}: ", context)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "buffer too small: needed {} bytes, only {} available",
                needed, available
            ),
            Self::Custom(message) => write!(f, "{}", message),
        }
    }
}

impl core::error::Error for Error {}
