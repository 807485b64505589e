//! Defines the error type for pin decoding and register access.

use core::fmt;
use core::error::Error as CoreError;
use core::result::Result as CoreResult;
use alloc::boxed::Box;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKind {
    /// A foreign error wrapped without a more specific kind.
    Library,
    InvalidParam,
    /// Pin name is shorter than the fixed grammar allows.
    TooShort,
    /// Pin name does not start with `GPIO3_P`.
    BadPrefix,
    BadPortChar,
    BadPinDigit,
    /// Well-formed double-letter port (`AA`..`EE`), which has no address mapping.
    UnsupportedPort,
    /// Register address falls outside the mapped window.
    OutOfWindow,
    WindowUnavailable,
    UnmapFailed,
}

type DynError = dyn CoreError + Send + Sync;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: Option<Box<DynError>>,
}

pub type Result<T> = CoreResult<T, Error>;

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let desc = match self {
            ErrorKind::Library => "library error",
            ErrorKind::InvalidParam => "invalid parameter",
            ErrorKind::TooShort => "gpio name is too short",
            ErrorKind::BadPrefix => "gpio name does not start with GPIO3_P",
            ErrorKind::BadPortChar => "gpio name does not contain a valid port character A-Z or AA-EE",
            ErrorKind::BadPinDigit => "gpio name does not contain a valid pin number 0-7",
            ErrorKind::UnsupportedPort => "ports AA-EE are not supported",
            ErrorKind::OutOfWindow => "register address outside the mapped window",
            ErrorKind::WindowUnavailable => "cannot map gpio registers",
            ErrorKind::UnmapFailed => "cannot unmap gpio registers",
        };
        f.write_str(desc)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> CoreResult<(), fmt::Error> {
        match &self.inner {
            Some(inner) => write!(f, "{}: {}", self.kind, inner),
            None => fmt::Display::fmt(&self.kind, f),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, inner: Box<DynError>) -> Self {
        Self {
            kind,
            inner: Some(inner),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn into_inner(self) -> Option<Box<DynError>> {
        self.inner
    }
}

impl ErrorKind {
    pub fn wrap(self, inner: Box<DynError>) -> Error {
        Error::new(self, inner)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, inner: None }
    }
}

impl<T> From<ErrorKind> for Result<T> {
    fn from(val: ErrorKind) -> Self {
        Err(val.into())
    }
}

impl<T: CoreError + Send + Sync + 'static> From<T> for Error {
    fn from(e: T) -> Self {
        ErrorKind::Library.wrap(Box::new(e))
    }
}
