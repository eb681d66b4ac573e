use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Io,
    Config,
    Decode,
    Encode,
    MalformedEdit,
    InvalidEditField,
}

/// Input bytes are not a valid catalog. `offset` is absolute within the
/// decoded buffer, including for failures inside nested messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte offset {offset}")]
pub struct DecodeError {
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(offset: usize, kind: DecodeErrorKind) -> Self {
        Self { offset, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of input")]
    Truncated,
    #[error("varint is longer than 10 bytes")]
    VarintOverflow,
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    #[error("length prefix {len} exceeds the {remaining} remaining bytes")]
    LengthOverrun { len: u64, remaining: usize },
    #[error("end-group tag without a matching start-group")]
    UnexpectedEndGroup,
    #[error("end-group for field {found} does not close group {expected}")]
    MismatchedEndGroup { expected: u32, found: u32 },
    #[error("groups nested deeper than {0} levels")]
    RecursionLimit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("length-delimited payload of {len} bytes exceeds the 2 GiB limit")]
    MessageTooLarge { len: usize },
    #[error("failed to reserve {additional} bytes for the output buffer")]
    OutOfMemory { additional: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid edit configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("failed to decode catalog: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to encode catalog: {0}")]
    Encode(#[from] EncodeError),
    #[error("malformed edit #{index}: {reason}")]
    MalformedEdit { index: usize, reason: String },
    #[error("invalid field '{field}' in edit for id {id}: {reason}")]
    InvalidEditField {
        id: u32,
        field: String,
        reason: String,
    },
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::Io,
            Self::Config { .. } => ErrorCode::Config,
            Self::Decode(_) => ErrorCode::Decode,
            Self::Encode(_) => ErrorCode::Encode,
            Self::MalformedEdit { .. } => ErrorCode::MalformedEdit,
            Self::InvalidEditField { .. } => ErrorCode::InvalidEditField,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
