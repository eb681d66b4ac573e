//! Protobuf wire primitives: varints, field keys and length-delimited spans.
//!
//! Only the subset the appearances schema uses is interpreted; everything else
//! is skipped as a raw span so callers can keep it verbatim.

use std::fmt;

use crate::error::{DecodeError, DecodeErrorKind, EncodeError};

/// Largest length-delimited payload accepted by the protobuf runtime.
pub const MAX_MESSAGE_LEN: usize = i32::MAX as usize;
pub const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;
const MAX_VARINT_LEN: usize = 10;
const MAX_GROUP_DEPTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    StartGroup,
    EndGroup,
    Fixed32,
}

impl WireType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::LengthDelimited => 2,
            Self::StartGroup => 3,
            Self::EndGroup => 4,
            Self::Fixed32 => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "bytes",
            Self::StartGroup => "start_group",
            Self::EndGroup => "end_group",
            Self::Fixed32 => "fixed32",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub number: u32,
    pub wire_type: WireType,
}

impl FieldKey {
    pub fn new(number: u32, wire_type: WireType) -> Self {
        Self { number, wire_type }
    }

    fn raw(self) -> u64 {
        (u64::from(self.number) << 3) | u64::from(self.wire_type.raw())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Cursor over an in-memory buffer. Nested readers keep the absolute offset
/// of their first byte so errors point into the original file.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Position relative to this reader's slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Position within the outermost buffer.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.offset(), kind)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let Some(&b) = self.data.get(self.pos) else {
            return Err(self.error(DecodeErrorKind::Truncated));
        };
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(self.error(DecodeErrorKind::Truncated));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_varint(&mut self) -> Result<u64, DecodeError> {
        let start = self.offset();
        let mut result: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let b = self.read_u8()?;
            // The tenth byte may only carry the top bit of a u64.
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return Err(DecodeError::new(start, DecodeErrorKind::VarintOverflow));
            }
            result |= u64::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(DecodeError::new(start, DecodeErrorKind::VarintOverflow))
    }

    /// `uint32` fields truncate wider varints, matching the protobuf runtimes.
    pub fn read_uint32(&mut self) -> Result<u32, DecodeError> {
        Ok(self.read_varint()? as u32)
    }

    /// `int32` and enum fields: negative values arrive sign-extended to 64 bits.
    pub fn read_int32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_varint()? as i32)
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_varint()? != 0)
    }

    pub fn read_key(&mut self) -> Result<FieldKey, DecodeError> {
        let start = self.offset();
        let raw = self.read_varint()?;
        let number = raw >> 3;
        if number == 0 || number > MAX_FIELD_NUMBER {
            return Err(DecodeError::new(
                start,
                DecodeErrorKind::InvalidFieldNumber(number),
            ));
        }
        let wire = (raw & 0x7) as u8;
        let Some(wire_type) = WireType::from_raw(wire) else {
            return Err(DecodeError::new(start, DecodeErrorKind::InvalidWireType(wire)));
        };
        Ok(FieldKey::new(number as u32, wire_type))
    }

    pub fn read_length_delimited(&mut self) -> Result<&'a [u8], DecodeError> {
        let start = self.offset();
        let len = self.read_varint()?;
        let remaining = self.remaining();
        if len > remaining as u64 {
            return Err(DecodeError::new(
                start,
                DecodeErrorKind::LengthOverrun { len, remaining },
            ));
        }
        self.read_bytes(len as usize)
    }

    /// Reader over the next length-delimited payload, sharing this reader's
    /// absolute offsets.
    pub fn read_nested(&mut self) -> Result<WireReader<'a>, DecodeError> {
        let payload = self.read_length_delimited()?;
        let payload_start = self.pos - payload.len();
        Ok(WireReader {
            data: payload,
            pos: 0,
            base: self.base + payload_start,
        })
    }

    /// Consume the payload that follows `key`.
    pub fn skip_field(&mut self, key: FieldKey) -> Result<(), DecodeError> {
        self.skip_field_at_depth(key, 0)
    }

    fn skip_field_at_depth(&mut self, key: FieldKey, depth: usize) -> Result<(), DecodeError> {
        match key.wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.read_bytes(8)?;
            }
            WireType::Fixed32 => {
                self.read_bytes(4)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::StartGroup => {
                if depth >= MAX_GROUP_DEPTH {
                    return Err(self.error(DecodeErrorKind::RecursionLimit(MAX_GROUP_DEPTH)));
                }
                loop {
                    let inner_start = self.offset();
                    let inner = self.read_key()?;
                    if inner.wire_type == WireType::EndGroup {
                        if inner.number != key.number {
                            return Err(DecodeError::new(
                                inner_start,
                                DecodeErrorKind::MismatchedEndGroup {
                                    expected: key.number,
                                    found: inner.number,
                                },
                            ));
                        }
                        break;
                    }
                    self.skip_field_at_depth(inner, depth + 1)?;
                }
            }
            WireType::EndGroup => {
                return Err(self.error(DecodeErrorKind::UnexpectedEndGroup));
            }
        }
        Ok(())
    }

    /// Bytes consumed since `start` (a value previously returned by
    /// [`WireReader::position`]).
    pub fn span_from(&self, start: usize) -> &'a [u8] {
        &self.data[start..self.pos]
    }
}

/// Append-only output buffer. Every write reserves first so allocation
/// failure surfaces as [`EncodeError::OutOfMemory`] instead of aborting.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn reserve(&mut self, additional: usize) -> Result<(), EncodeError> {
        self.buf
            .try_reserve(additional)
            .map_err(|_| EncodeError::OutOfMemory { additional })
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.reserve(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_varint(&mut self, mut n: u64) -> Result<(), EncodeError> {
        self.reserve(MAX_VARINT_LEN)?;
        loop {
            let low7 = (n & 0x7f) as u8;
            n >>= 7;
            if n == 0 {
                self.buf.push(low7);
                return Ok(());
            }
            self.buf.push(low7 | 0x80);
        }
    }

    pub fn write_key(&mut self, number: u32, wire_type: WireType) -> Result<(), EncodeError> {
        self.write_varint(FieldKey::new(number, wire_type).raw())
    }

    pub fn write_uint32(&mut self, number: u32, value: u32) -> Result<(), EncodeError> {
        self.write_key(number, WireType::Varint)?;
        self.write_varint(u64::from(value))
    }

    pub fn write_int32(&mut self, number: u32, value: i32) -> Result<(), EncodeError> {
        self.write_key(number, WireType::Varint)?;
        self.write_varint(i64::from(value) as u64)
    }

    pub fn write_bool(&mut self, number: u32, value: bool) -> Result<(), EncodeError> {
        self.write_key(number, WireType::Varint)?;
        self.write_varint(u64::from(value))
    }

    pub fn write_bytes(&mut self, number: u32, value: &[u8]) -> Result<(), EncodeError> {
        if value.len() > MAX_MESSAGE_LEN {
            return Err(EncodeError::MessageTooLarge { len: value.len() });
        }
        self.write_key(number, WireType::LengthDelimited)?;
        self.write_varint(value.len() as u64)?;
        self.write_raw(value)
    }

    pub fn write_opt_uint32(&mut self, number: u32, value: Option<u32>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.write_uint32(number, v),
            None => Ok(()),
        }
    }

    pub fn write_opt_int32(&mut self, number: u32, value: Option<i32>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.write_int32(number, v),
            None => Ok(()),
        }
    }

    pub fn write_opt_bool(&mut self, number: u32, value: Option<bool>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.write_bool(number, v),
            None => Ok(()),
        }
    }

    pub fn write_opt_bytes(&mut self, number: u32, value: Option<&[u8]>) -> Result<(), EncodeError> {
        match value {
            Some(v) => self.write_bytes(number, v),
            None => Ok(()),
        }
    }

    /// Repeated scalars are written unpacked, the proto2 default.
    pub fn write_repeated_uint32(&mut self, number: u32, values: &[u32]) -> Result<(), EncodeError> {
        for &v in values {
            self.write_uint32(number, v)?;
        }
        Ok(())
    }
}

/// Decode one element (or a packed run) of a repeated varint field.
pub fn merge_repeated_varint<T>(
    values: &mut Vec<T>,
    key: FieldKey,
    r: &mut WireReader<'_>,
    convert: fn(u64) -> T,
) -> Result<bool, DecodeError> {
    match key.wire_type {
        WireType::Varint => {
            values.push(convert(r.read_varint()?));
            Ok(true)
        }
        WireType::LengthDelimited => {
            let mut packed = r.read_nested()?;
            while !packed.is_empty() {
                values.push(convert(packed.read_varint()?));
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}
