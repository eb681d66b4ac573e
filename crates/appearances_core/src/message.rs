use crate::error::{DecodeError, EncodeError};
use crate::wire::{ByteRange, FieldKey, WireReader, WireType, WireWriter};

/// Raw wire bytes of fields a message does not model, kept in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    bytes: Vec<u8>,
}

impl UnknownFields {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn push_raw(&mut self, raw: &[u8]) {
        self.bytes.extend_from_slice(raw);
    }

    /// Walk the fields stored in this blob without interpreting payloads.
    pub fn fields(&self) -> UnknownFieldIter<'_> {
        UnknownFieldIter {
            reader: WireReader::new(&self.bytes),
            failed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownField {
    pub number: u32,
    pub wire_type: WireType,
    /// Key plus payload, relative to the start of the blob.
    pub range: ByteRange,
}

pub struct UnknownFieldIter<'a> {
    reader: WireReader<'a>,
    failed: bool,
}

impl Iterator for UnknownFieldIter<'_> {
    type Item = Result<UnknownField, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let start = self.reader.position();
        let field = self.reader.read_key().and_then(|key| {
            self.reader.skip_field(key)?;
            Ok(UnknownField {
                number: key.number,
                wire_type: key.wire_type,
                range: ByteRange {
                    start,
                    end: self.reader.position(),
                },
            })
        });
        if field.is_err() {
            self.failed = true;
        }
        Some(field)
    }
}

/// A schema message: known fields plus an [`UnknownFields`] blob.
///
/// `merge_field` returns `Ok(false)` without consuming anything when it does
/// not recognise the `(number, wire type)` pair; the field is then stored as
/// unknown. Encoding writes known fields in field-number order and appends the
/// unknown blob verbatim.
pub trait Message: Default {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError>;

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError>;

    fn unknown_fields(&self) -> &UnknownFields;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;

    fn merge_from(&mut self, r: &mut WireReader<'_>) -> Result<(), DecodeError> {
        while !r.is_empty() {
            let start = r.position();
            let key = r.read_key()?;
            if !self.merge_field(key, r)? {
                r.skip_field(key)?;
                self.unknown_fields_mut().push_raw(r.span_from(start));
            }
        }
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut message = Self::default();
        message.merge_from(&mut WireReader::new(bytes))?;
        Ok(message)
    }

    fn encode_to(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        self.encode_fields(w)?;
        w.write_raw(self.unknown_fields().as_bytes())
    }

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut w = WireWriter::new();
        self.encode_to(&mut w)?;
        Ok(w.into_bytes())
    }
}

/// Singular embedded message: a repeated occurrence merges into the first.
pub(crate) fn merge_message<M: Message>(
    slot: &mut Option<M>,
    r: &mut WireReader<'_>,
) -> Result<(), DecodeError> {
    let mut nested = r.read_nested()?;
    slot.get_or_insert_with(M::default).merge_from(&mut nested)
}

pub(crate) fn push_message<M: Message>(
    values: &mut Vec<M>,
    r: &mut WireReader<'_>,
) -> Result<(), DecodeError> {
    let mut nested = r.read_nested()?;
    let mut message = M::default();
    message.merge_from(&mut nested)?;
    values.push(message);
    Ok(())
}

pub(crate) fn write_message<M: Message>(
    w: &mut WireWriter,
    number: u32,
    message: &M,
) -> Result<(), EncodeError> {
    let body = message.encode()?;
    w.write_bytes(number, &body)
}

pub(crate) fn write_opt_message<M: Message>(
    w: &mut WireWriter,
    number: u32,
    message: Option<&M>,
) -> Result<(), EncodeError> {
    match message {
        Some(m) => write_message(w, number, m),
        None => Ok(()),
    }
}

pub(crate) fn write_repeated_message<M: Message>(
    w: &mut WireWriter,
    number: u32,
    messages: &[M],
) -> Result<(), EncodeError> {
    for m in messages {
        write_message(w, number, m)?;
    }
    Ok(())
}

/// Generates a message whose known fields are all optional `uint32`.
/// Fields must be listed in ascending field-number order. The `editable`
/// form also derives serde so edits can address the record by field name.
macro_rules! uint32_message {
    (@impl $name:ident { $($field:ident = $number:literal),+ }) => {
        impl $crate::message::Message for $name {
            fn merge_field(
                &mut self,
                key: $crate::wire::FieldKey,
                r: &mut $crate::wire::WireReader<'_>,
            ) -> Result<bool, $crate::error::DecodeError> {
                match (key.number, key.wire_type) {
                    $(($number, $crate::wire::WireType::Varint) => self.$field = Some(r.read_uint32()?),)+
                    _ => return Ok(false),
                }
                Ok(true)
            }

            fn encode_fields(
                &self,
                w: &mut $crate::wire::WireWriter,
            ) -> Result<(), $crate::error::EncodeError> {
                $(w.write_opt_uint32($number, self.$field)?;)+
                Ok(())
            }

            fn unknown_fields(&self) -> &$crate::message::UnknownFields {
                &self.unknown
            }

            fn unknown_fields_mut(&mut self) -> &mut $crate::message::UnknownFields {
                &mut self.unknown
            }
        }
    };
    (editable $(#[$meta:meta])* $name:ident { $($field:ident = $number:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<u32>,
            )+
            #[serde(skip)]
            pub unknown: $crate::message::UnknownFields,
        }

        $crate::message::uint32_message!(@impl $name { $($field = $number),+ });
    };
    ($(#[$meta:meta])* $name:ident { $($field:ident = $number:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: Option<u32>,)+
            pub unknown: $crate::message::UnknownFields,
        }

        $crate::message::uint32_message!(@impl $name { $($field = $number),+ });
    };
}

pub(crate) use uint32_message;
