use crate::error::{DecodeError, EncodeError};
use crate::message::{
    Message, UnknownFields, merge_message, push_message, uint32_message, write_opt_message,
    write_repeated_message,
};
use crate::wire::{FieldKey, WireReader, WireType, WireWriter, merge_repeated_varint};

use super::types::{AnimationLoopType, FixedFrameGroup};

uint32_message!(
    SpritePhase {
        duration_min = 1,
        duration_max = 2,
    }
);

uint32_message!(
    /// One entry of `SpriteInfo.bounding_box_per_direction`.
    BoundingBox {
        x = 1,
        y = 2,
        width = 3,
        height = 4,
    }
);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteAnimation {
    pub default_start_phase: Option<u32>,
    pub synchronized: Option<bool>,
    pub random_start_phase: Option<bool>,
    pub loop_type: Option<AnimationLoopType>,
    pub loop_count: Option<u32>,
    pub sprite_phase: Vec<SpritePhase>,
    pub unknown: UnknownFields,
}

impl Message for SpriteAnimation {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.default_start_phase = Some(r.read_uint32()?),
            (2, WireType::Varint) => self.synchronized = Some(r.read_bool()?),
            (3, WireType::Varint) => self.random_start_phase = Some(r.read_bool()?),
            (4, WireType::Varint) => {
                self.loop_type = Some(AnimationLoopType::from_raw(r.read_int32()?))
            }
            (5, WireType::Varint) => self.loop_count = Some(r.read_uint32()?),
            (6, WireType::LengthDelimited) => push_message(&mut self.sprite_phase, r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_uint32(1, self.default_start_phase)?;
        w.write_opt_bool(2, self.synchronized)?;
        w.write_opt_bool(3, self.random_start_phase)?;
        w.write_opt_int32(4, self.loop_type.map(|v| v.raw()))?;
        w.write_opt_uint32(5, self.loop_count)?;
        write_repeated_message(w, 6, &self.sprite_phase)
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteInfo {
    pub pattern_width: Option<u32>,
    pub pattern_height: Option<u32>,
    pub pattern_depth: Option<u32>,
    pub layers: Option<u32>,
    pub sprite_id: Vec<u32>,
    pub animation: Option<SpriteAnimation>,
    pub bounding_square: Option<u32>,
    pub is_opaque: Option<bool>,
    pub bounding_box_per_direction: Vec<BoundingBox>,
    pub unknown: UnknownFields,
}

impl Message for SpriteInfo {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.pattern_width = Some(r.read_uint32()?),
            (2, WireType::Varint) => self.pattern_height = Some(r.read_uint32()?),
            (3, WireType::Varint) => self.pattern_depth = Some(r.read_uint32()?),
            (4, WireType::Varint) => self.layers = Some(r.read_uint32()?),
            (5, _) => return merge_repeated_varint(&mut self.sprite_id, key, r, |v| v as u32),
            (6, WireType::LengthDelimited) => merge_message(&mut self.animation, r)?,
            (7, WireType::Varint) => self.bounding_square = Some(r.read_uint32()?),
            (8, WireType::Varint) => self.is_opaque = Some(r.read_bool()?),
            (9, WireType::LengthDelimited) => {
                push_message(&mut self.bounding_box_per_direction, r)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_uint32(1, self.pattern_width)?;
        w.write_opt_uint32(2, self.pattern_height)?;
        w.write_opt_uint32(3, self.pattern_depth)?;
        w.write_opt_uint32(4, self.layers)?;
        w.write_repeated_uint32(5, &self.sprite_id)?;
        write_opt_message(w, 6, self.animation.as_ref())?;
        w.write_opt_uint32(7, self.bounding_square)?;
        w.write_opt_bool(8, self.is_opaque)?;
        write_repeated_message(w, 9, &self.bounding_box_per_direction)
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameGroup {
    pub fixed_frame_group: Option<FixedFrameGroup>,
    pub id: Option<u32>,
    pub sprite_info: Option<SpriteInfo>,
    pub unknown: UnknownFields,
}

impl Message for FrameGroup {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => {
                self.fixed_frame_group = Some(FixedFrameGroup::from_raw(r.read_int32()?))
            }
            (2, WireType::Varint) => self.id = Some(r.read_uint32()?),
            (3, WireType::LengthDelimited) => merge_message(&mut self.sprite_info, r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_int32(1, self.fixed_frame_group.map(|v| v.raw()))?;
        w.write_opt_uint32(2, self.id)?;
        write_opt_message(w, 3, self.sprite_info.as_ref())
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
