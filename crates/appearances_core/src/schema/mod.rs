//! Typed view of the appearances catalog.
//!
//! Every message keeps an [`UnknownFields`] blob next to its known fields;
//! see [`crate::message::Message`].

pub mod flags;
pub mod sprite;
pub mod types;

use std::fmt;

use crate::error::{DecodeError, EncodeError};
use crate::message::{
    Message, UnknownFields, merge_message, push_message, uint32_message, write_opt_message,
    write_repeated_message,
};
use crate::wire::{FieldKey, WireReader, WireType, WireWriter};

pub use flags::{
    AppearanceFlags, FlagAutomap, FlagBank, FlagChangedToExpire, FlagClothes, FlagCyclopedia,
    FlagDefaultAction, FlagHeight, FlagHook, FlagLenshelp, FlagLight, FlagMarket, FlagShift,
    FlagUpgradeClassification, FlagWrite, FlagWriteOnce, NpcSaleData,
};
pub use sprite::{BoundingBox, FrameGroup, SpriteAnimation, SpriteInfo, SpritePhase};
pub use types::{
    AnimationLoopType, ByteString, FixedFrameGroup, HookType, ItemCategory, PlayerAction,
    PlayerProfession,
};

uint32_message!(
    SpecialMeaningAppearanceIds {
        gold_coin_id = 1,
        platinum_coin_id = 2,
        crystal_coin_id = 3,
        tibia_coin_id = 4,
        stamped_letter_id = 5,
        supply_stash_id = 6,
        reward_chest_id = 7,
    }
);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appearance {
    pub id: Option<u32>,
    pub frame_group: Vec<FrameGroup>,
    pub flags: Option<AppearanceFlags>,
    pub name: Option<ByteString>,
    pub description: Option<ByteString>,
    pub unknown: UnknownFields,
}

impl Message for Appearance {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.id = Some(r.read_uint32()?),
            (2, WireType::LengthDelimited) => push_message(&mut self.frame_group, r)?,
            (3, WireType::LengthDelimited) => merge_message(&mut self.flags, r)?,
            (4, WireType::LengthDelimited) => {
                self.name = Some(ByteString(r.read_length_delimited()?.to_vec()))
            }
            (5, WireType::LengthDelimited) => {
                self.description = Some(ByteString(r.read_length_delimited()?.to_vec()))
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_uint32(1, self.id)?;
        write_repeated_message(w, 2, &self.frame_group)?;
        write_opt_message(w, 3, self.flags.as_ref())?;
        w.write_opt_bytes(4, self.name.as_ref().map(ByteString::as_bytes))?;
        w.write_opt_bytes(5, self.description.as_ref().map(ByteString::as_bytes))
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceKind {
    Object,
    Outfit,
    Effect,
    Missile,
}

impl AppearanceKind {
    /// Audit and reporting order.
    pub const ALL: [AppearanceKind; 4] = [Self::Object, Self::Effect, Self::Missile, Self::Outfit];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Object => "Object",
            Self::Outfit => "Outfit",
            Self::Effect => "Effect",
            Self::Missile => "Missile",
        }
    }
}

impl fmt::Display for AppearanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root `Appearances` message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub object: Vec<Appearance>,
    pub outfit: Vec<Appearance>,
    pub effect: Vec<Appearance>,
    pub missile: Vec<Appearance>,
    pub special_meaning_appearance_ids: Option<SpecialMeaningAppearanceIds>,
    pub unknown: UnknownFields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub objects: usize,
    pub outfits: usize,
    pub effects: usize,
    pub missiles: usize,
}

impl Catalog {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        <Self as Message>::decode(bytes)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        <Self as Message>::encode(self)
    }

    pub fn appearances(&self, kind: AppearanceKind) -> &[Appearance] {
        match kind {
            AppearanceKind::Object => &self.object,
            AppearanceKind::Outfit => &self.outfit,
            AppearanceKind::Effect => &self.effect,
            AppearanceKind::Missile => &self.missile,
        }
    }

    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            objects: self.object.len(),
            outfits: self.outfit.len(),
            effects: self.effect.len(),
            missiles: self.missile.len(),
        }
    }

    pub fn find_object(&self, id: u32) -> Option<&Appearance> {
        self.object.iter().find(|a| a.id == Some(id))
    }
}

impl Message for Catalog {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        if key.wire_type != WireType::LengthDelimited {
            return Ok(false);
        }
        match key.number {
            1 => push_message(&mut self.object, r)?,
            2 => push_message(&mut self.outfit, r)?,
            3 => push_message(&mut self.effect, r)?,
            4 => push_message(&mut self.missile, r)?,
            5 => merge_message(&mut self.special_meaning_appearance_ids, r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        write_repeated_message(w, 1, &self.object)?;
        write_repeated_message(w, 2, &self.outfit)?;
        write_repeated_message(w, 3, &self.effect)?;
        write_repeated_message(w, 4, &self.missile)?;
        write_opt_message(w, 5, self.special_meaning_appearance_ids.as_ref())
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
