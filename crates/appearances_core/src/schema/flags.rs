use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::message::{
    Message, UnknownFields, merge_message, push_message, uint32_message, write_opt_message,
    write_repeated_message,
};
use crate::wire::{FieldKey, WireReader, WireType, WireWriter, merge_repeated_varint};

use super::types::{ByteString, HookType, ItemCategory, PlayerAction, PlayerProfession};

uint32_message!(editable FlagBank { waypoints = 1 });
uint32_message!(editable FlagWrite { max_text_length = 1 });
uint32_message!(editable FlagWriteOnce { max_text_length_once = 1 });
uint32_message!(editable FlagLight { brightness = 1, color = 2 });
uint32_message!(editable FlagHeight { elevation = 1 });
uint32_message!(editable FlagShift { x = 1, y = 2 });
uint32_message!(editable FlagClothes { slot = 1 });
uint32_message!(editable FlagAutomap { color = 1 });
uint32_message!(editable FlagLenshelp { id = 1 });
uint32_message!(editable FlagChangedToExpire { former_object_typeid = 1 });
uint32_message!(editable FlagCyclopedia { cyclopedia_type = 1 });
uint32_message!(editable FlagUpgradeClassification { upgrade_classification = 1 });

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagDefaultAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PlayerAction>,
    #[serde(skip)]
    pub unknown: UnknownFields,
}

impl Message for FlagDefaultAction {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.action = Some(PlayerAction::from_raw(r.read_int32()?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_int32(1, self.action.map(|v| v.raw()))
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagHook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<HookType>,
    #[serde(skip)]
    pub unknown: UnknownFields,
}

impl Message for FlagHook {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.direction = Some(HookType::from_raw(r.read_int32()?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_int32(1, self.direction.map(|v| v.raw()))
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagMarket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ItemCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_as_object_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_as_object_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrict_to_profession: Vec<PlayerProfession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<u32>,
    #[serde(skip)]
    pub unknown: UnknownFields,
}

impl Message for FlagMarket {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::Varint) => self.category = Some(ItemCategory::from_raw(r.read_int32()?)),
            (2, WireType::Varint) => self.trade_as_object_id = Some(r.read_uint32()?),
            (3, WireType::Varint) => self.show_as_object_id = Some(r.read_uint32()?),
            (5, _) => {
                return merge_repeated_varint(&mut self.restrict_to_profession, key, r, |v| {
                    PlayerProfession::from_raw(v as i32)
                });
            }
            (6, WireType::Varint) => self.minimum_level = Some(r.read_uint32()?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_int32(1, self.category.map(|v| v.raw()))?;
        w.write_opt_uint32(2, self.trade_as_object_id)?;
        w.write_opt_uint32(3, self.show_as_object_id)?;
        for profession in &self.restrict_to_profession {
            w.write_int32(5, profession.raw())?;
        }
        w.write_opt_uint32(6, self.minimum_level)
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

/// `AppearanceFlags.npcsaledata` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NpcSaleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ByteString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ByteString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_object_type_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_quest_flag_display_name: Option<ByteString>,
    #[serde(skip)]
    pub unknown: UnknownFields,
}

impl Message for NpcSaleData {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        match (key.number, key.wire_type) {
            (1, WireType::LengthDelimited) => {
                self.name = Some(ByteString(r.read_length_delimited()?.to_vec()))
            }
            (2, WireType::LengthDelimited) => {
                self.location = Some(ByteString(r.read_length_delimited()?.to_vec()))
            }
            (3, WireType::Varint) => self.sale_price = Some(r.read_uint32()?),
            (4, WireType::Varint) => self.buy_price = Some(r.read_uint32()?),
            (5, WireType::Varint) => self.currency_object_type_id = Some(r.read_uint32()?),
            (6, WireType::LengthDelimited) => {
                self.currency_quest_flag_display_name =
                    Some(ByteString(r.read_length_delimited()?.to_vec()))
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        w.write_opt_bytes(1, self.name.as_ref().map(ByteString::as_bytes))?;
        w.write_opt_bytes(2, self.location.as_ref().map(ByteString::as_bytes))?;
        w.write_opt_uint32(3, self.sale_price)?;
        w.write_opt_uint32(4, self.buy_price)?;
        w.write_opt_uint32(5, self.currency_object_type_id)?;
        w.write_opt_bytes(
            6,
            self.currency_quest_flag_display_name
                .as_ref()
                .map(ByteString::as_bytes),
        )
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

/// Editable metadata of an appearance. Field names match the schema so edit
/// records can address them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppearanceFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<FlagBank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forceuse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiuse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<FlagWrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_once: Option<FlagWriteOnce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidpool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpass: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmove: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_movement_animation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidcontainer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hang: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<FlagHook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<FlagLight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dont_hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translucent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<FlagShift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<FlagHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lying_object: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate_always: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automap: Option<FlagAutomap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lenshelp: Option<FlagLenshelp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullbank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_look: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothes: Option<FlagClothes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<FlagDefaultAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<FlagMarket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unwrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topeffect: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub npcsaledata: Vec<NpcSaleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changedtoexpire: Option<FlagChangedToExpire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_corpse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyclopediaitem: Option<FlagCyclopedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_off_socket: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reportable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgradeclassification: Option<FlagUpgradeClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_addons_east: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_addons_west: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_addons_south: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_addons_north: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wearout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clockexpire: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expirestop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapkit: Option<bool>,
    #[serde(skip)]
    pub unknown: UnknownFields,
}

impl AppearanceFlags {
    fn bool_slot(&mut self, number: u32) -> Option<&mut Option<bool>> {
        let slot = match number {
            2 => &mut self.clip,
            3 => &mut self.bottom,
            4 => &mut self.top,
            5 => &mut self.container,
            6 => &mut self.cumulative,
            7 => &mut self.usable,
            8 => &mut self.forceuse,
            9 => &mut self.multiuse,
            12 => &mut self.liquidpool,
            13 => &mut self.unpass,
            14 => &mut self.unmove,
            15 => &mut self.unsight,
            16 => &mut self.avoid,
            17 => &mut self.no_movement_animation,
            18 => &mut self.take,
            19 => &mut self.liquidcontainer,
            20 => &mut self.hang,
            22 => &mut self.rotate,
            24 => &mut self.dont_hide,
            25 => &mut self.translucent,
            28 => &mut self.lying_object,
            29 => &mut self.animate_always,
            32 => &mut self.fullbank,
            33 => &mut self.ignore_look,
            37 => &mut self.wrap,
            38 => &mut self.unwrap,
            39 => &mut self.topeffect,
            42 => &mut self.corpse,
            43 => &mut self.player_corpse,
            45 => &mut self.ammo,
            46 => &mut self.show_off_socket,
            47 => &mut self.reportable,
            49 => &mut self.reverse_addons_east,
            50 => &mut self.reverse_addons_west,
            51 => &mut self.reverse_addons_south,
            52 => &mut self.reverse_addons_north,
            53 => &mut self.wearout,
            54 => &mut self.clockexpire,
            55 => &mut self.expire,
            56 => &mut self.expirestop,
            57 => &mut self.wrapkit,
            _ => return None,
        };
        Some(slot)
    }
}

impl Message for AppearanceFlags {
    fn merge_field(&mut self, key: FieldKey, r: &mut WireReader<'_>) -> Result<bool, DecodeError> {
        if key.wire_type == WireType::Varint {
            if let Some(slot) = self.bool_slot(key.number) {
                *slot = Some(r.read_bool()?);
                return Ok(true);
            }
            return Ok(false);
        }
        if key.wire_type != WireType::LengthDelimited {
            return Ok(false);
        }
        match key.number {
            1 => merge_message(&mut self.bank, r)?,
            10 => merge_message(&mut self.write, r)?,
            11 => merge_message(&mut self.write_once, r)?,
            21 => merge_message(&mut self.hook, r)?,
            23 => merge_message(&mut self.light, r)?,
            26 => merge_message(&mut self.shift, r)?,
            27 => merge_message(&mut self.height, r)?,
            30 => merge_message(&mut self.automap, r)?,
            31 => merge_message(&mut self.lenshelp, r)?,
            34 => merge_message(&mut self.clothes, r)?,
            35 => merge_message(&mut self.default_action, r)?,
            36 => merge_message(&mut self.market, r)?,
            40 => push_message(&mut self.npcsaledata, r)?,
            41 => merge_message(&mut self.changedtoexpire, r)?,
            44 => merge_message(&mut self.cyclopediaitem, r)?,
            48 => merge_message(&mut self.upgradeclassification, r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn encode_fields(&self, w: &mut WireWriter) -> Result<(), EncodeError> {
        write_opt_message(w, 1, self.bank.as_ref())?;
        w.write_opt_bool(2, self.clip)?;
        w.write_opt_bool(3, self.bottom)?;
        w.write_opt_bool(4, self.top)?;
        w.write_opt_bool(5, self.container)?;
        w.write_opt_bool(6, self.cumulative)?;
        w.write_opt_bool(7, self.usable)?;
        w.write_opt_bool(8, self.forceuse)?;
        w.write_opt_bool(9, self.multiuse)?;
        write_opt_message(w, 10, self.write.as_ref())?;
        write_opt_message(w, 11, self.write_once.as_ref())?;
        w.write_opt_bool(12, self.liquidpool)?;
        w.write_opt_bool(13, self.unpass)?;
        w.write_opt_bool(14, self.unmove)?;
        w.write_opt_bool(15, self.unsight)?;
        w.write_opt_bool(16, self.avoid)?;
        w.write_opt_bool(17, self.no_movement_animation)?;
        w.write_opt_bool(18, self.take)?;
        w.write_opt_bool(19, self.liquidcontainer)?;
        w.write_opt_bool(20, self.hang)?;
        write_opt_message(w, 21, self.hook.as_ref())?;
        w.write_opt_bool(22, self.rotate)?;
        write_opt_message(w, 23, self.light.as_ref())?;
        w.write_opt_bool(24, self.dont_hide)?;
        w.write_opt_bool(25, self.translucent)?;
        write_opt_message(w, 26, self.shift.as_ref())?;
        write_opt_message(w, 27, self.height.as_ref())?;
        w.write_opt_bool(28, self.lying_object)?;
        w.write_opt_bool(29, self.animate_always)?;
        write_opt_message(w, 30, self.automap.as_ref())?;
        write_opt_message(w, 31, self.lenshelp.as_ref())?;
        w.write_opt_bool(32, self.fullbank)?;
        w.write_opt_bool(33, self.ignore_look)?;
        write_opt_message(w, 34, self.clothes.as_ref())?;
        write_opt_message(w, 35, self.default_action.as_ref())?;
        write_opt_message(w, 36, self.market.as_ref())?;
        w.write_opt_bool(37, self.wrap)?;
        w.write_opt_bool(38, self.unwrap)?;
        w.write_opt_bool(39, self.topeffect)?;
        write_repeated_message(w, 40, &self.npcsaledata)?;
        write_opt_message(w, 41, self.changedtoexpire.as_ref())?;
        w.write_opt_bool(42, self.corpse)?;
        w.write_opt_bool(43, self.player_corpse)?;
        write_opt_message(w, 44, self.cyclopediaitem.as_ref())?;
        w.write_opt_bool(45, self.ammo)?;
        w.write_opt_bool(46, self.show_off_socket)?;
        w.write_opt_bool(47, self.reportable)?;
        write_opt_message(w, 48, self.upgradeclassification.as_ref())?;
        w.write_opt_bool(49, self.reverse_addons_east)?;
        w.write_opt_bool(50, self.reverse_addons_west)?;
        w.write_opt_bool(51, self.reverse_addons_south)?;
        w.write_opt_bool(52, self.reverse_addons_north)?;
        w.write_opt_bool(53, self.wearout)?;
        w.write_opt_bool(54, self.clockexpire)?;
        w.write_opt_bool(55, self.expire)?;
        w.write_opt_bool(56, self.expirestop)?;
        w.write_opt_bool(57, self.wrapkit)
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
