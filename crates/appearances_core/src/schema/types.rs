use std::borrow::Cow;
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed protobuf enum that still carries values it does not name, so a
/// newer client's enum value survives decode and re-encode.
///
/// Serialized as the short upper-case name (or the raw integer when unknown);
/// deserializes from an integer, the short name or the full prefixed name.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, prefix = $prefix:literal {
            $($variant:ident = $raw:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
            Unknown(i32),
        }

        impl $name {
            pub fn from_raw(raw: i32) -> Self {
                match raw {
                    $($raw => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            pub fn raw(&self) -> i32 {
                match *self {
                    $(Self::$variant => $raw,)+
                    Self::Unknown(other) => other,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match *self {
                    $(Self::$variant => $label,)+
                    Self::Unknown(_) => "UNKNOWN",
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                let short = name.strip_prefix($prefix).unwrap_or(name);
                match short {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    Self::Unknown(v) => write!(f, "UNKNOWN ({})", v),
                    _ => f.write_str(self.as_str()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match *self {
                    Self::Unknown(v) => serializer.serialize_i32(v),
                    _ => serializer.serialize_str(self.as_str()),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct EnumVisitor;

                impl Visitor<'_> for EnumVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a {} name or integer value", stringify!($name))
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$name, E> {
                        i32::try_from(v)
                            .map($name::from_raw)
                            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$name, E> {
                        i32::try_from(v)
                            .map($name::from_raw)
                            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        $name::from_name(v)
                            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
                    }
                }

                deserializer.deserialize_any(EnumVisitor)
            }
        }
    };
}

wire_enum!(
    PlayerAction, prefix = "PLAYER_ACTION_" {
        None = 0 => "NONE",
        Look = 1 => "LOOK",
        Use = 2 => "USE",
        Open = 3 => "OPEN",
        AutowalkHighlight = 4 => "AUTOWALK_HIGHLIGHT",
    }
);

wire_enum!(
    ItemCategory, prefix = "ITEM_CATEGORY_" {
        Armors = 1 => "ARMORS",
        Amulets = 2 => "AMULETS",
        Boots = 3 => "BOOTS",
        Containers = 4 => "CONTAINERS",
        Decoration = 5 => "DECORATION",
        Food = 6 => "FOOD",
        HelmetsHats = 7 => "HELMETS_HATS",
        Legs = 8 => "LEGS",
        Others = 9 => "OTHERS",
        Potions = 10 => "POTIONS",
        Rings = 11 => "RINGS",
        Runes = 12 => "RUNES",
        Shields = 13 => "SHIELDS",
        Tools = 14 => "TOOLS",
        Valuables = 15 => "VALUABLES",
        Ammunition = 16 => "AMMUNITION",
        Axes = 17 => "AXES",
        Clubs = 18 => "CLUBS",
        DistanceWeapons = 19 => "DISTANCE_WEAPONS",
        Swords = 20 => "SWORDS",
        WandsRods = 21 => "WANDS_RODS",
        PremiumScrolls = 22 => "PREMIUM_SCROLLS",
        TibiaCoins = 23 => "TIBIA_COINS",
        CreatureProducts = 24 => "CREATURE_PRODUCTS",
        Quiver = 25 => "QUIVER",
    }
);

wire_enum!(
    PlayerProfession, prefix = "PLAYER_PROFESSION_" {
        Any = -1 => "ANY",
        None = 0 => "NONE",
        Knight = 1 => "KNIGHT",
        Paladin = 2 => "PALADIN",
        Sorcerer = 3 => "SORCERER",
        Druid = 4 => "DRUID",
        Monk = 5 => "MONK",
        Promoted = 10 => "PROMOTED",
    }
);

wire_enum!(
    AnimationLoopType, prefix = "ANIMATION_LOOP_TYPE_" {
        PingPong = -1 => "PINGPONG",
        Infinite = 0 => "INFINITE",
        Counted = 1 => "COUNTED",
    }
);

wire_enum!(
    HookType, prefix = "HOOK_TYPE_" {
        South = 1 => "SOUTH",
        East = 2 => "EAST",
    }
);

wire_enum!(
    FixedFrameGroup, prefix = "FIXED_FRAME_GROUP_" {
        OutfitIdle = 0 => "OUTFIT_IDLE",
        OutfitMoving = 1 => "OUTFIT_MOVING",
        ObjectInitial = 2 => "OBJECT_INITIAL",
    }
);

/// `bytes` field holding client text. Edits supply it as a string; it is
/// rendered lossily since the client does not guarantee UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteString(pub Vec<u8>);

impl ByteString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for ByteString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ByteStringVisitor;

        impl<'de> Visitor<'de> for ByteStringVisitor {
            type Value = ByteString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or an array of bytes")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ByteString, E> {
                Ok(ByteString::from(v))
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<ByteString, E> {
                Ok(ByteString(v.to_vec()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ByteString, A::Error> {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(b) = seq.next_element::<u8>()? {
                    bytes.push(b);
                }
                Ok(ByteString(bytes))
            }
        }

        deserializer.deserialize_any(ByteStringVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_keeps_unnamed_values() {
        let value = ItemCategory::from_raw(99);
        assert_eq!(value, ItemCategory::Unknown(99));
        assert_eq!(value.raw(), 99);
        assert_eq!(value.to_string(), "UNKNOWN (99)");
    }

    #[test]
    fn enum_accepts_short_and_prefixed_names() {
        assert_eq!(PlayerAction::from_name("USE"), Some(PlayerAction::Use));
        assert_eq!(
            PlayerAction::from_name("PLAYER_ACTION_USE"),
            Some(PlayerAction::Use)
        );
        assert_eq!(PlayerAction::from_name("use"), None);
    }

    #[test]
    fn enum_deserializes_from_integer_or_name() {
        let from_int: PlayerProfession = serde_json::from_str("-1").unwrap();
        assert_eq!(from_int, PlayerProfession::Any);
        let from_name: PlayerProfession = serde_json::from_str("\"KNIGHT\"").unwrap();
        assert_eq!(from_name, PlayerProfession::Knight);
        assert!(serde_json::from_str::<PlayerProfession>("\"WIZARD\"").is_err());
        assert!(serde_json::from_str::<PlayerProfession>("true").is_err());
    }

    #[test]
    fn byte_string_deserializes_from_text_or_array() {
        let text: ByteString = serde_json::from_str("\"Rashid\"").unwrap();
        assert_eq!(text.as_bytes(), b"Rashid");
        let raw: ByteString = serde_json::from_str("[0, 255]").unwrap();
        assert_eq!(raw.as_bytes(), &[0, 255]);
    }
}
