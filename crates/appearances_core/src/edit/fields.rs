use serde_json::Value;

use crate::schema::AppearanceFlags;

/// Named accessor over one `AppearanceFlags` field. The table is static, so
/// assignment never needs runtime reflection and the unknown-field blob is
/// unreachable through it.
pub struct FlagField {
    name: &'static str,
    is_set: fn(&AppearanceFlags) -> bool,
    copy: fn(&AppearanceFlags, &mut AppearanceFlags),
    parse: fn(&mut AppearanceFlags, Value) -> Result<(), serde_json::Error>,
}

impl FlagField {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Explicitly present, as opposed to holding the default.
    pub fn is_set(&self, flags: &AppearanceFlags) -> bool {
        (self.is_set)(flags)
    }

    /// Replace the whole field on `dst` with the value held by `src`.
    pub(crate) fn copy(&self, src: &AppearanceFlags, dst: &mut AppearanceFlags) {
        (self.copy)(src, dst)
    }

    pub(crate) fn parse(
        &self,
        flags: &mut AppearanceFlags,
        value: Value,
    ) -> Result<(), serde_json::Error> {
        (self.parse)(flags, value)
    }
}

trait Presence {
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! flag_fields {
    ($($field:ident),+ $(,)?) => {
        /// Every `AppearanceFlags` field, in field-number order.
        pub static FLAG_FIELDS: &[FlagField] = &[
            $(
                FlagField {
                    name: stringify!($field),
                    is_set: |flags| flags.$field.is_present(),
                    copy: |src, dst| dst.$field = src.$field.clone(),
                    parse: |flags, value| {
                        flags.$field = serde_json::from_value(value)?;
                        Ok(())
                    },
                },
            )+
        ];
    };
}

flag_fields!(
    bank,
    clip,
    bottom,
    top,
    container,
    cumulative,
    usable,
    forceuse,
    multiuse,
    write,
    write_once,
    liquidpool,
    unpass,
    unmove,
    unsight,
    avoid,
    no_movement_animation,
    take,
    liquidcontainer,
    hang,
    hook,
    rotate,
    light,
    dont_hide,
    translucent,
    shift,
    height,
    lying_object,
    animate_always,
    automap,
    lenshelp,
    fullbank,
    ignore_look,
    clothes,
    default_action,
    market,
    wrap,
    unwrap,
    topeffect,
    npcsaledata,
    changedtoexpire,
    corpse,
    player_corpse,
    cyclopediaitem,
    ammo,
    show_off_socket,
    reportable,
    upgradeclassification,
    reverse_addons_east,
    reverse_addons_west,
    reverse_addons_south,
    reverse_addons_north,
    wearout,
    clockexpire,
    expire,
    expirestop,
    wrapkit,
);

pub fn find_flag_field(name: &str) -> Option<&'static FlagField> {
    FLAG_FIELDS.iter().find(|field| field.name == name)
}

/// Fields explicitly present on `flags`, in field-number order.
pub fn set_fields(flags: &AppearanceFlags) -> impl Iterator<Item = &'static FlagField> + '_ {
    FLAG_FIELDS.iter().filter(move |field| field.is_set(flags))
}
