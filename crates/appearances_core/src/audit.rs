//! Read-only walk that reports schema-unrecognised bytes at every level of a
//! decoded catalog.

use crate::message::Message;
use crate::schema::{Appearance, AppearanceFlags, AppearanceKind, Catalog, FrameGroup};
use crate::wire::WireType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub label: &'static str,
    /// Owning appearance kind and id, when the record sits below an
    /// appearance.
    pub kind: Option<AppearanceKind>,
    pub appearance_id: Option<u32>,
    pub field_number: u32,
    pub wire_type: WireType,
    /// Encoded length of the field, key included.
    pub byte_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    pub label: &'static str,
    pub fields: usize,
    pub bytes: usize,
}

/// Depth-first, parent before children, sequences in file order. Appearance
/// kinds are visited Object, Effect, Missile, Outfit.
pub fn audit(catalog: &Catalog) -> Vec<AuditRecord> {
    let mut auditor = Auditor::default();
    auditor.check("Appearances", Some(catalog));
    for kind in AppearanceKind::ALL {
        for appearance in catalog.appearances(kind) {
            auditor.owner = Some((kind, appearance.id));
            auditor.appearance(appearance);
        }
    }
    auditor.owner = None;
    auditor.check(
        "SpecialMeaningAppearanceIds",
        catalog.special_meaning_appearance_ids.as_ref(),
    );
    auditor.records
}

/// Per-label totals in first-seen order.
pub fn summarize(records: &[AuditRecord]) -> Vec<LabelSummary> {
    let mut out: Vec<LabelSummary> = Vec::new();
    for record in records {
        match out.iter_mut().find(|s| s.label == record.label) {
            Some(summary) => {
                summary.fields += 1;
                summary.bytes += record.byte_length;
            }
            None => out.push(LabelSummary {
                label: record.label,
                fields: 1,
                bytes: record.byte_length,
            }),
        }
    }
    out
}

pub fn log_audit(records: &[AuditRecord]) {
    for record in records {
        tracing::info!(
            label = record.label,
            kind = record.kind.map(|k| k.as_str()),
            appearance_id = record.appearance_id,
            field_number = record.field_number,
            wire_type = record.wire_type.raw(),
            byte_length = record.byte_length,
            "unknown field"
        );
    }
}

#[derive(Default)]
struct Auditor {
    owner: Option<(AppearanceKind, Option<u32>)>,
    records: Vec<AuditRecord>,
}

impl Auditor {
    fn check<M: Message>(&mut self, label: &'static str, message: Option<&M>) {
        let Some(message) = message else {
            return;
        };
        for field in message.unknown_fields().fields() {
            match field {
                Ok(field) => self.records.push(AuditRecord {
                    label,
                    kind: self.owner.map(|(kind, _)| kind),
                    appearance_id: self.owner.and_then(|(_, id)| id),
                    field_number: field.number,
                    wire_type: field.wire_type,
                    byte_length: field.range.len(),
                }),
                Err(e) => {
                    tracing::warn!(label, error = %e, "unreadable unknown-field blob");
                }
            }
        }
    }

    fn appearance(&mut self, appearance: &Appearance) {
        self.check("Appearance", Some(appearance));
        if let Some(flags) = appearance.flags.as_ref() {
            self.flags(flags);
        }
        for frame_group in &appearance.frame_group {
            self.frame_group(frame_group);
        }
    }

    fn flags(&mut self, flags: &AppearanceFlags) {
        self.check("Flags", Some(flags));
        self.check("Flags.Automap", flags.automap.as_ref());
        self.check("Flags.Bank", flags.bank.as_ref());
        self.check("Flags.Hook", flags.hook.as_ref());
        self.check("Flags.Market", flags.market.as_ref());
        self.check("Flags.Shift", flags.shift.as_ref());
        self.check("Flags.Lenshelp", flags.lenshelp.as_ref());
        self.check("Flags.Light", flags.light.as_ref());
        self.check("Flags.Write", flags.write.as_ref());
        self.check("Flags.WriteOnce", flags.write_once.as_ref());
        self.check("Flags.Height", flags.height.as_ref());
        self.check("Flags.Clothes", flags.clothes.as_ref());
        self.check("Flags.DefaultAction", flags.default_action.as_ref());
        self.check("Flags.Changedtoexpire", flags.changedtoexpire.as_ref());
        self.check("Flags.Cyclopediaitem", flags.cyclopediaitem.as_ref());
        self.check(
            "Flags.Upgradeclassification",
            flags.upgradeclassification.as_ref(),
        );
        for npc in &flags.npcsaledata {
            self.check("Flags.NpcSaleData", Some(npc));
        }
    }

    fn frame_group(&mut self, frame_group: &FrameGroup) {
        self.check("FrameGroup", Some(frame_group));
        let Some(sprite_info) = frame_group.sprite_info.as_ref() else {
            return;
        };
        self.check("SpriteInfo", Some(sprite_info));
        self.check("SpriteInfo.Animation", sprite_info.animation.as_ref());
        for bounding_box in &sprite_info.bounding_box_per_direction {
            self.check("BoundingBoxPerDirection", Some(bounding_box));
        }
        if let Some(animation) = sprite_info.animation.as_ref() {
            for phase in &animation.sprite_phase {
                self.check("SpritePhase", Some(phase));
            }
        }
    }
}
