mod common;

use appearances_core::audit::{AuditRecord, audit, summarize};
use appearances_core::schema::{AppearanceKind, Catalog};
use appearances_core::wire::WireType;

use common::*;

#[test]
fn injected_unknown_fields_are_reported_in_walk_order() {
    let catalog = Catalog::decode(&sample_catalog()).expect("failed to decode sample catalog");
    let records = audit(&catalog);

    let object = |label, field_number, wire_type, byte_length| AuditRecord {
        label,
        kind: Some(AppearanceKind::Object),
        appearance_id: Some(3031),
        field_number,
        wire_type,
        byte_length,
    };
    assert_eq!(
        records,
        vec![
            AuditRecord {
                label: "Appearances",
                kind: None,
                appearance_id: None,
                field_number: 20,
                wire_type: WireType::Varint,
                byte_length: 3,
            },
            object("Appearance", 90, WireType::Varint, 3),
            object("Flags", 99, WireType::Fixed32, 6),
            object("SpritePhase", 7, WireType::LengthDelimited, 5),
        ]
    );
}

#[test]
fn byte_length_covers_key_and_payload() {
    for (field, expected) in [
        (uint(90, 7), 3),
        (uint(90, 300), 4),
        (fixed32(90, 1), 6),
        (len(90, &[0u8; 200]), 2 + 2 + 200),
    ] {
        let appearance = cat(&[&uint(1, 1), &field]);
        let catalog = Catalog::decode(&len(1, &appearance)).expect("failed to decode");
        let records = audit(&catalog);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].byte_length, expected);
        assert_eq!(records[0].byte_length, field.len());
    }
}

#[test]
fn kinds_are_visited_object_effect_missile_outfit() {
    let tagged = |id: u64| len(3, &cat(&[&uint(id as u32 + 60, 1)]));
    let appearance = |id: u64| cat(&[&uint(1, id), &tagged(id)]);
    // File order: missile, outfit, effect, object.
    let bytes = cat(&[
        &len(4, &appearance(4)),
        &len(2, &appearance(2)),
        &len(3, &appearance(3)),
        &len(1, &appearance(1)),
    ]);
    let catalog = Catalog::decode(&bytes).expect("failed to decode");
    let seen: Vec<(Option<AppearanceKind>, Option<u32>)> = audit(&catalog)
        .iter()
        .map(|r| (r.kind, r.appearance_id))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Some(AppearanceKind::Object), Some(1)),
            (Some(AppearanceKind::Effect), Some(3)),
            (Some(AppearanceKind::Missile), Some(4)),
            (Some(AppearanceKind::Outfit), Some(2)),
        ]
    );
}

#[test]
fn sub_records_carry_their_own_labels() {
    let flags = cat(&[
        &len(1, &uint(9, 1)),
        &len(23, &uint(9, 1)),
        &len(40, &uint(9, 1)),
        &len(40, &uint(9, 1)),
        &uint(70, 1),
    ]);
    let catalog = Catalog::decode(&len(1, &with_flags(5, &flags))).expect("failed to decode");
    let labels: Vec<&str> = audit(&catalog).iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![
            "Flags",
            "Flags.Bank",
            "Flags.Light",
            "Flags.NpcSaleData",
            "Flags.NpcSaleData",
        ]
    );
}

#[test]
fn every_nested_record_is_audited_under_its_label() {
    let tag = uint(15, 1);
    let sub = |number: u32| len(number, &tag);
    let flags = cat(&[
        &sub(1),
        &sub(10),
        &sub(11),
        &sub(21),
        &sub(23),
        &sub(26),
        &sub(27),
        &sub(30),
        &sub(31),
        &sub(34),
        &sub(35),
        &sub(36),
        &sub(40),
        &sub(41),
        &sub(44),
        &sub(48),
        &tag,
    ]);
    let phase = cat(&[&uint(1, 100), &tag]);
    let animation = cat(&[&uint(1, 0), &len(6, &phase), &tag]);
    let bounding_box = cat(&[&uint(1, 0), &tag]);
    let sprite_info = cat(&[
        &uint(5, 10),
        &len(6, &animation),
        &len(9, &bounding_box),
        &tag,
    ]);
    let frame_group = cat(&[&uint(2, 0), &len(3, &sprite_info), &tag]);
    let appearance = cat(&[
        &uint(1, 77),
        &len(2, &frame_group),
        &len(3, &flags),
        &tag,
    ]);
    let bytes = cat(&[
        &len(1, &appearance),
        &len(5, &cat(&[&uint(1, 3031), &tag])),
    ]);

    let catalog = Catalog::decode(&bytes).expect("failed to decode");
    let records = audit(&catalog);
    let labels: Vec<&str> = records.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![
            "Appearance",
            "Flags",
            "Flags.Automap",
            "Flags.Bank",
            "Flags.Hook",
            "Flags.Market",
            "Flags.Shift",
            "Flags.Lenshelp",
            "Flags.Light",
            "Flags.Write",
            "Flags.WriteOnce",
            "Flags.Height",
            "Flags.Clothes",
            "Flags.DefaultAction",
            "Flags.Changedtoexpire",
            "Flags.Cyclopediaitem",
            "Flags.Upgradeclassification",
            "Flags.NpcSaleData",
            "FrameGroup",
            "SpriteInfo",
            "SpriteInfo.Animation",
            "BoundingBoxPerDirection",
            "SpritePhase",
            "SpecialMeaningAppearanceIds",
        ]
    );
    for record in &records {
        assert_eq!(
            (record.field_number, record.wire_type, record.byte_length),
            (15, WireType::Varint, 2),
            "{}",
            record.label
        );
    }
    let (special, owned) = records.split_last().expect("records should not be empty");
    assert!(owned
        .iter()
        .all(|r| r.kind == Some(AppearanceKind::Object) && r.appearance_id == Some(77)));
    assert_eq!((special.kind, special.appearance_id), (None, None));

    assert_eq!(catalog.encode().expect("failed to encode"), bytes);
}

#[test]
fn clean_catalog_has_no_records() {
    let bytes = len(1, &with_flags(5, &cat(&[&len(23, &uint(1, 2))])));
    let catalog = Catalog::decode(&bytes).expect("failed to decode");
    assert!(audit(&catalog).is_empty());
}

#[test]
fn summary_groups_by_label() {
    let flags = cat(&[&uint(70, 1), &uint(71, 2)]);
    let bytes = cat(&[
        &len(1, &with_flags(1, &flags)),
        &len(1, &cat(&[&uint(1, 2), &uint(90, 1)])),
    ]);
    let catalog = Catalog::decode(&bytes).expect("failed to decode");
    let summary = summarize(&audit(&catalog));
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].label, "Flags");
    assert_eq!((summary[0].fields, summary[0].bytes), (2, 6));
    assert_eq!(summary[1].label, "Appearance");
    assert_eq!((summary[1].fields, summary[1].bytes), (1, 3));
}
