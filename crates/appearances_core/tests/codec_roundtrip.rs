mod common;

use appearances_core::error::{DecodeError, DecodeErrorKind};
use appearances_core::schema::{AnimationLoopType, Catalog, FixedFrameGroup, ItemCategory};
use appearances_core::Message;

use common::*;

fn decode_sample() -> Catalog {
    Catalog::decode(&sample_catalog()).expect("failed to decode sample catalog")
}

#[test]
fn canonical_catalog_reencodes_byte_for_byte() {
    let bytes = sample_catalog();
    let catalog = Catalog::decode(&bytes).expect("failed to decode sample catalog");
    let encoded = catalog.encode().expect("failed to encode catalog");
    assert_eq!(encoded, bytes);
}

#[test]
fn known_fields_decode_at_every_level() {
    let catalog = decode_sample();
    let counts = catalog.counts();
    assert_eq!(
        (counts.objects, counts.outfits, counts.effects, counts.missiles),
        (2, 1, 1, 1)
    );

    let coin = catalog.find_object(3031).expect("object 3031 missing");
    assert_eq!(coin.name.as_ref().map(|n| n.to_string_lossy()).as_deref(), Some("gold coin"));
    let flags = coin.flags.as_ref().expect("flags missing");
    assert_eq!(flags.bank.as_ref().and_then(|b| b.waypoints), Some(5));
    assert_eq!(flags.unmove, Some(false));
    let light = flags.light.as_ref().expect("light missing");
    assert_eq!((light.brightness, light.color), (Some(2), Some(215)));

    let frame_group = &coin.frame_group[0];
    assert_eq!(frame_group.fixed_frame_group, Some(FixedFrameGroup::OutfitIdle));
    let sprite_info = frame_group.sprite_info.as_ref().expect("sprite info missing");
    assert_eq!(sprite_info.sprite_id, vec![10, 11]);
    let phase = &sprite_info.animation.as_ref().expect("animation missing").sprite_phase[0];
    assert_eq!((phase.duration_min, phase.duration_max), (Some(100), Some(200)));

    assert!(catalog.find_object(2148).expect("object 2148 missing").flags.is_none());
    let special = catalog
        .special_meaning_appearance_ids
        .as_ref()
        .expect("special ids missing");
    assert_eq!(special.gold_coin_id, Some(3031));
    assert_eq!(special.platinum_coin_id, Some(3035));
}

#[test]
fn unknown_bytes_survive_at_every_level() {
    let catalog = Catalog::decode(&catalog_round_trip(&sample_catalog()))
        .expect("failed to decode re-encoded catalog");
    let coin = catalog.find_object(3031).expect("object 3031 missing");

    assert_eq!(catalog.unknown.as_bytes(), uint(20, 1).as_slice());
    assert_eq!(coin.unknown.as_bytes(), appearance_unknown().as_slice());
    assert_eq!(
        coin.flags.as_ref().expect("flags missing").unknown.as_bytes(),
        flags_unknown().as_slice()
    );
    let phase = &coin.frame_group[0]
        .sprite_info
        .as_ref()
        .and_then(|s| s.animation.as_ref())
        .expect("animation missing")
        .sprite_phase[0];
    assert_eq!(phase.unknown.as_bytes(), phase_unknown().as_slice());
}

fn catalog_round_trip(bytes: &[u8]) -> Vec<u8> {
    Catalog::decode(bytes)
        .expect("failed to decode catalog")
        .encode()
        .expect("failed to encode catalog")
}

#[test]
fn out_of_order_input_is_semantically_preserved() {
    // Unknown field first, then known fields in reverse order.
    let flags = cat(&[&flags_unknown(), &uint(14, 1), &len(1, &uint(1, 3))]);
    let bytes = len(1, &cat(&[&len(3, &flags), &uint(1, 7)]));

    let first = Catalog::decode(&bytes).expect("failed to decode catalog");
    let again = Catalog::decode(&first.encode().expect("failed to encode catalog"))
        .expect("failed to decode re-encoded catalog");
    assert_eq!(first, again);

    let flags = again.object[0].flags.as_ref().expect("flags missing");
    assert_eq!(flags.unmove, Some(true));
    assert_eq!(flags.unknown.as_bytes(), flags_unknown().as_slice());
}

#[test]
fn repeated_singular_message_is_merged() {
    let flags = cat(&[
        &len(23, &uint(1, 4)),
        &len(23, &uint(2, 99)),
        &uint(14, 1),
        &uint(14, 0),
    ]);
    let catalog = Catalog::decode(&len(1, &with_flags(1, &flags))).expect("failed to decode");
    let flags = catalog.object[0].flags.as_ref().expect("flags missing");
    let light = flags.light.as_ref().expect("light missing");
    assert_eq!((light.brightness, light.color), (Some(4), Some(99)));
    assert_eq!(flags.unmove, Some(false));
}

#[test]
fn packed_sprite_ids_are_accepted() {
    let sprite_info = len(5, &cat(&[&varint(10), &varint(300)]));
    let frame_group = len(3, &sprite_info);
    let appearance = cat(&[&uint(1, 1), &len(2, &frame_group)]);
    let catalog = Catalog::decode(&len(1, &appearance)).expect("failed to decode");
    let info = catalog.object[0].frame_group[0]
        .sprite_info
        .as_ref()
        .expect("sprite info missing");
    assert_eq!(info.sprite_id, vec![10, 300]);
}

#[test]
fn unnamed_enum_values_round_trip() {
    // loop_type = 7, market category = 99, PINGPONG as sign-extended -1.
    let animation = cat(&[&uint(4, 7)]);
    let pingpong = cat(&[&uint(4, u64::MAX)]);
    let appearance = cat(&[
        &uint(1, 1),
        &len(2, &len(3, &len(6, &animation))),
        &len(2, &len(3, &len(6, &pingpong))),
        &len(3, &len(36, &uint(1, 99))),
    ]);
    let bytes = len(1, &appearance);
    let catalog = Catalog::decode(&bytes).expect("failed to decode");

    let loop_type = |i: usize| {
        catalog.object[0].frame_group[i]
            .sprite_info
            .as_ref()
            .and_then(|s| s.animation.as_ref())
            .and_then(|a| a.loop_type)
    };
    assert_eq!(loop_type(0), Some(AnimationLoopType::Unknown(7)));
    assert_eq!(loop_type(1), Some(AnimationLoopType::PingPong));
    let market = catalog.object[0]
        .flags
        .as_ref()
        .and_then(|f| f.market.as_ref())
        .expect("market missing");
    assert_eq!(market.category, Some(ItemCategory::Unknown(99)));

    assert_eq!(catalog.encode().expect("failed to encode"), bytes);
}

#[test]
fn empty_input_is_an_empty_catalog() {
    let catalog = Catalog::decode(&[]).expect("failed to decode empty input");
    assert_eq!(catalog, Catalog::default());
    assert!(catalog.encode().expect("failed to encode").is_empty());
}

fn decode_err(bytes: &[u8]) -> DecodeError {
    Catalog::decode(bytes).expect_err("decode should fail")
}

#[test]
fn length_overrun_is_reported_at_its_prefix() {
    let err = decode_err(&[0x0a, 0x05, 0x01]);
    assert_eq!(err.offset, 1);
    assert_eq!(
        err.kind,
        DecodeErrorKind::LengthOverrun {
            len: 5,
            remaining: 1
        }
    );
}

#[test]
fn nested_truncation_reports_absolute_offset() {
    // Appearance payload ends in the middle of the id varint.
    let err = decode_err(&[0x0a, 0x03, 0x08, 0x80, 0x80]);
    assert_eq!(err.kind, DecodeErrorKind::Truncated);
    assert_eq!(err.offset, 5);
}

#[test]
fn malformed_keys_are_rejected() {
    assert_eq!(
        decode_err(&[0x00, 0x01]).kind,
        DecodeErrorKind::InvalidFieldNumber(0)
    );
    assert_eq!(decode_err(&[0x0e]).kind, DecodeErrorKind::InvalidWireType(6));
    assert_eq!(
        decode_err(&[0x0c]).kind,
        DecodeErrorKind::UnexpectedEndGroup
    );
}

#[test]
fn unknown_groups_are_kept_verbatim() {
    // field 30 start-group { field 1 varint 5 } field 30 end-group
    let group = [0xf3, 0x01, 0x08, 0x05, 0xf4, 0x01];
    let catalog = Catalog::decode(&group).expect("failed to decode");
    assert_eq!(catalog.unknown.as_bytes(), &group);
    assert_eq!(catalog.encode().expect("failed to encode"), group);
}

#[test]
fn generic_message_decode_matches_catalog_decode() {
    let bytes = sample_catalog();
    let via_trait = <Catalog as Message>::decode(&bytes).expect("failed to decode");
    assert_eq!(via_trait, decode_sample());
}
