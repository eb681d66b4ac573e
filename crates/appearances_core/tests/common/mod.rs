//! Hand-assembled wire bytes for catalog fixtures.

#![allow(dead_code)]

pub const VARINT: u8 = 0;
pub const FIXED64: u8 = 1;
pub const LEN: u8 = 2;
pub const FIXED32: u8 = 5;

pub fn varint(mut n: u64) -> Vec<u8> {
    let mut out = Vec::new();
    while n >= 0x80 {
        out.push((n as u8) | 0x80);
        n >>= 7;
    }
    out.push(n as u8);
    out
}

pub fn key(number: u32, wire_type: u8) -> Vec<u8> {
    varint(((number as u64) << 3) | wire_type as u64)
}

pub fn uint(number: u32, value: u64) -> Vec<u8> {
    let mut out = key(number, VARINT);
    out.extend(varint(value));
    out
}

pub fn len(number: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = key(number, LEN);
    out.extend(varint(payload.len() as u64));
    out.extend_from_slice(payload);
    out
}

pub fn fixed32(number: u32, value: u32) -> Vec<u8> {
    let mut out = key(number, FIXED32);
    out.extend_from_slice(&value.to_le_bytes());
    out
}

pub fn cat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// Unknown Flags field 99, fixed32.
pub fn flags_unknown() -> Vec<u8> {
    fixed32(99, 0xdead_beef)
}

/// Unknown Appearance field 90, varint.
pub fn appearance_unknown() -> Vec<u8> {
    uint(90, 7)
}

/// Unknown SpritePhase field 7, length-delimited.
pub fn phase_unknown() -> Vec<u8> {
    len(7, b"xyz")
}

/// Object 3031: Bank{waypoints=5}, Light{brightness=2,color=215}, unmove
/// false, an unknown Flags field, an unknown Appearance field and one frame
/// group whose sprite phase carries an unknown field.
pub fn object_3031() -> Vec<u8> {
    let flags = cat(&[
        &len(1, &uint(1, 5)),
        &uint(14, 0),
        &len(23, &cat(&[&uint(1, 2), &uint(2, 215)])),
        &flags_unknown(),
    ]);
    let phase = cat(&[&uint(1, 100), &uint(2, 200), &phase_unknown()]);
    let animation = cat(&[&uint(1, 0), &len(6, &phase)]);
    let sprite_info = cat(&[
        &uint(1, 1),
        &uint(2, 1),
        &uint(5, 10),
        &uint(5, 11),
        &len(6, &animation),
    ]);
    let frame_group = cat(&[&uint(1, 0), &uint(2, 0), &len(3, &sprite_info)]);
    cat(&[
        &uint(1, 3031),
        &len(2, &frame_group),
        &len(3, &flags),
        &len(4, b"gold coin"),
        &appearance_unknown(),
    ])
}

/// Object 2148 with no Flags record.
pub fn object_2148() -> Vec<u8> {
    cat(&[&uint(1, 2148), &len(4, b"plain")])
}

pub fn with_flags(id: u32, flags: &[u8]) -> Vec<u8> {
    cat(&[&uint(1, id as u64), &len(3, flags)])
}

/// Canonically ordered catalog: objects 3031 and 2148, then outfit, effect and
/// missile appearances all reusing id 3031, special ids and a root-level
/// unknown field.
pub fn sample_catalog() -> Vec<u8> {
    let outfit = with_flags(3031, &len(1, &uint(1, 1)));
    let effect = with_flags(3031, &uint(14, 1));
    let missile = with_flags(3031, &uint(2, 1));
    let special = cat(&[&uint(1, 3031), &uint(2, 3035)]);
    cat(&[
        &len(1, &object_3031()),
        &len(1, &object_2148()),
        &len(2, &outfit),
        &len(3, &effect),
        &len(4, &missile),
        &len(5, &special),
        &uint(20, 1),
    ])
}
