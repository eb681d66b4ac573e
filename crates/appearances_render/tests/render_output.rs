use appearances_core::audit::AuditRecord;
use appearances_core::edit::{AppliedEdit, MergeReport};
use appearances_core::pipeline::{AuditReport, RunReport};
use appearances_core::schema::{AppearanceKind, CatalogCounts};
use appearances_core::wire::WireType;
use appearances_render::{
    JsonStyle, TextRenderOptions, render_audit_json, render_audit_line, render_audit_text,
    render_report_json, render_report_text,
};
use serde_json::json;

fn records() -> Vec<AuditRecord> {
    vec![
        AuditRecord {
            label: "Appearances",
            kind: None,
            appearance_id: None,
            field_number: 20,
            wire_type: WireType::Varint,
            byte_length: 3,
        },
        AuditRecord {
            label: "Flags",
            kind: Some(AppearanceKind::Object),
            appearance_id: Some(3031),
            field_number: 99,
            wire_type: WireType::Fixed32,
            byte_length: 6,
        },
        AuditRecord {
            label: "Flags",
            kind: Some(AppearanceKind::Object),
            appearance_id: Some(3035),
            field_number: 99,
            wire_type: WireType::Fixed32,
            byte_length: 6,
        },
    ]
}

fn counts() -> CatalogCounts {
    CatalogCounts {
        objects: 2,
        outfits: 1,
        effects: 0,
        missiles: 3,
    }
}

fn report(written: bool) -> RunReport {
    RunReport {
        input_len: 120,
        output_len: 122,
        counts: counts(),
        audit: records(),
        merge: MergeReport {
            applied: vec![AppliedEdit {
                id: 3031,
                fields: vec!["bank", "unmove"],
            }],
            unmatched_ids: vec![55555],
        },
        written,
    }
}

#[test]
fn audit_line_matches_classic_format() {
    let records = records();
    assert_eq!(render_audit_line(&records[0]), "[Appearances] num: 20, typ: 0, n: 3");
    assert_eq!(render_audit_line(&records[1]), "[Flags] num: 99, typ: 5, n: 6");
}

#[test]
fn report_json_uses_canonical_top_level_order() {
    let value = render_report_json(&report(true), JsonStyle::CanonicalV1);
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "input_bytes",
            "output_bytes",
            "written",
            "counts",
            "unknown_fields",
            "unknown_summary",
            "edits",
        ]
    );
}

#[test]
fn report_json_carries_audit_and_edits() {
    let value = render_report_json(&report(false), JsonStyle::CanonicalV1);
    assert_eq!(value["written"], json!(false));
    assert_eq!(
        value["counts"],
        json!({ "objects": 2, "outfits": 1, "effects": 0, "missiles": 3 })
    );
    assert_eq!(
        value["unknown_fields"][0],
        json!({ "label": "Appearances", "field_number": 20, "wire_type": 0, "byte_length": 3 })
    );
    assert_eq!(value["unknown_fields"][1]["kind"], json!("Object"));
    assert_eq!(value["unknown_fields"][1]["appearance_id"], json!(3031));
    assert_eq!(
        value["unknown_summary"],
        json!([
            { "label": "Appearances", "fields": 1, "bytes": 3 },
            { "label": "Flags", "fields": 2, "bytes": 12 },
        ])
    );
    assert_eq!(
        value["edits"],
        json!({
            "applied": [{ "id": 3031, "fields": ["bank", "unmove"] }],
            "unmatched_ids": [55555],
        })
    );
}

#[test]
fn report_text_summarizes_by_default() {
    let text = render_report_text(&report(true), TextRenderOptions::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Catalog: 2 objects, 1 outfits, 0 effects, 3 missiles");
    assert_eq!(lines[1], "Unknown fields: 3 (15 bytes)");
    assert!(lines[2].starts_with("  Appearances "));
    assert!(lines[2].ends_with("1 field(s), 3 bytes"));
    assert!(lines[3].ends_with("2 field(s), 12 bytes"));
    assert_eq!(lines[4], "Edits applied: 1");
    assert_eq!(lines[5], "  3031: bank, unmove");
    assert_eq!(lines[6], "Unmatched edit ids: 55555");
    assert_eq!(lines[7], "Output: 120 -> 122 bytes, written");
    assert!(!text.contains("num:"));
}

#[test]
fn verbose_text_lists_every_record() {
    let text = render_report_text(&report(false), TextRenderOptions { verbose: true });
    assert!(text.contains("  [Appearances] num: 20, typ: 0, n: 3\n"));
    assert!(text.contains("  [Flags] num: 99, typ: 5, n: 6 (Object 3031)\n"));
    assert!(text.contains("  [Flags] num: 99, typ: 5, n: 6 (Object 3035)\n"));
    assert!(text.ends_with("not written (dry run)\n"));
}

#[test]
fn audit_only_output_has_no_edit_section() {
    let report = AuditReport {
        input_len: 64,
        counts: counts(),
        audit: records(),
    };
    let text = render_audit_text(&report, TextRenderOptions::default());
    assert!(!text.contains("Edits applied"));
    assert_eq!(text.lines().count(), 4);

    let value = render_audit_json(&report, JsonStyle::CanonicalV1);
    assert_eq!(value["input_bytes"], json!(64));
    assert_eq!(value["unknown_fields"].as_array().map(Vec::len), Some(3));
    assert!(value.get("edits").is_none());
}
