use std::fmt::Write as _;

use appearances_core::audit::{AuditRecord, LabelSummary, summarize};
use appearances_core::edit::MergeReport;
use appearances_core::pipeline::{AuditReport, RunReport};
use appearances_core::schema::CatalogCounts;
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_COL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// List every unknown field instead of only the per-label totals.
    pub verbose: bool,
}

/// One audit record in the classic one-line form.
pub fn render_audit_line(record: &AuditRecord) -> String {
    format!(
        "[{}] num: {}, typ: {}, n: {}",
        record.label,
        record.field_number,
        record.wire_type.raw(),
        record.byte_length
    )
}

pub fn render_report_json(report: &RunReport, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(report_json(report)),
    }
}

pub fn render_audit_json(report: &AuditReport, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut m = JsonMap::new();
            m.insert("input_bytes".to_string(), JsonValue::from(report.input_len));
            m.insert("counts".to_string(), counts_to_json(&report.counts));
            m.insert("unknown_fields".to_string(), audit_to_json(&report.audit));
            m.insert(
                "unknown_summary".to_string(),
                summary_to_json(&summarize(&report.audit)),
            );
            JsonValue::Object(m)
        }
    }
}

pub fn render_report_text(report: &RunReport, options: TextRenderOptions) -> String {
    let mut out = String::new();
    write_counts(&mut out, &report.counts);
    write_audit_section(&mut out, &report.audit, options);
    write_merge_section(&mut out, &report.merge);

    let status = if report.written {
        "written"
    } else {
        "not written (dry run)"
    };
    writeln!(
        out,
        "Output: {} -> {} bytes, {}",
        report.input_len, report.output_len, status
    )
    .expect("writing to String cannot fail");
    out
}

pub fn render_audit_text(report: &AuditReport, options: TextRenderOptions) -> String {
    let mut out = String::new();
    write_counts(&mut out, &report.counts);
    write_audit_section(&mut out, &report.audit, options);
    out
}

fn report_json(report: &RunReport) -> JsonMap<String, JsonValue> {
    let mut m = JsonMap::new();
    m.insert("input_bytes".to_string(), JsonValue::from(report.input_len));
    m.insert("output_bytes".to_string(), JsonValue::from(report.output_len));
    m.insert("written".to_string(), JsonValue::Bool(report.written));
    m.insert("counts".to_string(), counts_to_json(&report.counts));
    m.insert("unknown_fields".to_string(), audit_to_json(&report.audit));
    m.insert(
        "unknown_summary".to_string(),
        summary_to_json(&summarize(&report.audit)),
    );
    m.insert("edits".to_string(), merge_to_json(&report.merge));
    m
}

fn counts_to_json(counts: &CatalogCounts) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("objects".to_string(), JsonValue::from(counts.objects));
    m.insert("outfits".to_string(), JsonValue::from(counts.outfits));
    m.insert("effects".to_string(), JsonValue::from(counts.effects));
    m.insert("missiles".to_string(), JsonValue::from(counts.missiles));
    JsonValue::Object(m)
}

pub fn audit_to_json(records: &[AuditRecord]) -> JsonValue {
    JsonValue::Array(
        records
            .iter()
            .map(|r| {
                let mut m = JsonMap::new();
                m.insert("label".to_string(), JsonValue::from(r.label));
                if let Some(kind) = r.kind {
                    m.insert("kind".to_string(), JsonValue::from(kind.as_str()));
                }
                if let Some(id) = r.appearance_id {
                    m.insert("appearance_id".to_string(), JsonValue::from(id));
                }
                m.insert("field_number".to_string(), JsonValue::from(r.field_number));
                m.insert("wire_type".to_string(), JsonValue::from(r.wire_type.raw()));
                m.insert("byte_length".to_string(), JsonValue::from(r.byte_length));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn summary_to_json(summary: &[LabelSummary]) -> JsonValue {
    JsonValue::Array(
        summary
            .iter()
            .map(|s| {
                let mut m = JsonMap::new();
                m.insert("label".to_string(), JsonValue::from(s.label));
                m.insert("fields".to_string(), JsonValue::from(s.fields));
                m.insert("bytes".to_string(), JsonValue::from(s.bytes));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn merge_to_json(merge: &MergeReport) -> JsonValue {
    let applied = merge
        .applied
        .iter()
        .map(|a| {
            let mut m = JsonMap::new();
            m.insert("id".to_string(), JsonValue::from(a.id));
            m.insert(
                "fields".to_string(),
                JsonValue::Array(a.fields.iter().map(|f| JsonValue::from(*f)).collect()),
            );
            JsonValue::Object(m)
        })
        .collect();

    let mut m = JsonMap::new();
    m.insert("applied".to_string(), JsonValue::Array(applied));
    m.insert(
        "unmatched_ids".to_string(),
        JsonValue::Array(merge.unmatched_ids.iter().map(|id| JsonValue::from(*id)).collect()),
    );
    JsonValue::Object(m)
}

fn write_counts(out: &mut String, counts: &CatalogCounts) {
    writeln!(
        out,
        "Catalog: {} objects, {} outfits, {} effects, {} missiles",
        counts.objects, counts.outfits, counts.effects, counts.missiles
    )
    .expect("writing to String cannot fail");
}

fn write_audit_section(out: &mut String, records: &[AuditRecord], options: TextRenderOptions) {
    let total: usize = records.iter().map(|r| r.byte_length).sum();
    writeln!(
        out,
        "Unknown fields: {} ({} bytes)",
        records.len(),
        total
    )
    .expect("writing to String cannot fail");

    for s in summarize(records) {
        writeln!(
            out,
            "  {:<width$}{} field(s), {} bytes",
            s.label,
            s.fields,
            s.bytes,
            width = LABEL_COL_WIDTH
        )
        .expect("writing to String cannot fail");
    }

    if options.verbose {
        for record in records {
            let owner = match (record.kind, record.appearance_id) {
                (Some(kind), Some(id)) => format!(" ({kind} {id})"),
                (Some(kind), None) => format!(" ({kind})"),
                _ => String::new(),
            };
            writeln!(out, "  {}{}", render_audit_line(record), owner)
                .expect("writing to String cannot fail");
        }
    }
}

fn write_merge_section(out: &mut String, merge: &MergeReport) {
    writeln!(out, "Edits applied: {}", merge.applied.len())
        .expect("writing to String cannot fail");
    for applied in &merge.applied {
        writeln!(out, "  {}: {}", applied.id, applied.fields.join(", "))
            .expect("writing to String cannot fail");
    }
    if !merge.unmatched_ids.is_empty() {
        let ids: Vec<String> = merge.unmatched_ids.iter().map(u32::to_string).collect();
        writeln!(out, "Unmatched edit ids: {}", ids.join(", "))
            .expect("writing to String cannot fail");
    }
}
