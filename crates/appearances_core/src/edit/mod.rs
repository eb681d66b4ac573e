//! Id-keyed flag overrides and their application onto a decoded catalog.

pub mod fields;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::Error;
use crate::schema::{AppearanceFlags, Catalog};

pub use fields::{FLAG_FIELDS, FlagField, find_flag_field, set_fields};

/// One edit as handed over by the configuration layer: an `id` entry plus
/// flag field names mapped to new values.
pub type RawEdit = JsonMap<String, JsonValue>;

pub const EDIT_ID_KEY: &str = "id";

/// Typed partial flags per target id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSet {
    edits: BTreeMap<u32, AppearanceFlags>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert raw records, stopping at the first bad one. A later record for
    /// the same id replaces the earlier one.
    pub fn from_records(records: &[RawEdit]) -> Result<Self, Error> {
        let mut set = Self::new();
        for (index, record) in records.iter().enumerate() {
            let id = parse_edit_id(index, record.get(EDIT_ID_KEY))?;
            let flags = flags_from_record(id, record)?;
            if set.edits.insert(id, flags).is_some() {
                tracing::warn!(id, "duplicate edit id, keeping the later record");
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, id: u32, flags: AppearanceFlags) {
        self.edits.insert(id, flags);
    }

    pub fn get(&self, id: u32) -> Option<&AppearanceFlags> {
        self.edits.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.edits.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

fn parse_edit_id(index: usize, value: Option<&JsonValue>) -> Result<u32, Error> {
    let malformed = |reason: String| Error::MalformedEdit { index, reason };
    match value {
        None => Err(malformed("missing 'id'".to_string())),
        Some(JsonValue::String(text)) => {
            // Bare decimal digits only; `u32::from_str` would also take a sign.
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed(format!("id '{text}' is not an unsigned integer")));
            }
            text.parse::<u32>()
                .map_err(|e| malformed(format!("id '{text}' is not an unsigned integer: {e}")))
        }
        Some(JsonValue::Number(number)) => number
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| malformed(format!("id {number} is not an unsigned 32-bit integer"))),
        Some(other) => Err(malformed(format!(
            "id must be a string or integer, got {other}"
        ))),
    }
}

fn flags_from_record(id: u32, record: &RawEdit) -> Result<AppearanceFlags, Error> {
    let mut flags = AppearanceFlags::default();
    for (name, value) in record {
        if name == EDIT_ID_KEY {
            continue;
        }
        let Some(field) = find_flag_field(name) else {
            return Err(Error::InvalidEditField {
                id,
                field: name.clone(),
                reason: "not a known flag field".to_string(),
            });
        };
        field
            .parse(&mut flags, value.clone())
            .map_err(|e| Error::InvalidEditField {
                id,
                field: name.clone(),
                reason: e.to_string(),
            })?;
    }
    Ok(flags)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub id: u32,
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// One entry per edited object appearance, in catalog order.
    pub applied: Vec<AppliedEdit>,
    /// Edit ids that matched no object appearance.
    pub unmatched_ids: Vec<u32>,
}

/// Overwrite the explicitly set fields of each edit onto the flags of every
/// Object appearance carrying that id. Outfits, effects, missiles and
/// appearances without an id are never touched. Fields are replaced whole;
/// the live flags' unknown bytes are left alone. An edit that sets no field
/// leaves its appearance byte-identical and is not listed as applied.
pub fn apply_edits(catalog: &mut Catalog, edits: &EditSet) -> MergeReport {
    let mut report = MergeReport::default();
    let mut matched = BTreeSet::new();

    for appearance in &mut catalog.object {
        let Some(id) = appearance.id else {
            continue;
        };
        let Some(edit) = edits.get(id) else {
            continue;
        };
        matched.insert(id);

        let set: Vec<_> = set_fields(edit).collect();
        if set.is_empty() {
            tracing::debug!(id, "edit sets no fields");
            continue;
        }
        let live = appearance.flags.get_or_insert_with(AppearanceFlags::default);
        let mut fields = Vec::with_capacity(set.len());
        for field in set {
            field.copy(edit, live);
            fields.push(field.name());
        }
        tracing::debug!(id, fields = ?fields, "applied edit");
        report.applied.push(AppliedEdit { id, fields });
    }

    report.unmatched_ids = edits.ids().filter(|id| !matched.contains(id)).collect();
    for id in &report.unmatched_ids {
        tracing::debug!(id, "edit matched no object appearance");
    }
    report
}
