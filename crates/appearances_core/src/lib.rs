//! Appearances catalog patching: decode the protobuf catalog, report bytes
//! the schema does not model, merge id-keyed flag edits and re-encode with
//! every unrecognised field intact.

pub mod audit;
pub mod config;
pub mod edit;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod schema;
pub mod wire;

pub use audit::{AuditRecord, LabelSummary, audit, summarize};
pub use config::EditConfig;
pub use edit::{AppliedEdit, EditSet, MergeReport, RawEdit, apply_edits};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, Error, ErrorCode};
pub use message::{Message, UnknownField, UnknownFields};
pub use pipeline::{
    AuditReport, Patched, RunOptions, RunReport, audit_file, patch_bytes, run, write_atomic,
};
pub use schema::{Appearance, AppearanceFlags, AppearanceKind, Catalog, CatalogCounts};
