//! decode → audit → edit → encode → write, in one synchronous pass.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::audit::{AuditRecord, audit, log_audit};
use crate::edit::{EditSet, MergeReport, RawEdit, apply_edits};
use crate::error::Error;
use crate::schema::{Catalog, CatalogCounts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run every stage but leave the output path untouched.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct Patched {
    pub bytes: Vec<u8>,
    pub counts: CatalogCounts,
    pub audit: Vec<AuditRecord>,
    pub merge: MergeReport,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub input_len: usize,
    pub output_len: usize,
    pub counts: CatalogCounts,
    pub audit: Vec<AuditRecord>,
    pub merge: MergeReport,
    pub written: bool,
}

/// Decode-and-audit pass over `input` with no edits and no output.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub input_len: usize,
    pub counts: CatalogCounts,
    pub audit: Vec<AuditRecord>,
}

pub fn audit_file(input: &Path) -> Result<AuditReport, Error> {
    let bytes = fs::read(input).map_err(|e| Error::io("read", input, e))?;
    let catalog = Catalog::decode(&bytes)?;
    let records = audit(&catalog);
    log_audit(&records);
    Ok(AuditReport {
        input_len: bytes.len(),
        counts: catalog.counts(),
        audit: records,
    })
}

/// In-memory part of the pipeline. Any failure leaves nothing behind.
pub fn patch_bytes(bytes: &[u8], edits: &[RawEdit]) -> Result<Patched, Error> {
    let mut catalog = Catalog::decode(bytes)?;
    let counts = catalog.counts();
    tracing::info!(
        objects = counts.objects,
        outfits = counts.outfits,
        effects = counts.effects,
        missiles = counts.missiles,
        "decoded catalog"
    );

    let records = audit(&catalog);
    log_audit(&records);

    let edit_set = EditSet::from_records(edits)?;
    let merge = apply_edits(&mut catalog, &edit_set);
    tracing::info!(
        edits = edit_set.len(),
        applied = merge.applied.len(),
        unmatched = merge.unmatched_ids.len(),
        "merged edits"
    );

    let bytes = catalog.encode()?;
    Ok(Patched {
        bytes,
        counts,
        audit: records,
        merge,
    })
}

pub fn run(
    input: &Path,
    output: &Path,
    edits: &[RawEdit],
    options: RunOptions,
) -> Result<RunReport, Error> {
    let bytes = fs::read(input).map_err(|e| Error::io("read", input, e))?;
    let patched = patch_bytes(&bytes, edits)?;

    if options.dry_run {
        tracing::info!(path = %output.display(), "dry run, output not written");
    } else {
        write_atomic(output, &patched.bytes)?;
        tracing::info!(path = %output.display(), bytes = patched.bytes.len(), "wrote catalog");
    }

    Ok(RunReport {
        input_len: bytes.len(),
        output_len: patched.bytes.len(),
        counts: patched.counts,
        audit: patched.audit,
        merge: patched.merge,
        written: !options.dry_run,
    })
}

/// Write through a sibling temp file and rename it over `path`, so readers
/// never observe a partial catalog.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io("create temp file in", dir, e))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| Error::io("write", file.path(), e))?;
    file.persist(path)
        .map_err(|e| Error::io("replace", path, e.error))?;
    Ok(())
}
