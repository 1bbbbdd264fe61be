//! Batch driver: walk a statement directory, pick a strategy per file and
//! gather every record in file-name order.
//!
//! A failing document is logged and contributes nothing; it never stops
//! the rest of the batch.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::{Detection, Institution, Transaction, detect};

use crate::document::DocumentReader;
use crate::profiles::strategy_for;

/// What happened to one document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    /// No detection rule matched the file name
    Unknown,
    /// Recognized issuer without an extractor
    Unsupported(Institution),
    Succeeded { records: usize, rejected: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub file_name: String,
    pub detection: Detection,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
    /// All records, in arrival order
    pub records: Vec<Transaction>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| {
            matches!(
                d.status,
                DocumentStatus::Unknown | DocumentStatus::Unsupported(_)
            )
        })
    }
}

/// Progress hooks for callers that want to report as the batch runs
pub trait BatchObserver {
    fn on_document(&mut self, _file_name: &str, _detection: Detection) {}
    fn on_record(&mut self, _txn: &Transaction) {}
}

impl BatchObserver for () {}

/// `.pdf` files directly inside `dir`, sorted by file name
pub fn list_statements(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading {}", dir.display()))?
            .path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            out.push(path);
        }
    }

    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

pub struct Batch<'a> {
    reader: &'a dyn DocumentReader,
    overrides: BTreeMap<String, Institution>,
    skip: BTreeSet<String>,
}

impl<'a> Batch<'a> {
    pub fn new(reader: &'a dyn DocumentReader) -> Self {
        Self {
            reader,
            overrides: BTreeMap::new(),
            skip: BTreeSet::new(),
        }
    }

    /// Force an institution for specific file names, bypassing detection
    pub fn with_overrides(mut self, overrides: BTreeMap<String, Institution>) -> Self {
        self.overrides = overrides;
        self
    }

    /// File names to leave out of the batch entirely
    pub fn with_skip(mut self, skip: BTreeSet<String>) -> Self {
        self.skip = skip;
        self
    }

    pub fn resolve(&self, file_name: &str) -> Detection {
        match self.overrides.get(file_name) {
            Some(inst) => Detection::Known(*inst),
            None => detect(file_name),
        }
    }

    pub fn run(&self, dir: &Path) -> Result<BatchReport> {
        self.run_with(dir, &mut ())
    }

    pub fn run_with(&self, dir: &Path, observer: &mut dyn BatchObserver) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for path in list_statements(dir)? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.skip.contains(&file_name) {
                tracing::info!(file = %file_name, "skipped by config");
                continue;
            }

            let detection = self.resolve(&file_name);
            observer.on_document(&file_name, detection);

            let status = self.process(&path, &file_name, detection, &mut report.records, observer);
            report.documents.push(DocumentReport {
                file_name,
                detection,
                status,
            });
        }

        tracing::info!(
            documents = report.documents.len(),
            records = report.total(),
            "batch finished"
        );
        Ok(report)
    }

    fn process(
        &self,
        path: &Path,
        file_name: &str,
        detection: Detection,
        records: &mut Vec<Transaction>,
        observer: &mut dyn BatchObserver,
    ) -> DocumentStatus {
        let Detection::Known(institution) = detection else {
            tracing::warn!(file = %file_name, "unsupported statement: unknown institution");
            return DocumentStatus::Unknown;
        };
        let Some(strategy) = strategy_for(institution) else {
            tracing::warn!(file = %file_name, %institution, "unsupported statement: no extractor");
            return DocumentStatus::Unsupported(institution);
        };

        match strategy.run(self.reader, path) {
            Ok(extraction) => {
                tracing::debug!(
                    file = %file_name,
                    rejected = ?extraction.rejection_counts(),
                    "extraction done"
                );
                let count = extraction.records.len();
                for txn in extraction.records {
                    observer.on_record(&txn);
                    records.push(txn);
                }
                DocumentStatus::Succeeded {
                    records: count,
                    rejected: extraction.rejected.len(),
                }
            }
            Err(e) => {
                tracing::error!(file = %file_name, %institution, error = %format!("{e:#}"), "extraction failed");
                DocumentStatus::Failed {
                    error: format!("{e:#}"),
                }
            }
        }
    }
}
