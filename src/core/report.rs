use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Two files share a stem; the lower-priority extension lost.
    ExtensionConflict,
    /// The walker could not enter or stat an entry.
    WalkError,
    /// The file could not be read or decoded.
    ReadError,
    /// The syntax tree contains an error node.
    SyntaxError,
    /// Import looked aliased but no alias prefix matched.
    UnresolvedAlias,
    /// Resolved stem is not present in the file index.
    UnresolvedImport,
    /// A node could not be expressed relative to the project root.
    NotRelative,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::ExtensionConflict => "extension-conflict",
            DiagnosticKind::WalkError => "walk-error",
            DiagnosticKind::ReadError => "read-error",
            DiagnosticKind::SyntaxError => "syntax-error",
            DiagnosticKind::UnresolvedAlias => "unresolved-alias",
            DiagnosticKind::UnresolvedImport => "unresolved-import",
            DiagnosticKind::NotRelative => "not-relative",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable problem encountered during a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, file: &Path, detail: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.to_path_buf(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.file.display(), self.detail)
    }
}

/// Counters and diagnostics accumulated over one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files_scanned: usize,
    pub files_parsed: usize,
    pub files_errored: usize,
    pub aliases: usize,
    pub nodes: usize,
    pub edges: usize,
    pub cycles: usize,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn unresolved(&self) -> usize {
        self.count(DiagnosticKind::UnresolvedImport) + self.count(DiagnosticKind::UnresolvedAlias)
    }

    pub fn log_summary(&self) {
        tracing::info!(
            scanned = self.files_scanned,
            parsed = self.files_parsed,
            errored = self.files_errored,
            unresolved = self.unresolved(),
            conflicts = self.count(DiagnosticKind::ExtensionConflict),
            "Parsing complete. Successfully parsed {} files. Encountered errors in {} files.",
            self.files_parsed,
            self.files_errored
        );
        tracing::info!(
            nodes = self.nodes,
            edges = self.edges,
            cycles = self.cycles,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Graph built: {} nodes, {} edges",
            self.nodes,
            self.edges
        );
    }
}
