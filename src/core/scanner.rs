use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use super::report::{Diagnostic, DiagnosticKind};

/// Directory names never descended into.
pub const EXCLUDED_DIRS: [&str; 8] = [
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    "test",
    "tests",
    "__tests__",
];

/// Supported source extensions, declared from highest to lowest resolution priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceExtension {
    Tsx,
    Ts,
    Jsx,
    Js,
}

impl SourceExtension {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "tsx" => Some(SourceExtension::Tsx),
            "ts" => Some(SourceExtension::Ts),
            "jsx" => Some(SourceExtension::Jsx),
            "js" => Some(SourceExtension::Js),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceExtension::Tsx => "tsx",
            SourceExtension::Ts => "ts",
            SourceExtension::Jsx => "jsx",
            SourceExtension::Js => "js",
        }
    }

    /// True when `self` shadows `other` at the same stem.
    pub fn outranks(self, other: SourceExtension) -> bool {
        self < other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub extension: SourceExtension,
}

/// Extension-stripped path -> the single file that owns that stem.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: HashMap<PathBuf, FileInfo>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `file` under its stem, honoring extension priority.
    ///
    /// Returns a conflict diagnostic when the stem was already occupied.
    pub fn insert(&mut self, file: FileInfo) -> Option<Diagnostic> {
        let stem = stem_of(&file.path);
        match self.entries.get(&stem) {
            None => {
                self.entries.insert(stem, file);
                None
            }
            Some(existing) if file.extension.outranks(existing.extension) => {
                let detail = format!(
                    "Prioritizing .{} over .{}",
                    file.extension.as_str(),
                    existing.extension.as_str()
                );
                let diagnostic = Diagnostic::new(DiagnosticKind::ExtensionConflict, &stem, detail);
                self.entries.insert(stem, file);
                Some(diagnostic)
            }
            Some(existing) => {
                let detail = format!(
                    "Skipping {} (.{} already indexed)",
                    file.path.display(),
                    existing.extension.as_str()
                );
                Some(Diagnostic::new(DiagnosticKind::ExtensionConflict, &stem, detail))
            }
        }
    }

    pub fn get(&self, stem: &Path) -> Option<&Path> {
        self.entries.get(stem).map(|info| info.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The path with its final extension removed.
pub fn stem_of(path: &Path) -> PathBuf {
    path.with_extension("")
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<FileInfo>,
    pub index: FileIndex,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Walks `root_path`, pruning excluded directories, and indexes every source file.
    pub fn scan_directory(&self, root_path: &Path) -> ScanResult {
        info!("Starting file scan in directory: {}", root_path.display());

        let mut result = ScanResult::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root_path).to_path_buf();
                    warn!(path = %path.display(), "Skipping unreadable entry: {}", err);
                    result.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::WalkError,
                        &path,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(extension) = SourceExtension::from_path(path) else {
                continue;
            };

            let info = FileInfo {
                path: path.to_path_buf(),
                extension,
            };
            if let Some(conflict) = result.index.insert(info.clone()) {
                warn!(stem = %conflict.file.display(), "Extension conflict: {}", conflict.detail);
                result.diagnostics.push(conflict);
            }
            result.files.push(info);
        }

        info!(
            "File scan complete. Found {} files to parse ({} module stems).",
            result.files.len(),
            result.index.len()
        );
        result
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}
