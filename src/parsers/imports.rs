//! Import-site extraction.
//!
//! Every source file is parsed with the TSX grammar and matched against a
//! fixed query of two tagged statement shapes: `import ... from "x"` and
//! `export ... from "x"`. Matches are classified, filtered and resolved
//! against the [`FileIndex`](crate::core::FileIndex) through an
//! [`ImportResolver`].

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tree_sitter::{Node as TSNode, Query, QueryCursor, Tree};

use super::common::{extract_text, find_ancestor_by_kind, tsx_language, TreeSitterParser};
use crate::core::{
    AnalyzeError, DependencyMap, Diagnostic, DiagnosticKind, FileError, FileInfo, ImportResolver,
    Specifier,
};

pub const IMPORT_QUERY: &str = r#"
(import_statement
  source: (string) @import.source)

(export_statement
  source: (string) @export.source)
"#;

/// Which statement shape produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Import,
    ReExport,
}

/// A raw import site, before classification and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    pub kind: ReferenceKind,
    pub specifier: String,
    /// Only ever set for `ReferenceKind::Import`.
    pub type_only: bool,
    pub line: usize,
}

/// Resolved dependencies of one successfully parsed file.
#[derive(Debug, Clone, Default)]
pub struct FileDependencies {
    pub targets: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reduced result of extracting every file in a scan.
#[derive(Debug, Default)]
pub struct Extraction {
    pub dependencies: DependencyMap,
    pub diagnostics: Vec<Diagnostic>,
    pub files_parsed: usize,
    pub files_errored: usize,
}

pub struct ImportExtractor {
    query: Query,
    import_capture: u32,
    export_capture: u32,
}

impl ImportExtractor {
    pub fn new() -> Result<Self, AnalyzeError> {
        let query = Query::new(tsx_language(), IMPORT_QUERY)
            .map_err(|err| AnalyzeError::Query(format!("{:?}", err)))?;
        let import_capture = capture_index(&query, "import.source")?;
        let export_capture = capture_index(&query, "export.source")?;

        // Fail fast on a grammar/runtime version mismatch instead of per file.
        TreeSitterParser::new()?;

        Ok(Self {
            query,
            import_capture,
            export_capture,
        })
    }

    /// All import/re-export sites in a parsed tree, in document order.
    pub fn references(
        &self,
        cursor: &mut QueryCursor,
        tree: &Tree,
        source: &str,
    ) -> Vec<ImportReference> {
        let bytes = source.as_bytes();
        let mut references = Vec::new();

        for (query_match, capture_ix) in cursor.captures(&self.query, tree.root_node(), bytes) {
            let capture = query_match.captures[capture_ix];
            let kind = if capture.index == self.import_capture {
                ReferenceKind::Import
            } else if capture.index == self.export_capture {
                ReferenceKind::ReExport
            } else {
                continue;
            };

            let node = capture.node;
            let specifier = extract_text(&node, bytes)
                .trim_matches(|c| c == '"' || c == '\'')
                .to_string();
            // Re-exports are never filtered for `type`.
            let type_only = kind == ReferenceKind::Import && is_type_only_import(&node, bytes);

            references.push(ImportReference {
                kind,
                specifier,
                type_only,
                line: node.start_position().row + 1,
            });
        }

        references
    }

    /// Parses one file and resolves its local dependencies.
    pub fn extract_file(
        &self,
        parser: &mut TreeSitterParser,
        cursor: &mut QueryCursor,
        file_path: &Path,
        resolver: ImportResolver<'_>,
    ) -> Result<FileDependencies, FileError> {
        let (source, tree) = parser.parse_file(file_path)?;
        let mut deps = FileDependencies::default();

        for reference in self.references(cursor, &tree, &source) {
            let Some(specifier) = Specifier::classify(&reference.specifier, resolver.aliases())
            else {
                continue;
            };
            if reference.type_only {
                debug!(
                    file = %file_path.display(),
                    specifier = %reference.specifier,
                    "Skipping type-only import"
                );
                continue;
            }

            match resolver.resolve(file_path, specifier) {
                Ok(target) => deps.targets.push(target),
                Err(diagnostic) => {
                    warn!(
                        file = %file_path.display(),
                        line = reference.line,
                        "{}",
                        diagnostic.detail
                    );
                    deps.diagnostics.push(diagnostic);
                }
            }
        }

        Ok(deps)
    }

    /// Extracts every file on the current rayon pool and reduces the results in input order.
    pub fn extract_all(&self, files: &[FileInfo], resolver: ImportResolver<'_>) -> Extraction {
        info!("Beginning dependency parsing...");

        let outcomes: Vec<(&Path, Result<FileDependencies, FileError>)> = files
            .par_iter()
            .map_init(
                || (TreeSitterParser::new().ok(), QueryCursor::new()),
                |(parser, cursor), file| {
                    let path = file.path.as_path();
                    let outcome = match parser {
                        Some(parser) => self.extract_file(parser, cursor, path, resolver),
                        None => Err(FileError::Parse),
                    };
                    (path, outcome)
                },
            )
            .collect();

        let mut extraction = Extraction::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(deps) => {
                    extraction.files_parsed += 1;
                    extraction.diagnostics.extend(deps.diagnostics);
                    extraction.dependencies.insert(path.to_path_buf(), deps.targets);
                }
                Err(err) => {
                    warn!(file = %path.display(), "{}", err);
                    extraction.files_errored += 1;
                    extraction.diagnostics.push(file_diagnostic(path, &err));
                }
            }
        }

        extraction
    }
}

fn capture_index(query: &Query, name: &str) -> Result<u32, AnalyzeError> {
    query
        .capture_index_for_name(name)
        .ok_or_else(|| AnalyzeError::Query(format!("missing capture @{}", name)))
}

fn file_diagnostic(path: &Path, err: &FileError) -> Diagnostic {
    let kind = match err {
        FileError::Read(_) => DiagnosticKind::ReadError,
        FileError::Syntax | FileError::Parse => DiagnosticKind::SyntaxError,
    };
    Diagnostic::new(kind, path, err.to_string())
}

/// True when the string node belongs to an `import type ... from` statement.
fn is_type_only_import(source_node: &TSNode, source: &[u8]) -> bool {
    let Some(statement) = find_ancestor_by_kind(source_node, "import_statement") else {
        return false;
    };

    let mut cursor = statement.walk();
    for child in statement.children(&mut cursor) {
        match child.kind() {
            "type" if !child.is_named() => return true,
            "import_clause" => {
                return extract_text(&child, source)
                    .trim_start()
                    .starts_with("type ");
            }
            _ => {}
        }
    }
    false
}
