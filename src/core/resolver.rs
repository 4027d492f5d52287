use path_clean::PathClean;
use std::path::{Path, PathBuf};

use super::config::AliasTable;
use super::report::{Diagnostic, DiagnosticKind};
use super::scanner::FileIndex;

/// How an import specifier is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    /// `./x` or `../x`, relative to the importing file.
    Relative(&'a str),
    /// Starts with a configured alias prefix.
    Aliased(&'a str),
}

impl<'a> Specifier<'a> {
    /// Classifies `raw`, or `None` for bare package imports that are not tracked.
    pub fn classify(raw: &'a str, aliases: &AliasTable) -> Option<Self> {
        if raw.starts_with("./") || raw.starts_with("../") {
            Some(Specifier::Relative(raw))
        } else if aliases.find_prefix(raw).is_some() {
            Some(Specifier::Aliased(raw))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'a str {
        match *self {
            Specifier::Relative(s) | Specifier::Aliased(s) => s,
        }
    }
}

/// Maps import specifiers to indexed files.
///
/// Holds only shared references so a single resolver can be used from every worker.
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
    index: &'a FileIndex,
    aliases: &'a AliasTable,
}

impl<'a> ImportResolver<'a> {
    pub fn new(index: &'a FileIndex, aliases: &'a AliasTable) -> Self {
        Self { index, aliases }
    }

    pub fn aliases(&self) -> &'a AliasTable {
        self.aliases
    }

    /// Extension-less absolute path the specifier points at.
    pub fn stem_for(&self, importer: &Path, specifier: Specifier<'_>) -> Option<PathBuf> {
        match specifier {
            Specifier::Relative(raw) => {
                let dir = importer.parent().unwrap_or_else(|| Path::new(""));
                Some(dir.join(raw).clean())
            }
            Specifier::Aliased(raw) => {
                // First declared prefix wins, even when a longer one also matches.
                let alias = self.aliases.find_prefix(raw)?;
                let remainder = raw[alias.prefix.len()..].trim_start_matches('/');
                if remainder.is_empty() {
                    Some(alias.base.clone())
                } else {
                    Some(alias.base.join(remainder).clean())
                }
            }
        }
    }

    /// Resolves a specifier to the real file owning its stem.
    pub fn resolve(&self, importer: &Path, specifier: Specifier<'_>) -> Result<PathBuf, Diagnostic> {
        let raw = specifier.as_str();
        let Some(stem) = self.stem_for(importer, specifier) else {
            return Err(Diagnostic::new(
                DiagnosticKind::UnresolvedAlias,
                importer,
                format!("Could not resolve alias import '{}'", raw),
            ));
        };

        match self.index.get(&stem) {
            Some(target) => Ok(target.to_path_buf()),
            None => Err(Diagnostic::new(
                DiagnosticKind::UnresolvedImport,
                importer,
                format!(
                    "Unresolved import '{}' (resolved to {}, but file not found)",
                    raw,
                    stem.display()
                ),
            )),
        }
    }
}
