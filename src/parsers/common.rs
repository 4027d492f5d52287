use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::core::{AnalyzeError, FileError};

/// TSX is a superset of TypeScript and JSX, so one grammar covers every supported extension.
pub fn tsx_language() -> Language {
    tree_sitter_typescript::language_tsx()
}

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Result<Self, AnalyzeError> {
        let mut parser = Parser::new();
        parser
            .set_language(tsx_language())
            .map_err(|err| AnalyzeError::Query(err.to_string()))?;
        Ok(Self { parser })
    }

    /// Parses `source`, rejecting trees that contain any error node.
    pub fn parse_source(&mut self, source: &str) -> Result<Tree, FileError> {
        let tree = self.parser.parse(source, None).ok_or(FileError::Parse)?;
        if tree.root_node().has_error() {
            return Err(FileError::Syntax);
        }
        Ok(tree)
    }

    pub fn parse_file(&mut self, file_path: &Path) -> Result<(String, Tree), FileError> {
        let source = read_source(file_path)?;
        let tree = self.parse_source(&source)?;
        Ok((source, tree))
    }
}

/// Buffered read of a UTF-8 source file; invalid UTF-8 surfaces as a read error.
pub fn read_source(file_path: &Path) -> Result<String, FileError> {
    let file = File::open(file_path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;
    Ok(content)
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// Nearest ancestor (excluding `node`) of the given kind.
pub fn find_ancestor_by_kind<'a>(node: &TSNode<'a>, kind: &str) -> Option<TSNode<'a>> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if candidate.kind() == kind {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}
