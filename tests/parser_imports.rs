use nexus::core::{AliasTable, FileError, FileIndex, FileInfo, ImportResolver, SourceExtension};
use nexus::parsers::{ImportExtractor, ImportReference, ReferenceKind, TreeSitterParser};
use std::fs;
use tree_sitter::QueryCursor;

fn references(code: &str) -> Vec<ImportReference> {
    let extractor = ImportExtractor::new().unwrap();
    let mut parser = TreeSitterParser::new().unwrap();
    let tree = parser.parse_source(code).unwrap();
    let mut cursor = QueryCursor::new();
    extractor.references(&mut cursor, &tree, code)
}

#[test]
fn query_matches_imports_and_re_exports_in_order() {
    let code = r#"
import React from "react";
import { a } from './a';
import * as b from "../b";
import './side-effect';
export { c } from "./c";
export * from './d';
export const local = 1;
const lazy = import("./lazy");
"#;

    let refs = references(code);
    let found: Vec<(ReferenceKind, &str)> = refs
        .iter()
        .map(|r| (r.kind, r.specifier.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![
            (ReferenceKind::Import, "react"),
            (ReferenceKind::Import, "./a"),
            (ReferenceKind::Import, "../b"),
            (ReferenceKind::Import, "./side-effect"),
            (ReferenceKind::ReExport, "./c"),
            (ReferenceKind::ReExport, "./d"),
        ]
    );
    assert_eq!(refs[1].line, 3);
}

#[test]
fn type_only_flag_applies_to_imports_only() {
    let code = r#"
import type { A } from "./a";
import { B, C } from "./b";
import type D from "./d";
export type { E } from "./e";
"#;

    let refs = references(code);
    let flags: Vec<(&str, bool)> = refs
        .iter()
        .map(|r| (r.specifier.as_str(), r.type_only))
        .collect();

    assert_eq!(
        flags,
        vec![("./a", true), ("./b", false), ("./d", true), ("./e", false)]
    );
}

#[test]
fn jsx_and_typescript_syntax_parse_with_one_grammar() {
    let code = r#"
import { Button } from "./Button";
interface Props { label: string }
export const View = ({ label }: Props) => <Button>{label}</Button>;
"#;

    let refs = references(code);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].specifier, "./Button");
}

#[test]
fn syntax_errors_reject_the_whole_file() {
    let mut parser = TreeSitterParser::new().unwrap();
    let result = parser.parse_source("import { a from './a';\nconst = ;");
    assert!(matches!(result, Err(FileError::Syntax)));
}

#[test]
fn unreadable_file_is_a_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("binary.ts");
    fs::write(&file, [0xffu8, 0xfe, 0x00, 0x41]).unwrap();

    let mut parser = TreeSitterParser::new().unwrap();
    assert!(matches!(parser.parse_file(&file), Err(FileError::Read(_))));
    assert!(matches!(
        parser.parse_file(&dir.path().join("absent.ts")),
        Err(FileError::Read(_))
    ));
}

#[test]
fn extract_file_resolves_local_dependencies_only() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    let main = root.join("main.ts");
    fs::write(
        &main,
        r#"
import fs from "fs";
import type { T } from "./types";
import { b } from "./b";
import { b as again } from "./b";
import { gone } from "./missing";
export * from "./types";
"#,
    )
    .unwrap();

    let mut index = FileIndex::new();
    for name in ["main.ts", "b.ts", "types.ts"] {
        index.insert(FileInfo {
            path: root.join(name),
            extension: SourceExtension::Ts,
        });
    }
    let aliases = AliasTable::new();
    let resolver = ImportResolver::new(&index, &aliases);

    let extractor = ImportExtractor::new().unwrap();
    let mut parser = TreeSitterParser::new().unwrap();
    let mut cursor = QueryCursor::new();
    let deps = extractor
        .extract_file(&mut parser, &mut cursor, &main, resolver)
        .unwrap();

    assert_eq!(
        deps.targets,
        vec![root.join("b.ts"), root.join("b.ts"), root.join("types.ts")]
    );
    assert_eq!(deps.diagnostics.len(), 1);
    assert!(deps.diagnostics[0].detail.contains("./missing"));
}

#[test]
fn extract_all_skips_broken_files_and_keeps_empty_ones() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.ts"), "import { x } from './b';\n").unwrap();
    fs::write(root.join("b.ts"), "export const x = 1;\n").unwrap();
    fs::write(root.join("broken.ts"), "import { from './b'\nlet = ;\n").unwrap();

    let files: Vec<FileInfo> = ["a.ts", "b.ts", "broken.ts"]
        .iter()
        .map(|name| FileInfo {
            path: root.join(name),
            extension: SourceExtension::Ts,
        })
        .collect();
    let mut index = FileIndex::new();
    for file in &files {
        index.insert(file.clone());
    }
    let aliases = AliasTable::new();

    let extraction = ImportExtractor::new()
        .unwrap()
        .extract_all(&files, ImportResolver::new(&index, &aliases));

    assert_eq!(extraction.files_parsed, 2);
    assert_eq!(extraction.files_errored, 1);
    assert_eq!(
        extraction.dependencies.get(&root.join("a.ts")),
        Some(&vec![root.join("b.ts")])
    );
    assert_eq!(
        extraction.dependencies.get(&root.join("b.ts")),
        Some(&Vec::new())
    );
    assert!(!extraction.dependencies.contains_key(&root.join("broken.ts")));
}
