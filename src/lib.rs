//! # NEXUS
//!
//! Static dependency graph generator for JavaScript and TypeScript codebases.
//!
//! Given a project root, nexus finds every `.js`, `.jsx`, `.ts` and `.tsx`
//! file, extracts its `import ... from` and `export ... from` statements with
//! tree-sitter, resolves relative and `tsconfig.json`/`jsconfig.json` aliased
//! specifiers to files on disk, and writes a file-level graph:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "src/a.ts" }, { "id": "src/b.ts" }],
//!   "edges": [{ "source": "src/a.ts", "target": "src/b.ts" }]
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`core::config`] builds the alias table.
//! 2. [`core::scanner`] walks the tree and indexes files by extension-less stem.
//! 3. [`parsers::imports`] extracts and resolves import sites per file.
//! 4. [`core::graph`] assembles the deduplicated, sorted graph.
//!
//! Type-only imports (`import type { X } from "./x"`) and bare package imports
//! are not part of the graph.

pub mod core;
pub mod formatters;
pub mod parsers;
