pub mod analyzer;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod resolver;
pub mod scanner;

pub use analyzer::{Analysis, CodebaseAnalyzer};
pub use config::{discover_aliases, Alias, AliasTable};
pub use error::{AnalyzeError, FileError};
pub use graph::{build_graph, DependencyGraph, DependencyMap, GraphBuilder, GraphDocument};
pub use report::{Diagnostic, DiagnosticKind, RunReport};
pub use resolver::{ImportResolver, Specifier};
pub use scanner::{FileIndex, FileInfo, FileScanner, ScanResult, SourceExtension};
