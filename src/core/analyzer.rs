use path_clean::PathClean;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::{discover_aliases, AliasTable};
use super::error::AnalyzeError;
use super::graph::{build_graph, DependencyGraph};
use super::report::RunReport;
use super::resolver::ImportResolver;
use super::scanner::FileScanner;
use crate::parsers::ImportExtractor;

/// Outcome of one full analysis.
#[derive(Debug)]
pub struct Analysis {
    pub root: PathBuf,
    pub aliases: AliasTable,
    pub graph: DependencyGraph,
    pub report: RunReport,
}

pub struct CodebaseAnalyzer {
    file_scanner: FileScanner,
    import_extractor: ImportExtractor,
    threads: usize,
}

impl CodebaseAnalyzer {
    pub fn new() -> Result<Self, AnalyzeError> {
        Ok(Self {
            file_scanner: FileScanner::new(),
            import_extractor: ImportExtractor::new()?,
            threads: 0,
        })
    }

    /// Worker count for per-file extraction; `0` lets rayon decide.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn analyze(&self, root_path: &Path) -> Result<Analysis, AnalyzeError> {
        let start = Instant::now();
        let root = absolute_root(root_path)?;
        let mut report = RunReport::new();

        let aliases = discover_aliases(&root);
        report.aliases = aliases.len();

        let scan = self.file_scanner.scan_directory(&root);
        report.files_scanned = scan.files.len();
        report.extend(scan.diagnostics);
        if scan.files.is_empty() {
            return Err(AnalyzeError::NoSourceFiles(root));
        }

        let resolver = ImportResolver::new(&scan.index, &aliases);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;
        let extraction =
            pool.install(|| self.import_extractor.extract_all(&scan.files, resolver));
        report.files_parsed = extraction.files_parsed;
        report.files_errored = extraction.files_errored;
        report.extend(extraction.diagnostics);

        info!("Building dependency graph...");
        let (graph, graph_diagnostics) = build_graph(&extraction.dependencies, &root);
        report.extend(graph_diagnostics);
        report.nodes = graph.node_count();
        report.edges = graph.edge_count();

        let cycles = graph.cycles();
        report.cycles = cycles.len();
        if !cycles.is_empty() {
            warn!("Detected {} import cycles", cycles.len());
            for cycle in &cycles {
                debug!("Import cycle: {}", cycle.join(" -> "));
            }
        }

        report.elapsed = start.elapsed();

        Ok(Analysis {
            root,
            aliases,
            graph,
            report,
        })
    }
}

/// Validates `root_path` and returns it absolute and lexically normalized.
pub fn absolute_root(root_path: &Path) -> Result<PathBuf, AnalyzeError> {
    if !root_path.exists() {
        return Err(AnalyzeError::RootNotFound(root_path.to_path_buf()));
    }
    if !root_path.is_dir() {
        return Err(AnalyzeError::RootNotDirectory(root_path.to_path_buf()));
    }

    if root_path.is_absolute() {
        return Ok(root_path.clean());
    }
    let cwd = std::env::current_dir()
        .map_err(|_| AnalyzeError::RootNotFound(root_path.to_path_buf()))?;
    Ok(cwd.join(root_path).clean())
}
