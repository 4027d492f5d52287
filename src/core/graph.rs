use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::report::{Diagnostic, DiagnosticKind};

/// Source file -> the files it imports, in statement order (duplicates kept).
pub type DependencyMap = BTreeMap<PathBuf, Vec<PathBuf>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeRecord {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

/// Serialized shape of a graph: exactly `nodes` and `edges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

/// File-level import graph keyed by project-relative, `/`-separated paths.
///
/// Both sets are ordered, so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeSet<String>,
    edges: BTreeSet<(String, String)>,
}

impl DependencyGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(&(source.to_string(), target.to_string()))
    }

    pub fn document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self
                .nodes
                .iter()
                .map(|id| NodeRecord { id: id.clone() })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|(source, target)| EdgeRecord {
                    source: source.clone(),
                    target: target.clone(),
                })
                .collect(),
        }
    }

    /// Import cycles: strongly connected components with more than one file,
    /// plus files that import themselves. Members and cycles are sorted.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraphMap<&str, ()> =
            DiGraphMap::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes() {
            graph.add_node(node);
        }
        for (source, target) in self.edges() {
            graph.add_edge(source, target, ());
        }

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<String> = scc.into_iter().map(str::to_string).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }
}

/// Accumulates absolute-path dependencies into a [`DependencyGraph`].
pub struct GraphBuilder {
    root: PathBuf,
    graph: DependencyGraph,
    ids: HashMap<PathBuf, Option<String>>,
    diagnostics: Vec<Diagnostic>,
}

impl GraphBuilder {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            graph: DependencyGraph::default(),
            ids: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Adds `source` and its targets as nodes, and one edge per distinct target.
    pub fn add_file(&mut self, source: &Path, targets: &[PathBuf]) {
        let source_id = self.node_id(source);
        if let Some(id) = &source_id {
            self.graph.nodes.insert(id.clone());
        }

        for target in targets {
            let Some(target_id) = self.node_id(target) else {
                continue;
            };
            self.graph.nodes.insert(target_id.clone());
            if let Some(source_id) = &source_id {
                self.graph.edges.insert((source_id.clone(), target_id));
            }
        }
    }

    pub fn build(self) -> (DependencyGraph, Vec<Diagnostic>) {
        (self.graph, self.diagnostics)
    }

    fn node_id(&mut self, path: &Path) -> Option<String> {
        if let Some(cached) = self.ids.get(path) {
            return cached.clone();
        }

        let id = relative_id(&self.root, path);
        if id.is_none() {
            warn!(
                path = %path.display(),
                "Could not make path relative to {}",
                self.root.display()
            );
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::NotRelative,
                path,
                format!("not under {}", self.root.display()),
            ));
        }
        self.ids.insert(path.to_path_buf(), id.clone());
        id
    }
}

/// Builds the graph for a whole dependency map.
pub fn build_graph(
    dependencies: &DependencyMap,
    root: &Path,
) -> (DependencyGraph, Vec<Diagnostic>) {
    let mut builder = GraphBuilder::new(root);
    for (source, targets) in dependencies {
        builder.add_file(source, targets);
    }
    builder.build()
}

/// `path` relative to `root`, always `/`-separated.
pub fn relative_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
