use std::fs;
use std::path::Path;

use crate::core::{AnalyzeError, DependencyGraph};

/// Writes the `{nodes, edges}` graph document as JSON.
pub struct JsonGraphFormatter {
    /// Two-space indented output instead of a single line.
    pretty: bool,
}

impl JsonGraphFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(
        &self,
        graph: &DependencyGraph,
        output_path: &Path,
    ) -> Result<(), AnalyzeError> {
        let json_content = self.format_graph(graph)?;
        fs::write(output_path, json_content).map_err(|source| AnalyzeError::Output {
            path: output_path.to_path_buf(),
            source,
        })
    }

    pub fn format_graph(&self, graph: &DependencyGraph) -> Result<String, AnalyzeError> {
        let document = graph.document();
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(rendered)
    }
}

impl Default for JsonGraphFormatter {
    fn default() -> Self {
        Self::new()
    }
}
