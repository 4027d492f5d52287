use path_clean::PathClean;
use serde::Deserialize;
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration files consulted for path aliases, in priority order.
pub const CONFIG_CANDIDATES: [&str; 2] = ["tsconfig.json", "jsconfig.json"];

#[derive(Debug, Default, Deserialize)]
struct ProjectConfig {
    #[serde(rename = "compilerOptions", default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    // Map keeps declaration order (serde_json `preserve_order`).
    #[serde(default)]
    paths: Map<String, serde_json::Value>,
}

/// A single alias: `prefix` is substituted by `base` in import specifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub prefix: String,
    pub base: PathBuf,
}

/// Ordered alias prefixes, in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: Vec<Alias>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias. Redeclaring a prefix replaces its base but keeps its position.
    pub fn insert(&mut self, prefix: impl Into<String>, base: impl Into<PathBuf>) {
        let prefix = prefix.into();
        let base = base.into();
        match self.aliases.iter_mut().find(|a| a.prefix == prefix) {
            Some(existing) => existing.base = base,
            None => self.aliases.push(Alias { prefix, base }),
        }
    }

    /// First alias (in declaration order) whose prefix starts `specifier`.
    pub fn find_prefix(&self, specifier: &str) -> Option<&Alias> {
        self.aliases
            .iter()
            .find(|alias| specifier.starts_with(alias.prefix.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.iter()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Reads path aliases from the first parseable `tsconfig.json`/`jsconfig.json`
/// under `root`. Absence or parse failure yields an empty table.
pub fn discover_aliases(root: &Path) -> AliasTable {
    info!("Discovering path alias configuration...");

    let mut table = AliasTable::new();

    for name in CONFIG_CANDIDATES {
        let config_path = root.join(name);
        if !config_path.exists() {
            continue;
        }
        info!("Found configuration file: {}", name);

        match load_config(&config_path) {
            Ok(config) => {
                table = aliases_from_config(root, &config);
                break;
            }
            Err(err) => {
                warn!(file = %config_path.display(), "Could not parse {}: {:#}", name, err);
            }
        }
    }

    if table.is_empty() {
        info!("No path aliases found. Proceeding with relative imports only.");
    } else {
        info!("Loaded {} path alias mappings.", table.len());
    }

    table
}

fn load_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn aliases_from_config(root: &Path, config: &ProjectConfig) -> AliasTable {
    let options = &config.compiler_options;
    let base_path = match options.base_url.as_deref() {
        Some(base_url) if !base_url.is_empty() => root.join(base_url).clean(),
        _ => root.to_path_buf(),
    };

    let mut table = AliasTable::new();
    for (pattern, targets) in &options.paths {
        let Some(target) = first_target(targets) else {
            debug!(alias = %pattern, "Alias has no target pattern; skipping");
            continue;
        };

        // `"*"` strips to an empty prefix that matches every non-relative specifier.
        let prefix = strip_wildcard(pattern);
        let target_path = strip_wildcard(target);
        let resolved = if target_path.is_empty() {
            base_path.clone()
        } else {
            base_path.join(target_path).clean()
        };

        info!("Path alias discovered: '{}' -> '{}'", prefix, resolved.display());
        table.insert(prefix, resolved);
    }
    table
}

fn first_target(targets: &serde_json::Value) -> Option<&str> {
    match targets {
        serde_json::Value::Array(items) => items.first().and_then(|v| v.as_str()),
        serde_json::Value::String(single) => Some(single.as_str()),
        _ => None,
    }
}

/// Strips any trailing `/` and `*` characters (`"@/*"` becomes `"@"`).
pub fn strip_wildcard(pattern: &str) -> &str {
    pattern.trim_end_matches(['/', '*'])
}
