use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a whole run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("No JavaScript/TypeScript files found in {}", .0.display())]
    NoSourceFiles(PathBuf),

    #[error("Failed to initialize import query: {0}")]
    Query(String),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conditions that cause a single source file to be skipped.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Could not read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Syntax error in file")]
    Syntax,

    #[error("Parser produced no tree")]
    Parse,
}
