use std::path::PathBuf;

use thiserror::Error;

/// Failures of a filter pipeline run.
///
/// Each variant maps to a different remedy: a bad request, a bad source file,
/// a broken transform tool, or a tool that ran but produced nothing.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("could not decode audio from {origin}: {reason}")]
    Decode { origin: String, reason: String },
    #[error("audio transform failed ({}): {diagnostic}", describe_exit(.exit_code))]
    Transform {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    #[error("transform produced no output at {0}")]
    EmptyOutput(PathBuf),
    #[error("file operation failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilterError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> FilterError {
        let path = path.into();
        move |source| FilterError::Io { path, source }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}
