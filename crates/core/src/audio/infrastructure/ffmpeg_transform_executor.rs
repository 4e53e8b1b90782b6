use std::path::{Path, PathBuf};
use std::process::Command;

use crate::audio::domain::filter_error::FilterError;
use crate::audio::domain::transform_executor::TransformExecutor;

pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Runs filter graphs through the `ffmpeg` command-line tool.
///
/// The output container is chosen by ffmpeg from the output file extension.
pub struct FfmpegTransformExecutor {
    binary: PathBuf,
}

impl FfmpegTransformExecutor {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_FFMPEG_BINARY)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, input: &Path, filter_graph: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-y", "-hide_banner", "-loglevel", "error", "-i"])
            .arg(input)
            .args(["-filter:a", filter_graph])
            .arg(output);
        cmd
    }
}

impl Default for FfmpegTransformExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformExecutor for FfmpegTransformExecutor {
    fn execute(&self, input: &Path, filter_graph: &str, output: &Path) -> Result<(), FilterError> {
        let mut cmd = self.command(input, filter_graph, output);
        log::debug!("Running {cmd:?}");

        let result = cmd.output().map_err(|e| FilterError::Transform {
            exit_code: None,
            diagnostic: format!("failed to launch {}: {e}", self.binary.display()),
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let diagnostic = if stderr.is_empty() {
                String::from_utf8_lossy(&result.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(FilterError::Transform {
                exit_code: result.status.code(),
                diagnostic,
            });
        }

        Ok(())
    }
}
