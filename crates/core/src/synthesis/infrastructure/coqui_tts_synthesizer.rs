use std::path::{Path, PathBuf};
use std::process::Command;

use crate::synthesis::domain::speech_synthesizer::{SpeechSynthesizer, SynthesisRequest};
use crate::synthesis::domain::synthesis_error::SynthesisError;

pub const DEFAULT_TTS_BINARY: &str = "tts";
pub const XTTS_V2_MODEL: &str = "tts_models/multilingual/multi-dataset/xtts_v2";

/// Voice-cloning synthesis through the Coqui TTS command-line tool.
pub struct CoquiTtsSynthesizer {
    binary: PathBuf,
    model_name: String,
}

impl CoquiTtsSynthesizer {
    pub fn new(binary: impl Into<PathBuf>, model_name: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            model_name: model_name.into(),
        }
    }

    fn command(&self, request: &SynthesisRequest<'_>, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--model_name", self.model_name.as_str()])
            .args(["--text", request.text])
            .arg("--speaker_wav")
            .arg(request.voice_reference)
            .args(["--language_idx", request.language])
            .arg("--out_path")
            .arg(output);
        cmd
    }
}

impl Default for CoquiTtsSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_TTS_BINARY, XTTS_V2_MODEL)
    }
}

impl SpeechSynthesizer for CoquiTtsSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest<'_>, output: &Path) -> Result<(), SynthesisError> {
        let mut cmd = self.command(request, output);
        log::debug!(
            "Running {} with model {} for {} characters",
            self.binary.display(),
            self.model_name,
            request.text.chars().count()
        );

        let result = cmd.output().map_err(|e| {
            SynthesisError::failed(format!(
                "could not launch {}: {e}; is Coqui TTS installed and on PATH?",
                self.binary.display()
            ))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let code = result
                .status
                .code()
                .map_or_else(|| "no exit code".to_string(), |c| format!("exit code {c}"));
            let detail = if stderr.is_empty() {
                "no diagnostic output".to_string()
            } else {
                stderr
            };
            return Err(SynthesisError::failed(format!(
                "{} failed ({code}): {detail}",
                self.binary.display()
            )));
        }

        Ok(())
    }
}
