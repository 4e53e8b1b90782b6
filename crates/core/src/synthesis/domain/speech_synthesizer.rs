use std::path::Path;

use super::synthesis_error::SynthesisError;

/// Everything the engine needs to speak one text in a cloned voice.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub voice_reference: &'a Path,
    pub language: &'a str,
}

/// Domain interface for the external text-to-speech engine.
///
/// Implementations write a WAV file to `output` and report any engine failure
/// as `SynthesisError::Synthesis`.
pub trait SpeechSynthesizer: Send {
    fn synthesize(&self, request: &SynthesisRequest<'_>, output: &Path) -> Result<(), SynthesisError>;
}
