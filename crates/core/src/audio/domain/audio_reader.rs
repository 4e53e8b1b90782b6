use super::audio_artifact::{ArtifactSource, AudioArtifact};
use super::audio_segment::AudioSegment;
use super::filter_error::FilterError;

/// Domain interface for opening and decoding audio artifacts.
pub trait AudioReader: Send {
    /// Read the container header of `source` and wrap it as an artifact.
    ///
    /// Fails with `InvalidInput` for a file path that does not exist and with
    /// `Decode` when the bytes are not a readable audio container.
    fn probe(&self, source: ArtifactSource) -> Result<AudioArtifact, FilterError>;

    /// Decode the artifact to interleaved PCM. Fails with `Decode` when the
    /// audio is unreadable or holds no samples.
    fn read_audio(&self, artifact: &AudioArtifact) -> Result<AudioSegment, FilterError>;
}
