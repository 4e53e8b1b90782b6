use std::path::Path;

use super::audio_segment::AudioSegment;
use super::filter_error::FilterError;

/// Domain interface for encoding audio to a file.
pub trait AudioWriter: Send {
    /// Encode the AudioSegment to `path` in the segment's own sample
    /// encoding, replacing any existing file.
    fn write_audio(&self, path: &Path, audio: &AudioSegment) -> Result<(), FilterError>;
}
