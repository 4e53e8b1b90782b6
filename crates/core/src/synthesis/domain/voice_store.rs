use std::path::PathBuf;

/// Domain interface for the set of voice reference samples.
pub trait VoiceStore: Send {
    /// Selectable voice ids, sorted.
    fn voices(&self) -> std::io::Result<Vec<String>>;

    /// Path of the reference sample for `voice_id`, if one exists.
    fn reference_sample(&self, voice_id: &str) -> Option<PathBuf>;
}
