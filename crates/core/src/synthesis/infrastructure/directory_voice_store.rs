use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::audio_writer::AudioWriter;
use crate::audio::infrastructure::wav_audio_writer::WavAudioWriter;
use crate::synthesis::domain::voice_store::VoiceStore;

pub const PLACEHOLDER_VOICE: &str = "placeholder_speaker";
const PLACEHOLDER_DURATION_MS: u32 = 1000;
const PLACEHOLDER_SAMPLE_RATE: u32 = 16000;
const VOICE_EXTENSION: &str = "wav";

/// Voices stored as `<voice_id>.wav` files in one directory.
///
/// Dropping a new WAV file into the directory makes a new voice available.
pub struct DirectoryVoiceStore {
    dir: PathBuf,
}

impl DirectoryVoiceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if needed and, when it holds no voices, writes a
    /// silent placeholder sample so there is always something to select.
    ///
    /// Returns the voice list after the check.
    pub fn ensure_placeholder(&self) -> io::Result<Vec<String>> {
        fs::create_dir_all(&self.dir)?;
        let voices = self.voices()?;
        if !voices.is_empty() {
            return Ok(voices);
        }

        let path = self.voice_path(PLACEHOLDER_VOICE);
        let silence = AudioSegment::silent(PLACEHOLDER_DURATION_MS, PLACEHOLDER_SAMPLE_RATE, 1);
        WavAudioWriter
            .write_audio(&path, &silence)
            .map_err(io::Error::other)?;
        log::warn!(
            "No voices found in {}; created placeholder voice '{PLACEHOLDER_VOICE}'. Add .wav samples for real voices.",
            self.dir.display()
        );

        Ok(vec![PLACEHOLDER_VOICE.to_string()])
    }

    fn voice_path(&self, voice_id: &str) -> PathBuf {
        self.dir.join(format!("{voice_id}.{VOICE_EXTENSION}"))
    }
}

impl VoiceStore for DirectoryVoiceStore {
    fn voices(&self) -> io::Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut voices = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_wav = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == VOICE_EXTENSION);
            if let (true, Some(stem)) = (is_wav, path.file_stem().and_then(|s| s.to_str())) {
                voices.push(stem.to_string());
            }
        }
        voices.sort();
        Ok(voices)
    }

    fn reference_sample(&self, voice_id: &str) -> Option<PathBuf> {
        let is_plain_name = !voice_id.is_empty()
            && voice_id != "."
            && voice_id != ".."
            && !voice_id.contains(['/', '\\']);
        if !is_plain_name {
            return None;
        }
        let path = self.voice_path(voice_id);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_voices_lists_wav_stems_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("zeta.wav"), b"x").unwrap();
        fs::write(tmp.path().join("alpha.wav"), b"x").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(tmp.path().join("nested.wav")).unwrap();

        let store = DirectoryVoiceStore::new(tmp.path());
        assert_eq!(store.voices().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_voices_of_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = DirectoryVoiceStore::new(tmp.path().join("missing"));
        assert!(store.voices().unwrap().is_empty());
    }

    #[test]
    fn test_reference_sample_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("narratorA.wav"), b"x").unwrap();
        let store = DirectoryVoiceStore::new(tmp.path());
        assert_eq!(
            store.reference_sample("narratorA"),
            Some(tmp.path().join("narratorA.wav"))
        );
    }

    #[test]
    fn test_reference_sample_missing() {
        let tmp = TempDir::new().unwrap();
        let store = DirectoryVoiceStore::new(tmp.path());
        assert!(store.reference_sample("narratorA").is_none());
    }

    #[test]
    fn test_reference_sample_rejects_paths() {
        let tmp = TempDir::new().unwrap();
        let voices = tmp.path().join("voices");
        fs::create_dir(&voices).unwrap();
        fs::write(tmp.path().join("outside.wav"), b"x").unwrap();
        let store = DirectoryVoiceStore::new(&voices);
        assert!(store.reference_sample("../outside").is_none());
        assert!(store.reference_sample("").is_none());
    }

    #[test]
    fn test_ensure_placeholder_creates_silent_voice() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("speakers");
        let store = DirectoryVoiceStore::new(&dir);

        let voices = store.ensure_placeholder().unwrap();
        assert_eq!(voices, vec![PLACEHOLDER_VOICE]);

        let path = store.reference_sample(PLACEHOLDER_VOICE).unwrap();
        let reader = hound::WavReader::open(path).unwrap();
        assert_eq!(reader.spec().sample_rate, PLACEHOLDER_SAMPLE_RATE);
        assert_eq!(reader.duration(), PLACEHOLDER_SAMPLE_RATE);
    }

    #[test]
    fn test_ensure_placeholder_keeps_existing_voices() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("narratorA.wav"), b"x").unwrap();
        let store = DirectoryVoiceStore::new(tmp.path());

        let voices = store.ensure_placeholder().unwrap();
        assert_eq!(voices, vec!["narratorA"]);
        assert!(store.reference_sample(PLACEHOLDER_VOICE).is_none());
    }
}
