pub const APP_NAME: &str = "NovaStudio";

pub const DEFAULT_TTS_TEXT: &str =
    "Benvenuti in NovaStudioVocale! Scrivi qui il testo che vuoi trasformare in voce.";

/// Language passed to the synthesis engine.
pub const DEFAULT_LANGUAGE: &str = "it";

pub const SPEAKER_DIR_NAME: &str = "speaker_previews";
pub const OUTPUT_DIR_NAME: &str = "filtered_output_audio";
pub const VOCABULARY_FILE_NAME: &str = "vocabolario.json";

pub const OUTPUT_EXTENSION: &str = "wav";
pub const EXPORT_NAME_PREFIX: &str = "audio_nova_studio";

/// Prefix of per-run scratch directories.
pub const TEMP_PREFIX: &str = "novastudio-";
