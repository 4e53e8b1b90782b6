pub mod coqui_tts_synthesizer;
pub mod directory_voice_store;
