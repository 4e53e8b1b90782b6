pub mod ffmpeg_transform_executor;
pub mod wav_audio_reader;
pub mod wav_audio_writer;
