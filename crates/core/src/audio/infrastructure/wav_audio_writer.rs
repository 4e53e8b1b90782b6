use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::domain::audio_segment::{AudioSegment, SampleEncoding};
use crate::audio::domain::audio_writer::AudioWriter;
use crate::audio::domain::filter_error::FilterError;

/// Encodes AudioSegments as WAV files using hound.
pub struct WavAudioWriter;

impl AudioWriter for WavAudioWriter {
    fn write_audio(&self, path: &Path, audio: &AudioSegment) -> Result<(), FilterError> {
        let spec = match audio.encoding() {
            SampleEncoding::Int { bits } => WavSpec {
                channels: audio.channels(),
                sample_rate: audio.sample_rate(),
                bits_per_sample: bits,
                sample_format: SampleFormat::Int,
            },
            SampleEncoding::Float => WavSpec {
                channels: audio.channels(),
                sample_rate: audio.sample_rate(),
                bits_per_sample: 32,
                sample_format: SampleFormat::Float,
            },
        };

        let mut writer = WavWriter::create(path, spec).map_err(|e| write_error(path, e))?;

        match audio.encoding().int_scale() {
            Some(scale) => {
                let scale = scale as f64;
                for &sample in audio.samples() {
                    let quantized = (sample as f64 * scale).round().clamp(-scale, scale - 1.0);
                    writer
                        .write_sample(quantized as i32)
                        .map_err(|e| write_error(path, e))?;
                }
            }
            None => {
                for &sample in audio.samples() {
                    writer.write_sample(sample).map_err(|e| write_error(path, e))?;
                }
            }
        }

        writer.finalize().map_err(|e| write_error(path, e))?;
        Ok(())
    }
}

fn write_error(path: &Path, err: hound::Error) -> FilterError {
    let source = match err {
        hound::Error::IoError(io) => io,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
    };
    FilterError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_artifact::ArtifactSource;
    use crate::audio::domain::audio_reader::AudioReader;
    use crate::audio::infrastructure::wav_audio_reader::WavAudioReader;
    use rstest::rstest;
    use tempfile::TempDir;

    fn read_back(path: &Path) -> AudioSegment {
        let artifact = WavAudioReader.probe(ArtifactSource::file(path)).unwrap();
        WavAudioReader.read_audio(&artifact).unwrap()
    }

    #[rstest]
    #[case::pcm8(SampleEncoding::Int { bits: 8 }, 128.0)]
    #[case::pcm16(SampleEncoding::PCM_16, 32768.0)]
    #[case::pcm24(SampleEncoding::Int { bits: 24 }, 8388608.0)]
    fn test_integer_encodings_survive_write_and_read(
        #[case] encoding: SampleEncoding,
        #[case] scale: f32,
    ) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.wav");
        let samples = vec![0.0, 1.0 / scale, -1.0, 0.5, (scale - 1.0) / scale];
        let audio = AudioSegment::new(samples.clone(), 22050, 1).with_encoding(encoding);

        WavAudioWriter.write_audio(&path, &audio).unwrap();

        let back = read_back(&path);
        assert_eq!(back.samples(), &samples[..]);
        assert_eq!(back.encoding(), encoding);
        assert_eq!(back.sample_rate(), 22050);
    }

    #[test]
    fn test_float_encoding_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.wav");
        let audio = AudioSegment::new(vec![0.25, -0.125], 48000, 2).with_encoding(SampleEncoding::Float);

        WavAudioWriter.write_audio(&path, &audio).unwrap();

        let back = read_back(&path);
        assert_eq!(back.samples(), &[0.25, -0.125]);
        assert_eq!(back.channels(), 2);
        assert_eq!(back.encoding(), SampleEncoding::Float);
    }

    #[test]
    fn test_full_scale_positive_is_clamped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.wav");
        let audio = AudioSegment::new(vec![1.0], 16000, 1);

        WavAudioWriter.write_audio(&path, &audio).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let value: i16 = reader.samples::<i16>().next().unwrap().unwrap();
        assert_eq!(value, i16::MAX);
    }

    #[test]
    fn test_write_audio_nonexistent_dir() {
        let audio = AudioSegment::new(vec![0.0; 16000], 16000, 1);
        let path = if cfg!(windows) {
            Path::new("Z:\\nonexistent\\file.wav")
        } else {
            Path::new("/nonexistent/file.wav")
        };
        let result = WavAudioWriter.write_audio(path, &audio);
        assert!(matches!(result, Err(FilterError::Io { .. })));
    }
}
