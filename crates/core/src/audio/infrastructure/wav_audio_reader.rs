use std::io::{Cursor, Read};

use hound::{SampleFormat, WavReader};

use crate::audio::domain::audio_artifact::{ArtifactSource, AudioArtifact, AudioInfo};
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::{AudioSegment, SampleEncoding};
use crate::audio::domain::filter_error::FilterError;

/// Decodes WAV artifacts using hound.
///
/// Samples keep their channel layout and the source's sample encoding, so
/// integer PCM up to 24 bits survives a decode/encode cycle unchanged.
pub struct WavAudioReader;

impl AudioReader for WavAudioReader {
    fn probe(&self, source: ArtifactSource) -> Result<AudioArtifact, FilterError> {
        let info = match &source {
            ArtifactSource::Memory(bytes) => {
                let reader = WavReader::new(Cursor::new(&bytes[..]))
                    .map_err(|e| decode_error(&source, e))?;
                info_of(&reader)
            }
            ArtifactSource::File(path) => {
                if !path.is_file() {
                    return Err(FilterError::InvalidInput(format!(
                        "audio source {} is not an existing file",
                        path.display()
                    )));
                }
                let reader = WavReader::open(path).map_err(|e| decode_error(&source, e))?;
                info_of(&reader)
            }
        };
        Ok(AudioArtifact::new(source, info))
    }

    fn read_audio(&self, artifact: &AudioArtifact) -> Result<AudioSegment, FilterError> {
        let source = artifact.source();
        match source {
            ArtifactSource::Memory(bytes) => {
                let reader = WavReader::new(Cursor::new(&bytes[..]))
                    .map_err(|e| decode_error(source, e))?;
                decode(reader, source)
            }
            ArtifactSource::File(path) => {
                if !path.is_file() {
                    return Err(FilterError::InvalidInput(format!(
                        "audio source {} no longer exists",
                        path.display()
                    )));
                }
                let reader = WavReader::open(path).map_err(|e| decode_error(source, e))?;
                decode(reader, source)
            }
        }
    }
}

fn info_of<R: Read>(reader: &WavReader<R>) -> AudioInfo {
    let spec = reader.spec();
    AudioInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration: reader.duration() as f64 / spec.sample_rate as f64,
    }
}

fn decode<R: Read>(reader: WavReader<R>, source: &ArtifactSource) -> Result<AudioSegment, FilterError> {
    let spec = reader.spec();

    let (samples, encoding) = match spec.sample_format {
        SampleFormat::Float => {
            let samples = reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| decode_error(source, e))?;
            (samples, SampleEncoding::Float)
        }
        SampleFormat::Int => {
            let encoding = SampleEncoding::Int {
                bits: spec.bits_per_sample,
            };
            let scale = encoding.int_scale().unwrap_or(32768.0);
            let samples = reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| decode_error(source, e))?;
            (samples, encoding)
        }
    };

    if samples.is_empty() {
        return Err(FilterError::Decode {
            origin: source.describe(),
            reason: "no audio samples".to_string(),
        });
    }

    Ok(AudioSegment::new(samples, spec.sample_rate, spec.channels).with_encoding(encoding))
}

fn decode_error(source: &ArtifactSource, err: hound::Error) -> FilterError {
    FilterError::Decode {
        origin: source.describe(),
        reason: err.to_string(),
    }
}
