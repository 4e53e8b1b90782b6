/// How samples were stored in the source container.
///
/// Kept alongside the decoded samples so re-encoding writes the same format
/// the audio arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleEncoding {
    Int { bits: u16 },
    Float,
}

impl SampleEncoding {
    pub const PCM_16: SampleEncoding = SampleEncoding::Int { bits: 16 };

    /// Full-scale magnitude for integer encodings (`2^(bits-1)`).
    pub fn int_scale(&self) -> Option<f32> {
        match self {
            SampleEncoding::Int { bits } => Some((1u64 << (bits - 1)) as f32),
            SampleEncoding::Float => None,
        }
    }
}

/// A segment of decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
    encoding: SampleEncoding,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
            encoding: SampleEncoding::PCM_16,
        }
    }

    pub fn with_encoding(mut self, encoding: SampleEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// `duration_ms` milliseconds of digital silence.
    pub fn silent(duration_ms: u32, sample_rate: u32, channels: u16) -> Self {
        let frames = (sample_rate as u64 * duration_ms as u64 / 1000) as usize;
        Self::new(vec![0.0; frames * channels as usize], sample_rate, channels)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
    }

    /// Scales every sample by `10^(db/20)`, clamping to full scale.
    ///
    /// A zero gain leaves the samples untouched.
    pub fn apply_gain_db(&mut self, db: f64) {
        if db == 0.0 {
            return;
        }
        let factor = 10f64.powf(db / 20.0) as f32;
        for sample in self.samples.iter_mut() {
            *sample = (*sample * factor).clamp(-1.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_creates_segment_with_correct_fields() {
        let samples = vec![0.0f32; 16000];
        let seg = AudioSegment::new(samples.clone(), 16000, 1);
        assert_eq!(seg.samples(), &samples[..]);
        assert_eq!(seg.sample_rate(), 16000);
        assert_eq!(seg.channels(), 1);
        assert_eq!(seg.encoding(), SampleEncoding::PCM_16);
    }

    #[test]
    fn test_duration_mono() {
        let seg = AudioSegment::new(vec![0.0; 48000], 16000, 1);
        assert_eq!(seg.duration(), 3.0);
    }

    #[test]
    fn test_duration_stereo() {
        let seg = AudioSegment::new(vec![0.0; 96000], 48000, 2);
        assert_eq!(seg.duration(), 1.0);
    }

    #[test]
    fn test_silent_has_requested_length() {
        let seg = AudioSegment::silent(1000, 16000, 2);
        assert_eq!(seg.samples().len(), 32000);
        assert_eq!(seg.peak(), 0.0);
    }

    #[test]
    fn test_gain_plus_six_db_roughly_doubles() {
        let mut seg = AudioSegment::new(vec![0.1, -0.2], 16000, 1);
        seg.apply_gain_db(6.0);
        assert_relative_eq!(seg.samples()[0], 0.1995, epsilon = 1e-3);
        assert_relative_eq!(seg.samples()[1], -0.3991, epsilon = 1e-3);
    }

    #[test]
    fn test_gain_round_trip_restores_amplitude() {
        let original: Vec<f32> = (0..1000).map(|i| ((i as f32) * 0.01).sin() * 0.4).collect();
        let mut seg = AudioSegment::new(original.clone(), 16000, 1);
        seg.apply_gain_db(6.0);
        seg.apply_gain_db(-6.0);
        for (a, b) in original.iter().zip(seg.samples()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gain_clamps_to_full_scale() {
        let mut seg = AudioSegment::new(vec![0.9, -0.9], 16000, 1);
        seg.apply_gain_db(20.0);
        assert_eq!(seg.samples(), &[1.0, -1.0]);
    }

    #[test]
    fn test_zero_gain_is_identity() {
        let mut seg = AudioSegment::new(vec![0.123, -0.456], 16000, 1);
        seg.apply_gain_db(0.0);
        assert_eq!(seg.samples(), &[0.123, -0.456]);
    }

    #[test]
    fn test_int_scale() {
        assert_eq!(SampleEncoding::PCM_16.int_scale(), Some(32768.0));
        assert_eq!(SampleEncoding::Int { bits: 24 }.int_scale(), Some(8388608.0));
        assert_eq!(SampleEncoding::Float.int_scale(), None);
    }
}
