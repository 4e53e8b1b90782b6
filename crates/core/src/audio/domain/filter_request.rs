use std::ops::RangeInclusive;

use super::filter_error::FilterError;

pub const PITCH_RANGE: RangeInclusive<i32> = -12..=12;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.25..=4.0;
pub const GAIN_RANGE: RangeInclusive<i32> = -20..=20;

/// Validated pitch/speed/gain adjustment for one pipeline run.
///
/// Construction is the only place ranges are checked; everything downstream
/// may assume the values are in range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterRequest {
    pitch_semitones: i32,
    speed_factor: f64,
    gain_db: i32,
}

impl FilterRequest {
    pub fn new(pitch_semitones: i32, speed_factor: f64, gain_db: i32) -> Result<Self, FilterError> {
        if !PITCH_RANGE.contains(&pitch_semitones) {
            return Err(FilterError::InvalidInput(format!(
                "pitch must be between {} and {} semitones, got {pitch_semitones}",
                PITCH_RANGE.start(),
                PITCH_RANGE.end()
            )));
        }
        if !speed_factor.is_finite() || !SPEED_RANGE.contains(&speed_factor) {
            return Err(FilterError::InvalidInput(format!(
                "speed must be between {} and {}, got {speed_factor}",
                SPEED_RANGE.start(),
                SPEED_RANGE.end()
            )));
        }
        if !GAIN_RANGE.contains(&gain_db) {
            return Err(FilterError::InvalidInput(format!(
                "gain must be between {} and {} dB, got {gain_db}",
                GAIN_RANGE.start(),
                GAIN_RANGE.end()
            )));
        }
        Ok(Self {
            pitch_semitones,
            speed_factor,
            gain_db,
        })
    }

    /// No pitch, speed, or gain change.
    pub fn neutral() -> Self {
        Self {
            pitch_semitones: 0,
            speed_factor: 1.0,
            gain_db: 0,
        }
    }

    pub fn pitch_semitones(&self) -> i32 {
        self.pitch_semitones
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn gain_db(&self) -> i32 {
        self.gain_db
    }

    /// Same pitch and speed with the gain stripped out, for plan building
    /// after gain has already been applied to the samples.
    pub fn without_gain(&self) -> Self {
        Self { gain_db: 0, ..*self }
    }

    pub fn is_neutral(&self) -> bool {
        self.pitch_semitones == 0 && self.speed_factor == 1.0 && self.gain_db == 0
    }
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self::neutral()
    }
}

impl std::fmt::Display for FilterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pitch: {} semitones, Speed: {:.2}x, Volume: {} dB",
            self.pitch_semitones, self.speed_factor, self.gain_db
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_neutral_is_default() {
        assert_eq!(FilterRequest::default(), FilterRequest::neutral());
        assert!(FilterRequest::neutral().is_neutral());
    }

    #[rstest]
    #[case::lowest(-12, 0.25, -20)]
    #[case::highest(12, 4.0, 20)]
    #[case::typical(2, 1.5, -3)]
    fn test_accepts_values_in_range(#[case] pitch: i32, #[case] speed: f64, #[case] gain: i32) {
        let request = FilterRequest::new(pitch, speed, gain).unwrap();
        assert_eq!(request.pitch_semitones(), pitch);
        assert_eq!(request.speed_factor(), speed);
        assert_eq!(request.gain_db(), gain);
    }

    #[rstest]
    #[case::pitch_too_low(-13, 1.0, 0)]
    #[case::pitch_too_high(13, 1.0, 0)]
    #[case::speed_too_low(0, 0.2, 0)]
    #[case::speed_too_high(0, 4.01, 0)]
    #[case::speed_nan(0, f64::NAN, 0)]
    #[case::gain_too_low(0, 1.0, -21)]
    #[case::gain_too_high(0, 1.0, 21)]
    fn test_rejects_values_out_of_range(#[case] pitch: i32, #[case] speed: f64, #[case] gain: i32) {
        let result = FilterRequest::new(pitch, speed, gain);
        assert!(matches!(result, Err(FilterError::InvalidInput(_))));
    }

    #[test]
    fn test_without_gain_keeps_pitch_and_speed() {
        let request = FilterRequest::new(3, 0.75, 10).unwrap().without_gain();
        assert_eq!(request.pitch_semitones(), 3);
        assert_eq!(request.speed_factor(), 0.75);
        assert_eq!(request.gain_db(), 0);
    }

    #[test]
    fn test_display_summarizes_values() {
        let request = FilterRequest::new(-2, 1.25, 4).unwrap();
        assert_eq!(
            request.to_string(),
            "Pitch: -2 semitones, Speed: 1.25x, Volume: 4 dB"
        );
    }
}
