use super::filter_request::FilterRequest;

/// Smallest factor a single tempo primitive accepts.
pub const MIN_TEMPO_FACTOR: f64 = 0.5;
/// Largest factor a single tempo primitive accepts.
pub const MAX_TEMPO_FACTOR: f64 = 2.0;

/// Remainders closer than this to 1.0 are treated as no change.
const UNITY_TOLERANCE: f64 = 1e-9;

/// One executable primitive of the filter graph.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveStage {
    /// Reinterpret the audio at `sample_rate`, shifting pitch and tempo together.
    ///
    /// `compensating_tempo` is the tempo factor that undoes the speed-up; the
    /// plan realizes it with the `TempoChange` stages that follow.
    Resample {
        sample_rate: u32,
        compensating_tempo: f64,
    },
    /// Change duration without changing pitch. Always within
    /// [`MIN_TEMPO_FACTOR`, `MAX_TEMPO_FACTOR`].
    TempoChange(f64),
}

impl PrimitiveStage {
    /// Filter-graph expression for this stage.
    pub fn expression(&self) -> String {
        match self {
            PrimitiveStage::Resample { sample_rate, .. } => format!("asetrate={sample_rate}"),
            PrimitiveStage::TempoChange(factor) => format!("atempo={factor}"),
        }
    }
}

/// Ordered list of primitive stages derived from a [`FilterRequest`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterPlan {
    source_sample_rate: u32,
    stages: Vec<PrimitiveStage>,
}

impl FilterPlan {
    /// Builds the stage list for `request` applied to audio at
    /// `source_sample_rate`. Gain never appears in the plan.
    ///
    /// Pitch comes first as a resample plus its tempo compensation, followed
    /// by the decomposed speed stages.
    pub fn build(request: &FilterRequest, source_sample_rate: u32) -> Self {
        let mut stages = Vec::new();

        if request.pitch_semitones() != 0 {
            let pitch_ratio = 2f64.powf(request.pitch_semitones() as f64 / 12.0);
            let sample_rate = (source_sample_rate as f64 * pitch_ratio).round() as u32;
            // Inverse of the rate change actually applied, not of the ideal ratio,
            // so the rounding of the new rate cancels too.
            let compensating_tempo = source_sample_rate as f64 / sample_rate as f64;
            stages.push(PrimitiveStage::Resample {
                sample_rate,
                compensating_tempo,
            });
            stages.extend(
                decompose_tempo(compensating_tempo)
                    .into_iter()
                    .map(PrimitiveStage::TempoChange),
            );
        }

        if request.speed_factor() != 1.0 {
            stages.extend(
                decompose_tempo(request.speed_factor())
                    .into_iter()
                    .map(PrimitiveStage::TempoChange),
            );
        }

        Self {
            source_sample_rate,
            stages,
        }
    }

    pub fn stages(&self) -> &[PrimitiveStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn source_sample_rate(&self) -> u32 {
        self.source_sample_rate
    }

    /// All stages joined into one filter-graph expression, applied in a single pass.
    pub fn filter_graph(&self) -> String {
        self.stages
            .iter()
            .map(PrimitiveStage::expression)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Net playback speed-up of the whole plan: resample rate ratios times
    /// every tempo factor.
    pub fn effective_speed(&self) -> f64 {
        self.stages.iter().fold(1.0, |acc, stage| match stage {
            PrimitiveStage::Resample { sample_rate, .. } => {
                acc * (*sample_rate as f64 / self.source_sample_rate as f64)
            }
            PrimitiveStage::TempoChange(factor) => acc * factor,
        })
    }
}

/// Splits a tempo factor into primitive factors each within
/// [`MIN_TEMPO_FACTOR`, `MAX_TEMPO_FACTOR`] whose product is `factor`.
///
/// Greedy: whole halvings or doublings first, then the remainder. A factor
/// of 1.0 yields no stages.
pub fn decompose_tempo(factor: f64) -> Vec<f64> {
    let mut remaining = factor;
    let mut factors = Vec::new();

    while remaining > MAX_TEMPO_FACTOR {
        factors.push(MAX_TEMPO_FACTOR);
        remaining /= MAX_TEMPO_FACTOR;
    }
    while remaining < MIN_TEMPO_FACTOR {
        factors.push(MIN_TEMPO_FACTOR);
        remaining /= MIN_TEMPO_FACTOR;
    }
    if (remaining - 1.0).abs() > UNITY_TOLERANCE {
        factors.push(remaining);
    }

    factors
}
