use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::NamedTempFile;

use crate::audio::domain::audio_artifact::AudioArtifact;
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_writer::AudioWriter;
use crate::audio::domain::filter_error::FilterError;
use crate::audio::domain::filter_plan::FilterPlan;
use crate::audio::domain::filter_request::FilterRequest;
use crate::audio::domain::transform_executor::TransformExecutor;
use crate::shared::constants::{OUTPUT_EXTENSION, TEMP_PREFIX};

use super::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use super::temp_workspace::{TempRole, TempWorkspace};

const STAGE_COUNT: usize = 5;

/// Filter pipeline: decode → gain → intermediate → transform or copy → commit.
///
/// The result is rendered into a staging file beside the output target and
/// renamed over it only after it validates, so a failed run leaves the target
/// exactly as it was. All scratch files live in a per-run [`TempWorkspace`].
pub struct ApplyFiltersUseCase {
    reader: Box<dyn AudioReader>,
    writer: Box<dyn AudioWriter>,
    executor: Box<dyn TransformExecutor>,
    logger: Box<dyn PipelineLogger>,
    temp_root: Option<PathBuf>,
}

impl ApplyFiltersUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        writer: Box<dyn AudioWriter>,
        executor: Box<dyn TransformExecutor>,
        logger: Option<Box<dyn PipelineLogger>>,
        temp_root: Option<PathBuf>,
    ) -> Self {
        Self {
            reader,
            writer,
            executor,
            logger: logger.unwrap_or_else(|| Box::new(NullPipelineLogger)),
            temp_root,
        }
    }

    pub fn reader(&self) -> &dyn AudioReader {
        self.reader.as_ref()
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }

    pub fn temp_root(&self) -> Option<&Path> {
        self.temp_root.as_deref()
    }

    /// Validates raw filter values, then runs [`execute`](Self::execute).
    pub fn apply_filters(
        &mut self,
        source: &AudioArtifact,
        output: &Path,
        pitch_semitones: i32,
        speed_factor: f64,
        gain_db: i32,
    ) -> Result<(), FilterError> {
        let request = FilterRequest::new(pitch_semitones, speed_factor, gain_db)?;
        self.execute(source, output, &request)
    }

    pub fn execute(
        &mut self,
        source: &AudioArtifact,
        output: &Path,
        request: &FilterRequest,
    ) -> Result<(), FilterError> {
        check_output_target(output)?;

        let workspace = TempWorkspace::create(self.temp_root.as_deref()).map_err(FilterError::io(
            self.temp_root.clone().unwrap_or_else(std::env::temp_dir),
        ))?;
        let result = self.run_in(&workspace, source, output, request);
        workspace.release();

        match &result {
            Ok(()) => self
                .logger
                .info(&format!("Filters applied ({request}) -> {}", output.display())),
            Err(e) => log::debug!("Filter run on {} failed: {e}", source.describe()),
        }
        result
    }

    fn run_in(
        &mut self,
        workspace: &TempWorkspace,
        source: &AudioArtifact,
        output: &Path,
        request: &FilterRequest,
    ) -> Result<(), FilterError> {
        // 1. Decode
        let started = Instant::now();
        let mut audio = self.reader.read_audio(source)?;
        self.stage_done("decode", started, 1);

        // 2. Gain goes straight onto the samples; it never enters the plan
        let started = Instant::now();
        audio.apply_gain_db(request.gain_db() as f64);
        self.logger.metric("peak", audio.peak() as f64);
        self.stage_done("gain", started, 2);

        // 3. Intermediate, read by the transform or copied as-is. Without gain
        //    it is the source bytes unchanged, so no sample is re-quantized.
        let started = Instant::now();
        let intermediate = workspace.file(TempRole::GainAdjusted);
        if request.gain_db() == 0 {
            let bytes = source.bytes().map_err(FilterError::io(
                source.path().unwrap_or(intermediate.as_path()),
            ))?;
            fs::write(&intermediate, &bytes).map_err(FilterError::io(&intermediate))?;
        } else {
            self.writer.write_audio(&intermediate, &audio)?;
        }
        self.stage_done("intermediate", started, 3);

        // 4. Transform or pass through into a staging file next to the target
        let started = Instant::now();
        let plan = FilterPlan::build(&request.without_gain(), audio.sample_rate());
        self.logger.metric("plan_stages", plan.stages().len() as f64);
        let staging = staging_file(output)?;
        if plan.is_empty() {
            fs::copy(&intermediate, staging.path()).map_err(FilterError::io(staging.path()))?;
        } else {
            let graph = plan.filter_graph();
            log::debug!("Filter graph: {graph}");
            self.executor.execute(&intermediate, &graph, staging.path())?;
        }
        self.stage_done(if plan.is_empty() { "copy" } else { "transform" }, started, 4);

        // 5. Validate, then commit atomically
        let started = Instant::now();
        let size = match fs::metadata(staging.path()) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(FilterError::io(staging.path())(e)),
        };
        if size == 0 {
            return Err(FilterError::EmptyOutput(output.to_path_buf()));
        }
        staging.persist(output).map_err(|e| FilterError::Io {
            path: output.to_path_buf(),
            source: e.error,
        })?;
        self.logger.metric("output_bytes", size as f64);
        self.stage_done("commit", started, 5);

        Ok(())
    }

    fn stage_done(&mut self, stage: &str, started: Instant, index: usize) {
        self.logger
            .timing(stage, started.elapsed().as_secs_f64() * 1000.0);
        self.logger.progress(index, STAGE_COUNT);
    }
}

/// Output must be a WAV path inside an existing directory. The pass-through
/// branch copies the WAV intermediate verbatim.
fn check_output_target(output: &Path) -> Result<(), FilterError> {
    let is_wav = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if !is_wav {
        return Err(FilterError::InvalidInput(format!(
            "output {} must be a .{OUTPUT_EXTENSION} file",
            output.display()
        )));
    }
    if output.is_dir() {
        return Err(FilterError::InvalidInput(format!(
            "output {} is a directory",
            output.display()
        )));
    }
    let parent = output_dir(output);
    if !parent.is_dir() {
        return Err(FilterError::InvalidInput(format!(
            "output directory {} does not exist",
            parent.display()
        )));
    }
    Ok(())
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Uniquely named file in the output's directory; the final rename must not
/// cross filesystems. Removed on drop unless persisted.
fn staging_file(output: &Path) -> Result<NamedTempFile, FilterError> {
    let dir = output_dir(output);
    tempfile::Builder::new()
        .prefix(&format!(".{TEMP_PREFIX}"))
        .suffix(&format!(".{OUTPUT_EXTENSION}"))
        .tempfile_in(dir)
        .map_err(FilterError::io(dir))
}
