use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use novastudio_core::audio::domain::audio_artifact::ArtifactSource;
use novastudio_core::audio::domain::audio_reader::AudioReader;
use novastudio_core::audio::domain::filter_plan::FilterPlan;
use novastudio_core::audio::domain::filter_request::FilterRequest;
use novastudio_core::audio::infrastructure::ffmpeg_transform_executor::FfmpegTransformExecutor;
use novastudio_core::audio::infrastructure::wav_audio_reader::WavAudioReader;
use novastudio_core::audio::infrastructure::wav_audio_writer::WavAudioWriter;
use novastudio_core::pipeline::apply_filters_use_case::ApplyFiltersUseCase;
use novastudio_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use novastudio_core::pipeline::studio_session::{default_export_name, StudioSession};
use novastudio_core::pipeline::synthesize_base_use_case::SynthesizeBaseUseCase;
use novastudio_core::shared::config::StudioConfig;
use novastudio_core::synthesis::infrastructure::coqui_tts_synthesizer::CoquiTtsSynthesizer;
use novastudio_core::synthesis::infrastructure::directory_voice_store::DirectoryVoiceStore;
use novastudio_core::text::domain::pronunciation_vocabulary::PronunciationVocabulary;

/// Voice-cloned speech synthesis with pitch, speed, and volume filters.
#[derive(Parser)]
#[command(name = "novastudio", version)]
struct Cli {
    /// Settings file (default: <config dir>/NovaStudio/settings.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available voices, creating a placeholder voice if there are none.
    Voices,

    /// Synthesize text in a cloned voice and export it with filters applied.
    Speak {
        #[command(flatten)]
        input: TextInput,

        /// Voice id (file stem of a sample in the speaker directory).
        #[arg(long)]
        voice: String,

        #[command(flatten)]
        edits: TextEdits,

        #[command(flatten)]
        filters: FilterArgs,

        /// Export file name (default: audio_nova_studio_<timestamp>).
        #[arg(long)]
        name: Option<String>,

        /// Export directory (default: output_dir from settings).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Apply filters to an existing WAV file.
    Filter {
        /// Input WAV file.
        input: PathBuf,

        /// Output WAV file.
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the filter graph a request compiles to.
    Plan {
        /// Sample rate of the audio the plan is built for.
        #[arg(long, default_value = "24000")]
        sample_rate: u32,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Apply text tools to a script and print the result.
    Text {
        #[command(flatten)]
        input: TextInput,

        #[command(flatten)]
        edits: TextEdits,
    },
}

#[derive(Args)]
struct TextInput {
    /// Text to speak.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text from a file.
    #[arg(long)]
    text_file: Option<PathBuf>,
}

#[derive(Args)]
struct TextEdits {
    /// Lengthen pauses (every '.' becomes '...') and drop quotation marks.
    #[arg(long)]
    liturgical_pause: bool,

    /// Start a new line after every period.
    #[arg(long)]
    newline_after_period: bool,

    /// Replace words using the pronunciation vocabulary.
    #[arg(long)]
    fix_pronunciation: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Pitch shift in semitones (-12 to 12).
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pitch: i32,

    /// Playback speed factor (0.25 to 4.0).
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Volume change in dB (-20 to 20).
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    gain: i32,
}

impl FilterArgs {
    fn to_request(&self) -> Result<FilterRequest, Box<dyn std::error::Error>> {
        Ok(FilterRequest::new(self.pitch, self.speed, self.gain)?)
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => StudioConfig::load_from(path)?,
        None => StudioConfig::load(),
    };

    match cli.command {
        Command::Voices => run_voices(&config),
        Command::Speak {
            input,
            voice,
            edits,
            filters,
            name,
            output_dir,
        } => {
            let request = filters.to_request()?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            run_speak(&config, &input, &voice, &edits, &request, name, &output_dir)
        }
        Command::Filter {
            input,
            output,
            filters,
        } => run_filter(&config, &input, &output, &filters.to_request()?),
        Command::Plan {
            sample_rate,
            filters,
        } => run_plan(sample_rate, &filters.to_request()?),
        Command::Text { input, edits } => run_text(&config, &input, &edits),
    }
}

fn run_voices(config: &StudioConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = DirectoryVoiceStore::new(&config.speaker_dir);
    for voice in store.ensure_placeholder()? {
        println!("{voice}");
    }
    Ok(())
}

fn run_speak(
    config: &StudioConfig,
    input: &TextInput,
    voice: &str,
    edits: &TextEdits,
    request: &FilterRequest,
    name: Option<String>,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = StudioSession::new();
    if let Some(text) = read_text(input)? {
        session.set_text(text);
    }
    apply_edits(config, &mut session, edits)?;

    let store = DirectoryVoiceStore::new(&config.speaker_dir);
    store.ensure_placeholder()?;
    let synthesis = SynthesizeBaseUseCase::new(
        Box::new(CoquiTtsSynthesizer::new(&config.tts_binary, &config.tts_model)),
        Box::new(store),
        Box::new(WavAudioReader),
        config.language.clone(),
        config.temp_dir.clone(),
    );

    eprintln!("Synthesizing with voice '{voice}'...");
    let base = session.generate_base(&synthesis, voice)?;
    log::info!("Base audio: {:.2}s at {} Hz", base.duration(), base.sample_rate());

    let name = name.unwrap_or_else(|| default_export_name(chrono::Local::now().naive_local()));
    let mut filters = build_filters(config);
    let path = session.export(&mut filters, output_dir, &name, request)?;
    filters.logger().summary();

    println!("{}", path.display());
    Ok(())
}

fn run_filter(
    config: &StudioConfig,
    input: &Path,
    output: &Path,
    request: &FilterRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = WavAudioReader.probe(ArtifactSource::file(input))?;
    let mut filters = build_filters(config);
    filters.execute(&source, output, request)?;
    filters.logger().summary();

    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_plan(sample_rate: u32, request: &FilterRequest) -> Result<(), Box<dyn std::error::Error>> {
    if sample_rate == 0 {
        return Err("Sample rate must be positive".into());
    }
    let plan = FilterPlan::build(request, sample_rate);
    println!("{request}");
    if plan.is_empty() {
        println!("No transform needed: audio is copied as-is");
        return Ok(());
    }
    for stage in plan.stages() {
        println!("  {}", stage.expression());
    }
    println!("Filter graph: {}", plan.filter_graph());
    println!("Effective speed: {:.4}x", plan.effective_speed());
    Ok(())
}

fn run_text(
    config: &StudioConfig,
    input: &TextInput,
    edits: &TextEdits,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(input)?.ok_or("Provide --text or --text-file")?;
    let mut session = StudioSession::new();
    session.set_text(text);
    apply_edits(config, &mut session, edits)?;
    println!("{}", session.text());
    Ok(())
}

fn build_filters(config: &StudioConfig) -> ApplyFiltersUseCase {
    ApplyFiltersUseCase::new(
        Box::new(WavAudioReader),
        Box::new(WavAudioWriter),
        Box::new(FfmpegTransformExecutor::with_binary(&config.ffmpeg_binary)),
        Some(Box::new(StdoutPipelineLogger::new())),
        config.temp_dir.clone(),
    )
}

fn apply_edits(
    config: &StudioConfig,
    session: &mut StudioSession,
    edits: &TextEdits,
) -> Result<(), Box<dyn std::error::Error>> {
    // Vocabulary first: the other tools rewrite punctuation around words.
    if edits.fix_pronunciation {
        let vocabulary = PronunciationVocabulary::load(&config.vocabulary_path)?;
        log::info!("Loaded {} pronunciation entries", vocabulary.len());
        session.correct_pronunciation(&vocabulary);
    }
    if edits.liturgical_pause {
        session.apply_liturgical_pause();
    }
    if edits.newline_after_period {
        session.apply_newline_after_period();
    }
    Ok(())
}

fn read_text(input: &TextInput) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if let Some(text) = &input.text {
        return Ok(Some(text.clone()));
    }
    match &input.text_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read text file {}: {e}", path.display()))?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}
