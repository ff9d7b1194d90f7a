use anyhow::{Context, Result};
use clap::Parser;
use semclip::cli::{Cli, Command, PlanArgs, SplitArgs, WindowArgs};
use semclip::config::AppConfig;
use semclip::pipeline::{run_split, SplitJob, TranscriptSource};
use semclip::subtitles::{read_srt_file, to_srt, window_transcript};
use semclip::transcription::TranscriptionOptions;
use semclip::video::FfmpegTools;
use semclip::select_split_points;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries plan/window output; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Split(args) => handle_split(&args),
        Command::Plan(args) => handle_plan(&args),
        Command::Window(args) => handle_window(&args),
    }
}

fn handle_split(args: &SplitArgs) -> Result<()> {
    args.validate()
        .context("Failed to validate command-line arguments")?;
    let config = args.split.resolve()?;

    let transcript = match &args.transcript {
        Some(path) => TranscriptSource::SrtFile(path.clone()),
        None => {
            let app = AppConfig::from_override(args.model.clone())?;
            TranscriptSource::Whisper(TranscriptionOptions {
                model_path: app.model_path,
                language: args.language.clone(),
            })
        }
    };

    info!(
        video = %args.video.display(),
        output = %args.output_dir.display(),
        clips = config.clip_count,
        "starting split"
    );
    let job = SplitJob {
        video: args.video.clone(),
        output_dir: args.output_dir.clone(),
        config,
        transcript,
        duration: args.duration()?,
        burn_in: !args.no_burn_in,
        dry_run: args.dry_run,
        tools: FfmpegTools {
            ffmpeg: args.ffmpeg.clone(),
            ffprobe: args.ffprobe.clone(),
        },
    };
    let manifest = run_split(&job)?;
    for clip in &manifest.clips {
        info!(
            clip = clip.index,
            start = clip.start,
            end = clip.end,
            status = ?clip.status,
            "clip"
        );
    }
    if manifest.failed_clips() > 0 {
        warn!(
            failed = manifest.failed_clips(),
            "some clips could not be produced; see clips.json"
        );
    }
    Ok(())
}

fn handle_plan(args: &PlanArgs) -> Result<()> {
    let config = args.split.resolve()?;
    let transcript = read_srt_file(&args.transcript)?;
    let total_duration = match args.duration()? {
        Some(seconds) => seconds,
        None => transcript.speech_end(),
    };

    let plan = select_split_points(&transcript, total_duration, &config)
        .context("Failed to select split points")?;
    if plan.is_degenerate() {
        warn!(
            warning = ?plan.warning,
            "too few natural break points; some boundaries were forced by length"
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
    );
    Ok(())
}

fn handle_window(args: &WindowArgs) -> Result<()> {
    let (start, end) = args.range()?;
    let transcript = read_srt_file(&args.transcript)?;
    let windowed = window_transcript(&transcript, start, end);
    if windowed.is_empty() {
        warn!(start, end, "no subtitles start inside the window");
    }
    print!("{}", to_srt(&windowed));
    Ok(())
}
