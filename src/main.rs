//! Command-line interface for model resolution and pipeline assembly.
//!
//! The CLI wraps the core library to list the vocoder catalog, prefetch
//! model artifacts, and print the assembled pipeline plan for a vocoder.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tts_arabic::config::{default_storage_dir, load_config, resolve_relative_path, Config};
use tts_arabic::pipeline::PipelineStages;
use tts_arabic::{
    Acceleration, ArtifactLocator, HttpDownloader, ManifestBuilder, PipelineAssembler, Vocoder,
};

/// Acceleration preference as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum AccelerationChoice {
    /// Let the stage pick (GPU when available).
    Auto,
    /// Force CPU execution.
    Cpu,
    /// Force CUDA execution.
    Cuda,
}

impl From<AccelerationChoice> for Acceleration {
    fn from(choice: AccelerationChoice) -> Self {
        match choice {
            AccelerationChoice::Auto => Acceleration::Auto,
            AccelerationChoice::Cpu => Acceleration::Cpu,
            AccelerationChoice::Cuda => Acceleration::Cuda,
        }
    }
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "tts-arabic")]
#[command(about = "Model resolution and pipeline assembly for Arabic TTS", long_about = None)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Directory holding model artifacts.
    #[arg(long, global = true)]
    storage_root: Option<PathBuf>,
    /// Optional YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List available vocoders.
    Vocoders,
    /// Show catalog details for one vocoder.
    Describe {
        /// Vocoder identifier.
        vocoder: String,
    },
    /// Download every model artifact a vocoder needs.
    Download {
        /// Vocoder identifier.
        vocoder: String,
    },
    /// Resolve artifacts and print the assembled pipeline plan.
    Plan {
        /// Vocoder identifier.
        vocoder: String,
        /// Acceleration preference passed to every stage.
        #[arg(long, value_enum, default_value_t = AccelerationChoice::Auto)]
        acceleration: AccelerationChoice,
    },
}

/// Entry point for the CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let storage_root = storage_root(&cli, &config)?;

    match cli.command {
        Commands::Vocoders => {
            for vocoder in Vocoder::ALL {
                let descriptor = vocoder.descriptor();
                println!(
                    "{:<10} denoiser={:<5} shape={:?}",
                    descriptor.identifier, descriptor.uses_denoiser, descriptor.stage_kind,
                );
            }
        }
        Commands::Describe { vocoder } => {
            let vocoder = Vocoder::parse(&vocoder)?;
            let descriptor = vocoder.descriptor();
            println!("identifier:    {}", descriptor.identifier);
            println!("uses denoiser: {}", descriptor.uses_denoiser);
            println!("stage shape:   {:?}", descriptor.stage_kind);
            for role in vocoder.required_roles() {
                let path = tts_arabic::expected_path(&storage_root, role, vocoder);
                println!("{:<14} {}", format!("{role}:"), path.display());
            }
        }
        Commands::Download { vocoder } => {
            let vocoder = Vocoder::parse(&vocoder)?;
            let locator = ArtifactLocator::new(HttpDownloader);
            for role in vocoder.required_roles() {
                let path = locator.resolve(&storage_root, role, vocoder)?;
                println!("{:<14} {}", format!("{role}:"), path.display());
            }
        }
        Commands::Plan {
            vocoder,
            acceleration,
        } => {
            let assembler = PipelineAssembler::new(ManifestBuilder, HttpDownloader);
            let pipeline = assembler.build(&storage_root, &vocoder, acceleration.into())?;
            println!(
                "pipeline for {} ({} stage(s), acceleration {})",
                pipeline.vocoder,
                pipeline.stage_count(),
                pipeline.acceleration,
            );
            match &pipeline.stages {
                PipelineStages::Combined(stage) => println!("  {stage}"),
                PipelineStages::Split {
                    text_to_mel,
                    mel_to_wave,
                } => {
                    println!("  {text_to_mel}");
                    println!("  {mel_to_wave}");
                }
            }
        }
    }

    Ok(())
}

/// Pick the storage root: flag, then config file, then the default cache
/// directory.
fn storage_root(cli: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(root) = &cli.storage_root {
        return Ok(root.clone());
    }
    if let (Some(config_path), Some(root)) = (&cli.config, &config.storage_root) {
        return Ok(resolve_relative_path(config_path, root));
    }
    default_storage_dir()
}
