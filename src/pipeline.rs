//! Pipeline assembly: resolving artifacts and wiring them into stages.
//!
//! The assembler resolves every artifact a vocoder needs, then hands the
//! paths to the vocoder's [`StageKind`], which knows whether the pipeline is
//! one combined stage (the legacy HiFi-GAN shape) or two separate stages
//! (the Vocos shape). Stage construction itself happens behind the
//! [`StageBuilder`] seam; this crate only decides *which* constructors run
//! with *which* paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{StageKind, Vocoder};
use crate::download::Downloader;
use crate::error::{BoxError, ModelError, ModelResult};
use crate::locator::{ArtifactLocator, ModelRole};

/// Acceleration preference, passed through to stage constructors unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acceleration {
    /// Let the stage pick (GPU when available).
    #[default]
    Auto,
    /// Force CPU execution.
    Cpu,
    /// Force CUDA execution.
    Cuda,
}

impl std::fmt::Display for Acceleration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Acceleration::Auto => "auto",
            Acceleration::Cpu => "cpu",
            Acceleration::Cuda => "cuda",
        })
    }
}

/// Constructs pipeline stages from resolved artifact paths.
///
/// Implemented by the inference runtime; this crate ships
/// [`ManifestBuilder`] for planning and dry runs, and tests use counting
/// builders to pin down exactly which constructors run.
pub trait StageBuilder {
    /// The stage handle this builder produces.
    type Stage;

    /// Construct a text-to-mel stage.
    fn text_to_mel(&self, path: &Path, acceleration: Acceleration)
        -> Result<Self::Stage, BoxError>;

    /// Construct a standalone mel-to-waveform stage.
    fn mel_to_wave(&self, path: &Path, acceleration: Acceleration)
        -> Result<Self::Stage, BoxError>;

    /// Construct the legacy combined stage owning both conversions plus
    /// optional denoising.
    fn combined(
        &self,
        text_to_mel: &Path,
        mel_to_wave: &Path,
        denoiser: Option<&Path>,
        vocoder: Vocoder,
        acceleration: Acceleration,
    ) -> Result<Self::Stage, BoxError>;
}

/// Local paths for every artifact a build resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Text-to-mel model path, always present.
    pub text_to_mel: PathBuf,
    /// Mel-to-waveform model path, always present.
    pub mel_to_wave: PathBuf,
    /// Denoiser model path, resolved only for denoiser-capable vocoders.
    pub denoiser: Option<PathBuf>,
}

/// The stage objects a pipeline holds, one variant per [`StageKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStages<S> {
    /// One combined stage owning text-to-mel, mel-to-wave and optional
    /// denoising.
    Combined(S),
    /// Separate text-to-mel and mel-to-waveform stages, never a denoiser.
    Split { text_to_mel: S, mel_to_wave: S },
}

/// An assembled, runnable pipeline. Owned exclusively by the caller; no
/// state is shared between pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<S> {
    /// The vocoder family this pipeline serves.
    pub vocoder: Vocoder,
    /// Acceleration preference handed to every stage constructor.
    pub acceleration: Acceleration,
    /// The constructed stage objects.
    pub stages: PipelineStages<S>,
}

impl<S> Pipeline<S> {
    /// Number of stage objects this pipeline holds.
    pub fn stage_count(&self) -> usize {
        match &self.stages {
            PipelineStages::Combined(_) => 1,
            PipelineStages::Split { .. } => 2,
        }
    }
}

impl StageKind {
    /// Construct the stages for this shape from resolved paths.
    ///
    /// `DirectVocoder` makes exactly one [`StageBuilder::combined`] call;
    /// the denoiser argument is `None` whenever no denoiser was resolved.
    /// `VocosStyle` makes exactly one [`StageBuilder::text_to_mel`] and one
    /// [`StageBuilder::mel_to_wave`] call, and ignores any resolved denoiser
    /// path: that family's mel-to-wave stage refines the waveform itself.
    pub fn assemble<B: StageBuilder>(
        self,
        builder: &B,
        paths: &ResolvedPaths,
        vocoder: Vocoder,
        acceleration: Acceleration,
    ) -> ModelResult<Pipeline<B::Stage>> {
        let stages = match self {
            StageKind::DirectVocoder => {
                let stage = builder
                    .combined(
                        &paths.text_to_mel,
                        &paths.mel_to_wave,
                        paths.denoiser.as_deref(),
                        vocoder,
                        acceleration,
                    )
                    .map_err(|source| ModelError::Stage {
                        kind: "combined vocoder",
                        source,
                    })?;
                PipelineStages::Combined(stage)
            }
            StageKind::VocosStyle => {
                let text_to_mel = builder
                    .text_to_mel(&paths.text_to_mel, acceleration)
                    .map_err(|source| ModelError::Stage {
                        kind: "text-to-mel",
                        source,
                    })?;
                let mel_to_wave = builder
                    .mel_to_wave(&paths.mel_to_wave, acceleration)
                    .map_err(|source| ModelError::Stage {
                        kind: "mel-to-wave",
                        source,
                    })?;
                PipelineStages::Split {
                    text_to_mel,
                    mel_to_wave,
                }
            }
        };
        Ok(Pipeline {
            vocoder,
            acceleration,
            stages,
        })
    }
}

/// Stage description produced by [`ManifestBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageSpec {
    /// Planned text-to-mel stage.
    TextToMel {
        path: PathBuf,
        acceleration: Acceleration,
    },
    /// Planned standalone mel-to-waveform stage.
    MelToWave {
        path: PathBuf,
        acceleration: Acceleration,
    },
    /// Planned legacy combined stage.
    Combined {
        text_to_mel: PathBuf,
        mel_to_wave: PathBuf,
        denoiser: Option<PathBuf>,
        vocoder: Vocoder,
        acceleration: Acceleration,
    },
}

impl std::fmt::Display for StageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageSpec::TextToMel { path, acceleration } => {
                write!(f, "text-to-mel      {} [{acceleration}]", path.display())
            }
            StageSpec::MelToWave { path, acceleration } => {
                write!(f, "mel-to-wave      {} [{acceleration}]", path.display())
            }
            StageSpec::Combined {
                text_to_mel,
                mel_to_wave,
                denoiser,
                vocoder,
                acceleration,
            } => {
                write!(
                    f,
                    "combined ({vocoder}) {} + {} [{acceleration}]",
                    text_to_mel.display(),
                    mel_to_wave.display(),
                )?;
                if let Some(denoiser) = denoiser {
                    write!(f, " + denoiser {}", denoiser.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Stage builder that verifies each artifact file and records what the
/// inference runtime will load, without loading anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestBuilder;

impl ManifestBuilder {
    fn verify(path: &Path) -> Result<(), BoxError> {
        let metadata =
            fs::metadata(path).map_err(|err| format!("{}: {err}", path.display()))?;
        if !metadata.is_file() {
            return Err(format!("{} is not a regular file", path.display()).into());
        }
        Ok(())
    }
}

impl StageBuilder for ManifestBuilder {
    type Stage = StageSpec;

    fn text_to_mel(
        &self,
        path: &Path,
        acceleration: Acceleration,
    ) -> Result<StageSpec, BoxError> {
        Self::verify(path)?;
        Ok(StageSpec::TextToMel {
            path: path.to_path_buf(),
            acceleration,
        })
    }

    fn mel_to_wave(
        &self,
        path: &Path,
        acceleration: Acceleration,
    ) -> Result<StageSpec, BoxError> {
        Self::verify(path)?;
        Ok(StageSpec::MelToWave {
            path: path.to_path_buf(),
            acceleration,
        })
    }

    fn combined(
        &self,
        text_to_mel: &Path,
        mel_to_wave: &Path,
        denoiser: Option<&Path>,
        vocoder: Vocoder,
        acceleration: Acceleration,
    ) -> Result<StageSpec, BoxError> {
        Self::verify(text_to_mel)?;
        Self::verify(mel_to_wave)?;
        if let Some(denoiser) = denoiser {
            Self::verify(denoiser)?;
        }
        Ok(StageSpec::Combined {
            text_to_mel: text_to_mel.to_path_buf(),
            mel_to_wave: mel_to_wave.to_path_buf(),
            denoiser: denoiser.map(Path::to_path_buf),
            vocoder,
            acceleration,
        })
    }
}

/// Orchestrates artifact resolution and stage construction for one vocoder.
///
/// Stateless between calls: each [`build`](PipelineAssembler::build) is
/// independent, and a failure anywhere aborts the whole build with no
/// partial pipeline.
#[derive(Debug)]
pub struct PipelineAssembler<B, D> {
    builder: B,
    locator: ArtifactLocator<D>,
}

impl<B: StageBuilder, D: Downloader> PipelineAssembler<B, D> {
    /// Create an assembler from a stage builder and a downloader.
    pub fn new(builder: B, downloader: D) -> Self {
        Self {
            builder,
            locator: ArtifactLocator::new(downloader),
        }
    }

    /// Resolve artifacts for `vocoder_id` under `storage_root` and assemble
    /// the pipeline.
    ///
    /// The denoiser artifact is not even requested for vocoders that do not
    /// use one.
    pub fn build(
        &self,
        storage_root: &Path,
        vocoder_id: &str,
        acceleration: Acceleration,
    ) -> ModelResult<Pipeline<B::Stage>> {
        let vocoder = Vocoder::parse(vocoder_id)?;
        let descriptor = vocoder.descriptor();

        let text_to_mel = self
            .locator
            .resolve(storage_root, ModelRole::TextToMel, vocoder)?;
        let mel_to_wave = self
            .locator
            .resolve(storage_root, ModelRole::MelToWave, vocoder)?;
        let denoiser = if descriptor.uses_denoiser {
            Some(
                self.locator
                    .resolve(storage_root, ModelRole::Denoiser, vocoder)?,
            )
        } else {
            None
        };

        let paths = ResolvedPaths {
            text_to_mel,
            mel_to_wave,
            denoiser,
        };
        tracing::debug!(
            vocoder = vocoder.identifier(),
            acceleration = %acceleration,
            stage_kind = ?descriptor.stage_kind,
            "assembling pipeline"
        );
        descriptor
            .stage_kind
            .assemble(&self.builder, &paths, vocoder, acceleration)
    }
}
