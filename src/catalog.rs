//! Catalog of supported vocoders.
//!
//! The catalog is a closed enumeration rather than a runtime registry: every
//! supported vocoder is a [`Vocoder`] variant, so lookups are total and the
//! compiler checks that new variants are handled everywhere they matter
//! (expected filenames, source URLs, pipeline shape).

use crate::error::{ModelError, ModelResult};
use crate::locator::ModelRole;

/// A vocoder family supported by the pipeline assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocoder {
    /// HiFi-GAN, served by the legacy combined stage with a denoiser pass.
    HifiGan,
    /// Vocos, served by the split text-to-mel + mel-to-wave shape.
    Vocos,
    /// APNet2, served by the same split shape as Vocos.
    Apnet2,
}

/// How the mel-to-waveform conversion is organized for a vocoder family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// One combined stage owns text-to-mel, mel-to-wave and optional
    /// denoising.
    DirectVocoder,
    /// Two separate stages; the mel-to-wave stage refines the waveform
    /// itself, so no denoiser stage is ever constructed.
    VocosStyle,
}

/// Static behavior flags for one vocoder family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocoderDescriptor {
    /// Unique identifier used on the command line and in artifact names.
    pub identifier: &'static str,
    /// Whether a denoiser artifact is resolved and handed to the stage.
    pub uses_denoiser: bool,
    /// Which pipeline shape serves this family.
    pub stage_kind: StageKind,
}

impl Vocoder {
    /// Every registered vocoder, in presentation order.
    pub const ALL: [Vocoder; 3] = [Vocoder::HifiGan, Vocoder::Vocos, Vocoder::Apnet2];

    /// Behavior flags for this vocoder.
    pub fn descriptor(self) -> VocoderDescriptor {
        match self {
            Vocoder::HifiGan => VocoderDescriptor {
                identifier: "hifigan",
                uses_denoiser: true,
                stage_kind: StageKind::DirectVocoder,
            },
            Vocoder::Vocos => VocoderDescriptor {
                identifier: "vocos",
                uses_denoiser: false,
                stage_kind: StageKind::VocosStyle,
            },
            Vocoder::Apnet2 => VocoderDescriptor {
                identifier: "apnet2",
                uses_denoiser: false,
                stage_kind: StageKind::VocosStyle,
            },
        }
    }

    /// The unique identifier for this vocoder.
    pub fn identifier(self) -> &'static str {
        self.descriptor().identifier
    }

    /// Whether this family runs a denoiser after waveform synthesis.
    pub fn uses_denoiser(self) -> bool {
        self.descriptor().uses_denoiser
    }

    /// The pipeline shape serving this family.
    pub fn stage_kind(self) -> StageKind {
        self.descriptor().stage_kind
    }

    /// Look up a vocoder by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownVocoder`] when the identifier is not
    /// registered.
    pub fn parse(identifier: &str) -> ModelResult<Vocoder> {
        Vocoder::ALL
            .into_iter()
            .find(|v| v.identifier() == identifier)
            .ok_or_else(|| ModelError::UnknownVocoder(identifier.to_string()))
    }

    /// The artifact roles a pipeline for this vocoder needs resolved.
    pub fn required_roles(self) -> Vec<ModelRole> {
        let mut roles = vec![ModelRole::TextToMel, ModelRole::MelToWave];
        if self.uses_denoiser() {
            roles.push(ModelRole::Denoiser);
        }
        roles
    }
}

impl std::fmt::Display for Vocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl std::str::FromStr for Vocoder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vocoder::parse(s)
    }
}

/// Every registered vocoder identifier.
pub fn list_vocoders() -> Vec<&'static str> {
    Vocoder::ALL.into_iter().map(Vocoder::identifier).collect()
}
