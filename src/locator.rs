//! Locating model artifacts on disk, downloading them when a source exists.
//!
//! Every artifact lives at a path that is a pure function of the storage
//! root, its [`ModelRole`] and the vocoder it serves. Resolution never
//! overwrites an existing file and never touches the network unless the file
//! is absent *and* a source URL is registered for it.

use std::path::{Path, PathBuf};

use crate::catalog::Vocoder;
use crate::download::Downloader;
use crate::error::{ModelError, ModelResult};

/// The logical role a model artifact plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelRole {
    /// Text-to-mel acoustic model (FastPitch, multispeaker).
    TextToMel,
    /// Mel-to-waveform vocoder model.
    MelToWave,
    /// Optional waveform denoiser.
    Denoiser,
}

impl ModelRole {
    /// Human-readable role name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelRole::TextToMel => "text-to-mel",
            ModelRole::MelToWave => "mel-to-wave",
            ModelRole::Denoiser => "denoiser",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered download sources, one URL per hosted artifact.
///
/// APNet2 weights are not mirrored yet, so that role/vocoder pair has no
/// entry and resolution of a missing local file is terminal.
mod sources {
    pub const FASTPITCH_MS: &str =
        "https://huggingface.co/tts-arabic/models/resolve/main/fastpitch_ms.onnx";
    pub const HIFIGAN: &str =
        "https://huggingface.co/tts-arabic/models/resolve/main/hifigan.onnx";
    pub const VOCOS: &str = "https://huggingface.co/tts-arabic/models/resolve/main/vocos.onnx";
    pub const DENOISER: &str =
        "https://huggingface.co/tts-arabic/models/resolve/main/denoiser.onnx";
}

/// Expected local file name for an artifact.
fn artifact_file_name(role: ModelRole, vocoder: Vocoder) -> String {
    match role {
        ModelRole::TextToMel => "fastpitch_ms.onnx".to_string(),
        ModelRole::MelToWave => format!("{}.onnx", vocoder.identifier()),
        ModelRole::Denoiser => "denoiser.onnx".to_string(),
    }
}

/// Deterministic local path for an artifact under `storage_root`.
pub fn expected_path(storage_root: &Path, role: ModelRole, vocoder: Vocoder) -> PathBuf {
    storage_root.join(artifact_file_name(role, vocoder))
}

/// Registered source URL for an artifact, if any.
fn source_url(role: ModelRole, vocoder: Vocoder) -> Option<&'static str> {
    match (role, vocoder) {
        (ModelRole::TextToMel, _) => Some(sources::FASTPITCH_MS),
        (ModelRole::MelToWave, Vocoder::HifiGan) => Some(sources::HIFIGAN),
        (ModelRole::MelToWave, Vocoder::Vocos) => Some(sources::VOCOS),
        (ModelRole::MelToWave, Vocoder::Apnet2) => None,
        (ModelRole::Denoiser, _) => Some(sources::DENOISER),
    }
}

/// Resolves artifacts to local paths, downloading through a [`Downloader`]
/// when needed.
#[derive(Debug)]
pub struct ArtifactLocator<D> {
    downloader: D,
}

impl<D: Downloader> ArtifactLocator<D> {
    /// Create a locator that fetches missing artifacts through `downloader`.
    pub fn new(downloader: D) -> Self {
        Self { downloader }
    }

    /// Resolve one artifact to a local path.
    ///
    /// An existing file short-circuits with zero downloader calls. A missing
    /// file with no registered source fails with
    /// [`ModelError::ArtifactNotFound`], also with zero downloader calls.
    /// Otherwise the downloader fetches into the expected path exactly once;
    /// its failure propagates as [`ModelError::Download`] with the transport
    /// error as the cause.
    pub fn resolve(
        &self,
        storage_root: &Path,
        role: ModelRole,
        vocoder: Vocoder,
    ) -> ModelResult<PathBuf> {
        let path = expected_path(storage_root, role, vocoder);
        if path.exists() {
            tracing::debug!(role = %role, path = %path.display(), "artifact already present");
            return Ok(path);
        }

        let Some(url) = source_url(role, vocoder) else {
            return Err(ModelError::ArtifactNotFound { role, path });
        };

        self.downloader
            .download(url, &path)
            .map_err(|source| ModelError::Download {
                role,
                url: url.to_string(),
                source,
            })?;
        Ok(path)
    }
}
