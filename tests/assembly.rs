//! End-to-end assembly scenarios against a temporary storage root.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use tts_arabic::{
    expected_path, Acceleration, BoxError, Downloader, ManifestBuilder, ModelError, ModelRole,
    PipelineAssembler, PipelineStages, StageSpec, Vocoder,
};

/// Downloader that fails the test if it is ever invoked.
struct NoDownloads;

impl Downloader for NoDownloads {
    fn download(&self, url: &str, _destination: &Path) -> Result<(), BoxError> {
        panic!("unexpected download of {url}");
    }
}

/// Downloader that counts calls and writes a placeholder artifact.
#[derive(Default)]
struct CountingDownloader {
    calls: Cell<usize>,
}

impl Downloader for CountingDownloader {
    fn download(&self, _url: &str, destination: &Path) -> Result<(), BoxError> {
        self.calls.set(self.calls.get() + 1);
        fs::write(destination, b"weights")?;
        Ok(())
    }
}

/// Downloader that fails every call.
struct FailingDownloader;

impl Downloader for FailingDownloader {
    fn download(&self, _url: &str, _destination: &Path) -> Result<(), BoxError> {
        Err("tls handshake failed".into())
    }
}

fn seed(root: &Path, role: ModelRole, vocoder: Vocoder) {
    fs::write(expected_path(root, role, vocoder), b"onnx").expect("seed artifact");
}

#[test]
fn vocos_build_uses_local_files_and_two_stages() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed(dir.path(), ModelRole::TextToMel, Vocoder::Vocos);
    seed(dir.path(), ModelRole::MelToWave, Vocoder::Vocos);

    let assembler = PipelineAssembler::new(ManifestBuilder, NoDownloads);
    let pipeline = assembler
        .build(dir.path(), "vocos", Acceleration::Auto)
        .expect("build vocos pipeline");

    assert_eq!(pipeline.vocoder, Vocoder::Vocos);
    assert_eq!(pipeline.acceleration, Acceleration::Auto);
    assert_eq!(pipeline.stage_count(), 2);
    match &pipeline.stages {
        PipelineStages::Split {
            text_to_mel,
            mel_to_wave,
        } => {
            assert_eq!(
                *text_to_mel,
                StageSpec::TextToMel {
                    path: dir.path().join("fastpitch_ms.onnx"),
                    acceleration: Acceleration::Auto,
                },
            );
            assert_eq!(
                *mel_to_wave,
                StageSpec::MelToWave {
                    path: dir.path().join("vocos.onnx"),
                    acceleration: Acceleration::Auto,
                },
            );
        }
        other => panic!("expected split pipeline, got {other:?}"),
    }
}

#[test]
fn vocos_style_build_ignores_a_denoiser_present_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed(dir.path(), ModelRole::TextToMel, Vocoder::Apnet2);
    seed(dir.path(), ModelRole::MelToWave, Vocoder::Apnet2);
    seed(dir.path(), ModelRole::Denoiser, Vocoder::Apnet2);

    let assembler = PipelineAssembler::new(ManifestBuilder, NoDownloads);
    let pipeline = assembler
        .build(dir.path(), "apnet2", Acceleration::Cpu)
        .expect("build apnet2 pipeline");

    // Two stages, no denoiser anywhere, even though denoiser.onnx exists.
    assert_eq!(pipeline.stage_count(), 2);
    assert!(matches!(pipeline.stages, PipelineStages::Split { .. }));
}

#[test]
fn hifigan_build_resolves_three_artifacts_into_one_combined_stage() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed(dir.path(), ModelRole::TextToMel, Vocoder::HifiGan);
    seed(dir.path(), ModelRole::MelToWave, Vocoder::HifiGan);
    seed(dir.path(), ModelRole::Denoiser, Vocoder::HifiGan);

    let assembler = PipelineAssembler::new(ManifestBuilder, NoDownloads);
    let pipeline = assembler
        .build(dir.path(), "hifigan", Acceleration::Cuda)
        .expect("build hifigan pipeline");

    assert_eq!(pipeline.stage_count(), 1);
    match &pipeline.stages {
        PipelineStages::Combined(stage) => {
            assert_eq!(
                *stage,
                StageSpec::Combined {
                    text_to_mel: dir.path().join("fastpitch_ms.onnx"),
                    mel_to_wave: dir.path().join("hifigan.onnx"),
                    denoiser: Some(dir.path().join("denoiser.onnx")),
                    vocoder: Vocoder::HifiGan,
                    acceleration: Acceleration::Cuda,
                },
            );
        }
        other => panic!("expected combined pipeline, got {other:?}"),
    }
}

#[test]
fn apnet2_without_local_weights_fails_without_downloading() {
    let dir = tempfile::tempdir().expect("tempdir");
    // The shared text-to-mel model is present; only the apnet2 weights are
    // missing, and they have no registered source.
    seed(dir.path(), ModelRole::TextToMel, Vocoder::Apnet2);

    let assembler = PipelineAssembler::new(ManifestBuilder, NoDownloads);
    let err = assembler
        .build(dir.path(), "apnet2", Acceleration::Auto)
        .unwrap_err();

    match err {
        ModelError::ArtifactNotFound { role, path } => {
            assert_eq!(role, ModelRole::MelToWave);
            assert_eq!(path, dir.path().join("apnet2.onnx"));
        }
        other => panic!("expected ArtifactNotFound, got {other:?}"),
    }
}

#[test]
fn unknown_vocoder_fails_before_any_resolution() {
    let dir = tempfile::tempdir().expect("tempdir");
    let assembler = PipelineAssembler::new(ManifestBuilder, NoDownloads);
    let err = assembler
        .build(dir.path(), "waveglow", Acceleration::Auto)
        .unwrap_err();
    assert!(matches!(err, ModelError::UnknownVocoder(id) if id == "waveglow"));
}

#[test]
fn download_failure_aborts_the_build_with_the_transport_cause() {
    let dir = tempfile::tempdir().expect("tempdir");
    let assembler = PipelineAssembler::new(ManifestBuilder, FailingDownloader);
    let err = assembler
        .build(dir.path(), "hifigan", Acceleration::Auto)
        .unwrap_err();

    match &err {
        ModelError::Download { role, source, .. } => {
            assert_eq!(*role, ModelRole::TextToMel);
            assert_eq!(source.to_string(), "tls handshake failed");
        }
        other => panic!("expected Download error, got {other:?}"),
    }
}

#[test]
fn missing_artifacts_are_fetched_once_and_reused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = CountingDownloader::default();
    let assembler = PipelineAssembler::new(ManifestBuilder, &downloader);

    assembler
        .build(dir.path(), "hifigan", Acceleration::Auto)
        .expect("first build downloads");
    assert_eq!(downloader.calls.get(), 3);

    assembler
        .build(dir.path(), "hifigan", Acceleration::Auto)
        .expect("second build reuses files");
    assert_eq!(downloader.calls.get(), 3);
}

#[test]
fn vocos_build_downloads_only_the_two_required_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = CountingDownloader::default();
    let assembler = PipelineAssembler::new(ManifestBuilder, &downloader);

    assembler
        .build(dir.path(), "vocos", Acceleration::Auto)
        .expect("build vocos pipeline");

    // No denoiser request at all for a no-denoiser vocoder.
    assert_eq!(downloader.calls.get(), 2);
    assert!(!dir.path().join("denoiser.onnx").exists());
}
