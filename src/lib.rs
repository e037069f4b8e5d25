//! # tts-arabic - Model resolution and pipeline assembly for Arabic TTS
//!
//! This crate decides which serialized model artifacts an Arabic
//! text-to-speech pipeline needs, where they live on disk (downloading them
//! when a source is registered), and which pipeline shape serves a given
//! vocoder family. The neural stages themselves are collaborators behind
//! the [`StageBuilder`] seam; nothing here runs inference.
//!
//! ## Architecture Overview
//!
//! Resolution and assembly is a three-step flow:
//!
//! 1. **Catalog** ([`Vocoder`]): a closed enumeration of supported vocoder
//!    families, each describing whether it uses a denoiser and which
//!    pipeline shape serves it.
//!
//! 2. **Locator** ([`ArtifactLocator`]): maps `(storage root, role,
//!    vocoder)` to a deterministic local path, fetching through a
//!    [`Downloader`] only when the file is absent and a source URL is
//!    registered.
//!
//! 3. **Assembler** ([`PipelineAssembler`]): resolves every required
//!    artifact and dispatches on the vocoder's [`StageKind`] to construct
//!    either one combined stage (the legacy HiFi-GAN shape) or two separate
//!    stages (the Vocos shape).
//!
//! ## Quick Start
//!
//! ```no_run
//! use tts_arabic::{Acceleration, HttpDownloader, ManifestBuilder, PipelineAssembler};
//!
//! let assembler = PipelineAssembler::new(ManifestBuilder, HttpDownloader);
//! let pipeline = assembler
//!     .build("/srv/models".as_ref(), "vocos", Acceleration::Auto)
//!     .unwrap();
//! println!("{} stage(s)", pipeline.stage_count());
//! ```
//!
//! ## Failure semantics
//!
//! Every failure is attributable ([`ModelError`]): an unknown identifier, a
//! missing artifact with no registered source (raised with zero download
//! attempts), a failed download, or a failed stage construction. There are
//! no retries and no silent fallbacks; a failed build returns no partial
//! pipeline.

// Public modules - these are part of the stable API
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod locator;
pub mod pipeline;

// Re-exports forming the public API
pub use catalog::{list_vocoders, StageKind, Vocoder, VocoderDescriptor};
pub use download::{Downloader, HttpDownloader};
pub use error::{BoxError, ModelError, ModelResult};
pub use locator::{expected_path, ArtifactLocator, ModelRole};
pub use pipeline::{
    Acceleration, ManifestBuilder, Pipeline, PipelineAssembler, PipelineStages, ResolvedPaths,
    StageBuilder, StageSpec,
};
