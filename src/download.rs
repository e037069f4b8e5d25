//! Download collaborator invoked when a model artifact is absent locally.
//!
//! The locator only talks to a [`Downloader`]; the blocking HTTP
//! implementation lives here so tests can substitute counting or failing
//! downloaders without touching the network.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::BoxError;

/// Fetches a URL into a destination path.
///
/// Implementations own transport policy entirely: retries, timeouts and
/// cancellation (if any) happen behind this trait, never in the caller.
pub trait Downloader {
    /// Download `url` into `destination`, creating the file on success.
    fn download(&self, url: &str, destination: &Path) -> Result<(), BoxError>;
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn download(&self, url: &str, destination: &Path) -> Result<(), BoxError> {
        (**self).download(url, destination)
    }
}

/// Blocking HTTP(S) downloader.
///
/// Writes to a `.part` sibling first and renames into place, so an
/// interrupted transfer never leaves a truncated artifact at the expected
/// path.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<(), BoxError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(url, destination = %destination.display(), "downloading model artifact");

        let response = ureq::get(url).call()?;
        let mut data = Vec::new();
        response.into_reader().read_to_end(&mut data)?;

        let part_path = destination.with_extension("part");
        let mut file = fs::File::create(&part_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&part_path, destination)?;

        tracing::info!(destination = %destination.display(), bytes = data.len(), "download complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Downloader, HttpDownloader};

    #[test]
    fn http_downloader_rejects_unsupported_scheme() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("model.onnx");
        let err = HttpDownloader
            .download("ftp://example.com/model.onnx", &dest)
            .unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(!dest.exists());
    }

    #[test]
    fn failed_download_leaves_no_artifact_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("missing").join("model.onnx");
        let result = HttpDownloader.download("http://127.0.0.1:1/model.onnx", &dest);
        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
