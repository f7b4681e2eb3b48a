use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractionErrorKind;
use crate::types::{ExtractionMode, MAX_RESOLUTION, MIN_RESOLUTION, ThumbnailRequest};

/// Boundary to the thumbnail-extraction collaborator.
///
/// `initialize` must succeed once before any `extract` call; `shutdown` is
/// called once after the batch completes. `extract` is invoked from many
/// worker threads at once, so implementations must tolerate concurrent calls.
/// Backends that cannot promise that are wrapped in [`SerializedProvider`].
pub trait ThumbnailProvider: Send + Sync {
    fn initialize(&self) -> Result<(), ExtractionErrorKind>;

    /// Produces (and caches, as the collaborator sees fit) a thumbnail for
    /// `request.path` at approximately `request.resolution`.
    fn extract(&self, request: &ThumbnailRequest) -> Result<(), ExtractionErrorKind>;

    fn shutdown(&self);
}

/// Serializes every call into a provider whose backend does not tolerate
/// concurrent invocation. This is the explicit shared-resource policy for
/// such collaborators: the coordinator itself never assumes more than the
/// trait contract states.
pub struct SerializedProvider<P> {
    inner: Mutex<P>,
}

impl<P> SerializedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }
}

impl<P: ThumbnailProvider> ThumbnailProvider for SerializedProvider<P> {
    fn initialize(&self) -> Result<(), ExtractionErrorKind> {
        self.inner.lock().initialize()
    }

    fn extract(&self, request: &ThumbnailRequest) -> Result<(), ExtractionErrorKind> {
        self.inner.lock().extract(request)
    }

    fn shutdown(&self) {
        self.inner.lock().shutdown();
    }
}

/// Default provider: decodes the source with the `image` crate, renders an
/// aspect-preserving thumbnail and stores it as PNG in a cache directory
/// keyed by the SHA-256 of the resolved source path.
pub struct ImageProvider {
    cache_dir: PathBuf,
}

impl ImageProvider {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_path(&self, source: &Path) -> PathBuf {
        let digest = Sha256::digest(source.as_os_str().as_encoded_bytes());
        self.cache_dir.join(format!("{}.png", hex::encode(digest)))
    }
}

impl ThumbnailProvider for ImageProvider {
    fn initialize(&self) -> Result<(), ExtractionErrorKind> {
        fs::create_dir_all(&self.cache_dir).map_err(|e| {
            ExtractionErrorKind::InitializationFailed(format!(
                "cannot create cache directory {}: {e}",
                self.cache_dir.display()
            ))
        })
    }

    fn extract(&self, request: &ThumbnailRequest) -> Result<(), ExtractionErrorKind> {
        if request.resolution < MIN_RESOLUTION || request.resolution > MAX_RESOLUTION {
            return Err(ExtractionErrorKind::InvalidArgument(format!(
                "resolution {} outside [{MIN_RESOLUTION}, {MAX_RESOLUTION}]",
                request.resolution
            )));
        }

        let source = request.path.canonicalize().map_err(|e| {
            ExtractionErrorKind::PathResolutionFailed(format!(
                "{}: {e}",
                request.path.display()
            ))
        })?;

        let cache_path = self.cache_path(&source);
        if request.mode == ExtractionMode::Default && cache_path.exists() {
            return Ok(());
        }

        let decoded = image::open(&source).map_err(|e| classify_decode_error(&source, e))?;
        let thumbnail = decoded.thumbnail(request.resolution, request.resolution);

        thumbnail.save(&cache_path).map_err(|e| {
            ExtractionErrorKind::ResourceUnavailable(format!(
                "cannot write {}: {e}",
                cache_path.display()
            ))
        })
    }

    fn shutdown(&self) {}
}

fn classify_decode_error(source: &Path, error: image::ImageError) -> ExtractionErrorKind {
    match error {
        image::ImageError::IoError(e) => {
            ExtractionErrorKind::ResourceUnavailable(format!("{}: {e}", source.display()))
        }
        // Unsupported or undecodable content is the expected case for
        // arbitrary directory entries; the file simply gets no thumbnail.
        other => {
            ExtractionErrorKind::ExtractionFailedNonFatal(format!("{}: {other}", source.display()))
        }
    }
}
