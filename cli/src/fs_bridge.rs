use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use hola_core::{CaptureOptions, CaptureResult, MediaBridge, PermissionStatus, SaveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DeniedPermission {
    Camera,
    LibraryRead,
    LibraryWrite,
}

/// Media capability backed by plain files: the "camera" hands back a fixed
/// photo, the "library" is a directory.
#[derive(Clone)]
pub struct FsMediaBridge {
    inner: Arc<Inner>,
}

struct Inner {
    captures_dir: PathBuf,
    library_dir: PathBuf,
    camera_photo: Option<PathBuf>,
    denied: Vec<DeniedPermission>,
    next_pick: Mutex<Option<PathBuf>>,
}

impl FsMediaBridge {
    pub fn new(
        captures_dir: PathBuf,
        library_dir: PathBuf,
        camera_photo: Option<PathBuf>,
        denied: Vec<DeniedPermission>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                captures_dir,
                library_dir,
                camera_photo,
                denied,
                next_pick: Mutex::new(None),
            }),
        }
    }

    /// File the next library pick returns; `None` behaves like a dismissed picker.
    pub fn queue_pick(&self, path: Option<PathBuf>) {
        *lock_pick(&self.inner.next_pick) = path;
    }

    fn permission(&self, which: DeniedPermission) -> PermissionStatus {
        if self.inner.denied.contains(&which) {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        }
    }

    fn import(&self, src: &Path) -> anyhow::Result<String> {
        std::fs::create_dir_all(&self.inner.captures_dir)
            .with_context(|| format!("create {}", self.inner.captures_dir.display()))?;
        let ext = src
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_ascii_lowercase();
        let dest = self
            .inner
            .captures_dir
            .join(format!("{}.{ext}", uuid::Uuid::new_v4()));
        std::fs::copy(src, &dest)
            .with_context(|| format!("copy {} -> {}", src.display(), dest.display()))?;
        Ok(dest.to_string_lossy().to_string())
    }

    fn save(&self, uri: &str) -> anyhow::Result<PathBuf> {
        let src = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        let name = src
            .file_name()
            .with_context(|| format!("no file name in {uri}"))?;
        std::fs::create_dir_all(&self.inner.library_dir)
            .with_context(|| format!("create {}", self.inner.library_dir.display()))?;
        let dest = self.inner.library_dir.join(name);
        std::fs::copy(src, &dest)
            .with_context(|| format!("copy {} -> {}", src.display(), dest.display()))?;
        Ok(dest)
    }

    fn captured(&self, src: &Path) -> CaptureResult {
        match self.import(src) {
            Ok(uri) => CaptureResult::Captured { uri },
            Err(e) => CaptureResult::Failed {
                message: format!("{e:#}"),
            },
        }
    }
}

impl MediaBridge for FsMediaBridge {
    fn request_camera_access(&self) -> PermissionStatus {
        self.permission(DeniedPermission::Camera)
    }

    fn capture_photo(&self, options: CaptureOptions) -> CaptureResult {
        tracing::debug!(
            quality = options.quality,
            allows_editing = options.allows_editing,
            "capture"
        );
        match &self.inner.camera_photo {
            Some(photo) => self.captured(photo),
            None => CaptureResult::Failed {
                message: "no camera photo configured (pass --photo)".to_string(),
            },
        }
    }

    fn request_library_read_access(&self) -> PermissionStatus {
        self.permission(DeniedPermission::LibraryRead)
    }

    fn pick_from_library(&self, _options: CaptureOptions) -> CaptureResult {
        let picked = lock_pick(&self.inner.next_pick).take();
        match picked {
            Some(path) => self.captured(&path),
            None => CaptureResult::Cancelled,
        }
    }

    fn request_library_write_access(&self) -> PermissionStatus {
        self.permission(DeniedPermission::LibraryWrite)
    }

    fn save_asset(&self, uri: String) -> SaveResult {
        match self.save(&uri) {
            Ok(dest) => {
                tracing::info!(dest = %dest.display(), "saved to library");
                SaveResult::Saved
            }
            Err(e) => SaveResult::Failed {
                message: format!("{e:#}"),
            },
        }
    }
}

fn lock_pick(lock: &Mutex<Option<PathBuf>>) -> MutexGuard<'_, Option<PathBuf>> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}
