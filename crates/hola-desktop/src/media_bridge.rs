use std::path::{Path, PathBuf};

use anyhow::Context;
use hola_core::{CaptureOptions, CaptureResult, MediaBridge, PermissionStatus, SaveResult};

const PICK_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Desktop media capability: the first webcam for photos, a native file
/// dialog for the library, and a plain directory to save into.
pub struct DesktopMediaBridge {
    captures_dir: PathBuf,
    library_dir: PathBuf,
}

impl DesktopMediaBridge {
    pub fn new(captures_dir: PathBuf, library_dir: PathBuf) -> Self {
        Self {
            captures_dir,
            library_dir,
        }
    }
}

impl MediaBridge for DesktopMediaBridge {
    fn request_camera_access(&self) -> PermissionStatus {
        match nokhwa::query(nokhwa::utils::ApiBackend::Auto) {
            Ok(cameras) if !cameras.is_empty() => PermissionStatus::Granted,
            Ok(_) => {
                tracing::warn!("no camera found");
                PermissionStatus::Denied
            }
            Err(e) => {
                tracing::warn!(%e, "camera query failed");
                PermissionStatus::Denied
            }
        }
    }

    fn capture_photo(&self, options: CaptureOptions) -> CaptureResult {
        match grab_frame(&self.captures_dir, options.quality) {
            Ok(path) => CaptureResult::Captured {
                uri: path.to_string_lossy().to_string(),
            },
            Err(e) => CaptureResult::Failed {
                message: format!("{e:#}"),
            },
        }
    }

    fn request_library_read_access(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    fn pick_from_library(&self, _options: CaptureOptions) -> CaptureResult {
        // Called off the main thread; the async dialog schedules itself onto
        // the UI thread where macOS requires it.
        let picked = futures::executor::block_on(
            rfd::AsyncFileDialog::new()
                .set_title("Choose a photo")
                .add_filter("Images", PICK_EXTENSIONS)
                .pick_file(),
        );
        pick_result(picked.map(|handle| handle.path().to_path_buf()))
    }

    fn request_library_write_access(&self) -> PermissionStatus {
        match std::fs::create_dir_all(&self.library_dir) {
            Ok(()) => PermissionStatus::Granted,
            Err(e) => {
                tracing::warn!(%e, dir = %self.library_dir.display(), "library dir not writable");
                PermissionStatus::Denied
            }
        }
    }

    fn save_asset(&self, uri: String) -> SaveResult {
        match copy_into_library(&self.library_dir, &uri) {
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

fn grab_frame(dir: &Path, quality: f32) -> anyhow::Result<PathBuf> {
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

    let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
    let mut camera =
        nokhwa::Camera::new(CameraIndex::Index(0), format).context("open camera")?;
    camera.open_stream().context("start camera stream")?;
    let frame = camera.frame().context("read camera frame");
    if let Err(e) = camera.stop_stream() {
        tracing::debug!(%e, "stop camera stream");
    }
    let decoded = frame?
        .decode_image::<RgbFormat>()
        .context("decode camera frame")?;

    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(format!("{}.jpg", uuid::Uuid::new_v4()));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
        std::io::BufWriter::new(file),
        jpeg_quality(quality),
    );
    encoder
        .encode(
            decoded.as_raw(),
            decoded.width(),
            decoded.height(),
            image::ColorType::Rgb8,
        )
        .context("encode jpeg")?;
    Ok(path)
}

fn pick_result(picked: Option<PathBuf>) -> CaptureResult {
    match picked {
        Some(path) => CaptureResult::Captured {
            uri: path.to_string_lossy().to_string(),
        },
        None => CaptureResult::Cancelled,
    }
}

/// Maps the 0..=1 capture quality onto JPEG's 1..=100.
fn jpeg_quality(quality: f32) -> u8 {
    let q = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        1.0
    };
    (q * 100.0).round().max(1.0) as u8
}

fn copy_into_library(library_dir: &Path, uri: &str) -> anyhow::Result<PathBuf> {
    let src = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
    let name = src
        .file_name()
        .with_context(|| format!("no file name in {uri}"))?;
    std::fs::create_dir_all(library_dir)
        .with_context(|| format!("create {}", library_dir.display()))?;

    let mut dest = library_dir.join(name);
    if dest.exists() {
        let stem = src.file_stem().and_then(|s| s.to_str()).unwrap_or("photo");
        let ext = src.extension().and_then(|e| e.to_str()).unwrap_or("jpg");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        dest = library_dir.join(format!("{stem}-{}.{ext}", &suffix[..8]));
    }
    std::fs::copy(src, &dest)
        .with_context(|| format!("copy {} -> {}", src.display(), dest.display()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_maps_onto_jpeg_scale() {
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(0.8), 80);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(7.0), 100);
        assert_eq!(jpeg_quality(f32::NAN), 100);
    }

    #[test]
    fn dismissed_dialog_is_a_cancel() {
        assert_eq!(pick_result(None), CaptureResult::Cancelled);
        assert_eq!(
            pick_result(Some(PathBuf::from("/photos/cat.png"))),
            CaptureResult::Captured {
                uri: "/photos/cat.png".into()
            }
        );
    }

    #[test]
    fn save_does_not_overwrite_existing_library_files() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("library");
        let src = dir.path().join("shot.jpg");
        std::fs::write(&src, b"first").unwrap();

        let first = copy_into_library(&library, &format!("file://{}", src.display())).unwrap();
        assert_eq!(first, library.join("shot.jpg"));

        std::fs::write(&src, b"second").unwrap();
        let second = copy_into_library(&library, &src.to_string_lossy()).unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn write_access_creates_the_library_dir() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("Pictures").join("Hola");
        let bridge = DesktopMediaBridge::new(dir.path().join("captures"), library.clone());

        assert_eq!(
            bridge.request_library_write_access(),
            PermissionStatus::Granted
        );
        assert!(library.is_dir());
    }

    #[test]
    fn missing_source_fails_to_save() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = DesktopMediaBridge::new(dir.path().join("captures"), dir.path().join("lib"));
        assert!(matches!(
            bridge.save_asset(dir.path().join("gone.jpg").to_string_lossy().to_string()),
            SaveResult::Failed { .. }
        ));
    }
}
