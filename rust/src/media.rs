use std::fmt;
use std::sync::{Arc, RwLock};

use crate::state::{Alert, ImageSource};

#[derive(uniffi::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(uniffi::Enum, Clone, Debug, PartialEq, Eq)]
pub enum CaptureResult {
    Captured { uri: String },
    Cancelled,
    Failed { message: String },
}

#[derive(uniffi::Enum, Clone, Debug, PartialEq, Eq)]
pub enum SaveResult {
    Saved,
    Failed { message: String },
}

#[derive(uniffi::Record, Clone, Debug, PartialEq)]
pub struct CaptureOptions {
    /// Compression quality in `0.0..=1.0`.
    pub quality: f32,
    pub allows_editing: bool,
}

/// Platform camera / photo library surface, implemented by each shell.
///
/// Calls may block for as long as a native dialog is up; the core only ever
/// invokes them off the actor thread.
#[uniffi::export(callback_interface)]
pub trait MediaBridge: Send + Sync + 'static {
    fn request_camera_access(&self) -> PermissionStatus;
    fn capture_photo(&self, options: CaptureOptions) -> CaptureResult;
    fn request_library_read_access(&self) -> PermissionStatus;
    fn pick_from_library(&self, options: CaptureOptions) -> CaptureResult;
    fn request_library_write_access(&self) -> PermissionStatus;
    fn save_asset(&self, uri: String) -> SaveResult;
}

pub type SharedMediaBridge = Arc<RwLock<Option<Arc<dyn MediaBridge>>>>;

pub(crate) fn installed_bridge(shared: &SharedMediaBridge) -> Option<Arc<dyn MediaBridge>> {
    match shared.read() {
        Ok(slot) => slot.clone(),
        Err(poison) => poison.into_inner().clone(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaPermission {
    Camera,
    LibraryRead,
    LibraryWrite,
}

impl fmt::Display for MediaPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaPermission::Camera => "camera",
            MediaPermission::LibraryRead => "library read",
            MediaPermission::LibraryWrite => "library write",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("media unavailable")]
    Unavailable,
    #[error("{0} permission denied")]
    PermissionDenied(MediaPermission),
    #[error("capture failed: {0}")]
    CaptureFailed(String),
    #[error("save failed: {0}")]
    SaveFailed(String),
}

/// Permission check followed by capture (camera) or pick (library).
///
/// `Ok(None)` means the user backed out of the native picker.
pub(crate) fn acquire_image(
    bridge: &dyn MediaBridge,
    source: ImageSource,
    options: CaptureOptions,
) -> Result<Option<String>, MediaError> {
    let (permission, status) = match source {
        ImageSource::Camera => (MediaPermission::Camera, bridge.request_camera_access()),
        ImageSource::Library => (
            MediaPermission::LibraryRead,
            bridge.request_library_read_access(),
        ),
    };
    if status != PermissionStatus::Granted {
        return Err(MediaError::PermissionDenied(permission));
    }

    let result = match source {
        ImageSource::Camera => bridge.capture_photo(options),
        ImageSource::Library => bridge.pick_from_library(options),
    };
    match result {
        CaptureResult::Captured { uri } if uri.trim().is_empty() => {
            Err(MediaError::CaptureFailed("empty uri".to_string()))
        }
        CaptureResult::Captured { uri } => Ok(Some(uri)),
        CaptureResult::Cancelled => Ok(None),
        CaptureResult::Failed { message } => Err(MediaError::CaptureFailed(message)),
    }
}

pub(crate) fn save_image(bridge: &dyn MediaBridge, uri: &str) -> Result<(), MediaError> {
    if bridge.request_library_write_access() != PermissionStatus::Granted {
        return Err(MediaError::PermissionDenied(MediaPermission::LibraryWrite));
    }
    match bridge.save_asset(uri.to_string()) {
        SaveResult::Saved => Ok(()),
        SaveResult::Failed { message } => Err(MediaError::SaveFailed(message)),
    }
}

fn unavailable_alert() -> Alert {
    Alert::new("Unavailable", "Camera and photo library are not available.")
}

/// What the user sees once an image flow finishes; `None` for a cancelled picker.
pub(crate) fn image_flow_alert(
    source: ImageSource,
    result: &Result<Option<String>, MediaError>,
) -> Option<Alert> {
    match result {
        Ok(Some(_)) => Some(match source {
            ImageSource::Camera => Alert::new("Success", "Photo taken."),
            ImageSource::Library => Alert::new("Success", "Image selected."),
        }),
        Ok(None) => None,
        Err(MediaError::PermissionDenied(MediaPermission::Camera)) => Some(Alert::new(
            "Permission denied",
            "Camera access is needed to take photos.",
        )),
        Err(MediaError::PermissionDenied(_)) => Some(Alert::new(
            "Permission denied",
            "Photo library access is needed to choose a photo.",
        )),
        Err(MediaError::Unavailable) => Some(unavailable_alert()),
        Err(MediaError::CaptureFailed(_)) | Err(MediaError::SaveFailed(_)) => {
            Some(Alert::new("Error", "Could not get the image."))
        }
    }
}

pub(crate) fn save_flow_alert(result: &Result<(), MediaError>) -> Alert {
    match result {
        Ok(()) => Alert::new("Saved", "The image was saved to your library \u{1F4F8}"),
        Err(MediaError::PermissionDenied(_)) => Alert::new(
            "Permission denied",
            "Cannot save the image without permission.",
        ),
        Err(MediaError::Unavailable) => unavailable_alert(),
        Err(_) => Alert::new("Error", "Could not save the image."),
    }
}
