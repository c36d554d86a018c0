use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::AppCore;
use crate::media::CaptureOptions;
use crate::state::ImageSource;

const CONFIG_FILE: &str = "hola_config.json";
const DEFAULT_CAPTURE_QUALITY: f32 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) disable_media: Option<bool>,
    pub(crate) capture_quality: Option<f32>,
    pub(crate) allow_capture_editing: Option<bool>,
}

pub(crate) fn load_app_config(data_dir: &str) -> AppConfig {
    let path = Path::new(data_dir).join(CONFIG_FILE);
    if !path.exists() {
        return AppConfig::default();
    }
    match read_app_config(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(err = %format!("{e:#}"), path = %path.display(), "ignoring app config");
            AppConfig::default()
        }
    }
}

fn read_app_config(path: &Path) -> anyhow::Result<AppConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub(crate) fn default_app_config_json() -> String {
    let defaults = AppConfig {
        disable_media: Some(false),
        capture_quality: Some(DEFAULT_CAPTURE_QUALITY),
        allow_capture_editing: Some(true),
    };
    serde_json::to_string_pretty(&defaults).unwrap_or_else(|_| "{}".to_string())
}

impl AppConfig {
    pub(crate) fn capture_options(&self, source: ImageSource) -> CaptureOptions {
        let quality = self
            .capture_quality
            .filter(|q| q.is_finite())
            .map(|q| q.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_CAPTURE_QUALITY);
        let allows_editing = match source {
            ImageSource::Camera => self.allow_capture_editing.unwrap_or(true),
            ImageSource::Library => false,
        };
        CaptureOptions {
            quality,
            allows_editing,
        }
    }
}

impl AppCore {
    pub(super) fn media_enabled(&self) -> bool {
        if let Some(disable) = self.config.disable_media {
            return !disable;
        }
        std::env::var("HOLA_DISABLE_MEDIA").ok().as_deref() != Some("1")
    }
}
