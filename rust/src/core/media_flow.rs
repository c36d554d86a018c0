use super::AppCore;
use crate::media::{self, MediaError};
use crate::state::{ImageSource, ImageState, PendingPrompt};
use crate::updates::{CoreMsg, InternalEvent};

impl AppCore {
    pub(super) fn start_image_flow(&mut self, source: ImageSource) {
        if self.state.busy.capturing_image {
            tracing::debug!(?source, "image flow already in flight");
            return;
        }
        let bridge = if self.media_enabled() {
            media::installed_bridge(&self.media_bridge)
        } else {
            None
        };
        let Some(bridge) = bridge else {
            self.finish_image_flow(source, Err(MediaError::Unavailable));
            return;
        };

        let options = self.config.capture_options(source);
        self.state.busy.capturing_image = true;
        self.emit_state();

        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                media::acquire_image(bridge.as_ref(), source, options)
            })
            .await
            .unwrap_or_else(|e| {
                tracing::error!(%e, "media bridge panicked during capture");
                Err(MediaError::CaptureFailed(e.to_string()))
            });
            let _ = tx.send(CoreMsg::Internal(Box::new(
                InternalEvent::ImageFlowFinished { source, result },
            )));
        });
    }

    pub(super) fn finish_image_flow(
        &mut self,
        source: ImageSource,
        result: Result<Option<String>, MediaError>,
    ) {
        self.state.busy.capturing_image = false;
        match &result {
            Ok(Some(uri)) => {
                tracing::info!(?source, "image acquired");
                self.state.image = Some(ImageState {
                    uri: uri.clone(),
                    source,
                });
            }
            Ok(None) => tracing::debug!(?source, "picker cancelled"),
            Err(e) => tracing::warn!(?source, err = %e, "image flow failed"),
        }
        if let Some(alert) = media::image_flow_alert(source, &result) {
            self.state.alert = Some(alert);
        }
        self.emit_state();
    }

    pub(super) fn request_save_image(&mut self) {
        let Some(image) = self.state.image.as_ref() else {
            tracing::debug!("save requested without an image");
            return;
        };
        self.state.prompt = Some(PendingPrompt::save_image(&image.uri));
        self.emit_state();
    }

    /// Runs once the save prompt was confirmed (and already dismissed).
    pub(super) fn start_save(&mut self, uri: String) {
        if self.state.busy.saving_image {
            tracing::debug!("save already in flight");
            self.emit_state();
            return;
        }
        let bridge = if self.media_enabled() {
            media::installed_bridge(&self.media_bridge)
        } else {
            None
        };
        let Some(bridge) = bridge else {
            self.finish_save(&uri, Err(MediaError::Unavailable));
            return;
        };

        self.state.busy.saving_image = true;
        self.emit_state();

        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let uri_for_save = uri.clone();
            let result =
                tokio::task::spawn_blocking(move || media::save_image(bridge.as_ref(), &uri_for_save))
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!(%e, "media bridge panicked during save");
                        Err(MediaError::SaveFailed(e.to_string()))
                    });
            let _ = tx.send(CoreMsg::Internal(Box::new(
                InternalEvent::SaveFlowFinished { uri, result },
            )));
        });
    }

    pub(super) fn finish_save(&mut self, uri: &str, result: Result<(), MediaError>) {
        self.state.busy.saving_image = false;
        match &result {
            Ok(()) => tracing::info!(uri, "image saved to library"),
            Err(e) => tracing::warn!(uri, err = %e, "image save failed"),
        }
        self.state.alert = Some(media::save_flow_alert(&result));
        self.emit_state();
    }
}
