//! Video playback injection and seek controls.
//!
//! The playback element is a collaborator behind [`PlaybackSurface`].
//! Duration is unknown until the element has loaded metadata, so the
//! seek handlers are no-ops until [`PlaybackSurface::duration`] returns
//! a value.

/// Minimal handle on a playback element.
pub trait PlaybackSurface {
    /// Point the element at a source URL and start loading.
    fn load(&mut self, url: &str);
    /// Start playback.
    fn play(&mut self);
    /// Total duration in seconds; `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    /// Move the playback position.
    fn seek(&mut self, seconds: f64);
}

/// Append a cache-busting token so a previous job's cached video is
/// never shown for a new job id, even when the path string repeats.
pub fn cache_busted_url(artifact_url: &str, token: i64) -> String {
    format!("{artifact_url}?t={token}")
}

/// Injects the finished artifact into a playback surface exactly once
/// and drives the three-step seek controls.
#[derive(Debug, Default)]
pub struct VideoPresenter {
    injected: bool,
}

impl VideoPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and play the artifact. Idempotent: a second call (e.g. a
    /// stale `ready` observation) does nothing.
    pub fn present(
        &mut self,
        surface: &mut impl PlaybackSurface,
        artifact_url: &str,
        cache_token: i64,
    ) {
        if self.injected {
            return;
        }
        self.injected = true;
        surface.load(&cache_busted_url(artifact_url, cache_token));
        surface.play();
    }

    /// Whether the video has been injected.
    pub fn presented(&self) -> bool {
        self.injected
    }

    /// Step back one third of the duration, clamped at 0.
    /// No-op until metadata has loaded.
    pub fn seek_back(&self, surface: &mut impl PlaybackSurface) {
        let Some(duration) = surface.duration() else {
            return;
        };
        let target = (surface.position() - duration / 3.0).max(0.0);
        surface.seek(target);
    }

    /// Step forward one third of the duration, clamped at the end.
    /// No-op until metadata has loaded.
    pub fn seek_forward(&self, surface: &mut impl PlaybackSurface) {
        let Some(duration) = surface.duration() else {
            return;
        };
        let target = (surface.position() + duration / 3.0).min(duration);
        surface.seek(target);
    }
}
