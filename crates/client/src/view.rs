//! Result-view synchronization.
//!
//! Ties the poller and the presenter to the result-view contract: when
//! the view loads with `ready` already true, the video is presented
//! directly and no status request is ever issued; otherwise polling
//! starts immediately and hands off to the presenter exactly once on
//! the first `ready` observation. Either path converges on the same
//! final state.

use chrono::Utc;

use integro_core::protocol::ResultView;

use crate::presenter::{PlaybackSurface, VideoPresenter};
use crate::status::{PollOutcome, StatusPoller, StatusSource};

/// Final state of a result view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// The video was injected.
    Presented,
    /// The job failed; the detail has the internal prefix stripped and
    /// is ready for inline display.
    Error(String),
    /// Polling gave up before a terminal state.
    TimedOut,
}

/// Drive a result view to its final state.
pub async fn synchronize_result_view<S, P>(
    view: &ResultView,
    poller: &StatusPoller<S>,
    presenter: &mut VideoPresenter,
    surface: &mut P,
) -> ViewOutcome
where
    S: StatusSource,
    P: PlaybackSurface,
{
    if !view.ready {
        match poller.poll(view.job_id).await {
            PollOutcome::Ready => {}
            PollOutcome::Failed(detail) => return ViewOutcome::Error(detail),
            PollOutcome::TimedOut => return ViewOutcome::TimedOut,
        }
    }
    presenter.present(surface, &view.video_url, Utc::now().timestamp_millis());
    ViewOutcome::Presented
}
