//! Client-side synchronization protocol.
//!
//! The pieces a result page and a submission form need, expressed
//! against trait seams so every behavior is testable without a server:
//!
//! - [`status::StatusPoller`] -- sequential fixed-interval polling until
//!   a terminal state (or the attempt bound) is reached.
//! - [`preview::PreviewSynchronizer`] -- debounced expression-to-LaTeX
//!   round trip with issuance-ordered display updates.
//! - [`presenter::VideoPresenter`] -- idempotent video injection with
//!   clamped third-of-duration seeking and cache-busted artifact URLs.
//! - [`view::synchronize_result_view`] -- ties the above to the result
//!   view contract (an already-ready view never starts the poller).

pub mod http;
pub mod presenter;
pub mod preview;
pub mod status;
pub mod transport;
pub mod view;

pub use http::ApiClient;
pub use presenter::VideoPresenter;
pub use preview::PreviewSynchronizer;
pub use status::{PollConfig, PollOutcome, StatusPoller};
pub use transport::TransportError;
