/// A failed request to the server.
///
/// The poller treats these as "still pending" and the preview
/// synchronizer leaves the display untouched, so no structure beyond
/// the message is needed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("request failed: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}
