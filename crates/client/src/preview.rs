//! Debounced live-preview synchronization.
//!
//! Field changes arrive on a channel; after a quiet period the current
//! values are sent to the stateless preview endpoint and the response
//! is composed into a display expression. Debouncing delays issuance
//! only; earlier requests may still be in flight when a later one is
//! issued, so every request carries a sequence token and the display
//! only ever moves forward in issuance order.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use integro_core::protocol::{PreviewRequest, PreviewResponse};

use crate::transport::TransportError;

/// Quiet period before a burst of field changes produces a request.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Shown in place of an empty bound in the composed display.
pub const BOUND_PLACEHOLDER: &str = "?";

/// Where preview responses come from. Production uses
/// [`crate::ApiClient`]; tests use scripted fakes.
#[async_trait]
pub trait PreviewTransport: Send + Sync + 'static {
    async fn fetch_preview(
        &self,
        request: &PreviewRequest,
    ) -> Result<PreviewResponse, TransportError>;
}

/// The inline area the preview renders into.
pub trait PreviewSurface: Send + 'static {
    /// Typeset and show a display expression.
    fn show(&mut self, text: &str);
    /// Clear the area (empty or unparseable integrand).
    fn clear(&mut self);
}

// ---------------------------------------------------------------------------
// Display composition
// ---------------------------------------------------------------------------

/// Compose the display expression, or `None` when the integrand came
/// back empty (the preview area must be cleared, never showing
/// `integral from ? to ? of  dx`).
pub fn compose_display(response: &PreviewResponse, variable: &str) -> Option<String> {
    if response.expr.is_empty() {
        return None;
    }
    let lower = non_empty_or(&response.lower, BOUND_PLACEHOLDER);
    let upper = non_empty_or(&response.upper, BOUND_PLACEHOLDER);
    Some(format!(
        "integral from {lower} to {upper} of {} d{variable}",
        response.expr,
    ))
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Sequence gate
// ---------------------------------------------------------------------------

/// Admits completions only in issuance order.
///
/// A response whose token is older than the newest completed request is
/// stale and must be discarded, even if it arrives last.
#[derive(Debug, Default)]
pub struct SequenceGate {
    newest_seen: Option<u64>,
}

impl SequenceGate {
    /// Record a completion. Returns whether it may touch the display.
    pub fn admit(&mut self, seq: u64) -> bool {
        match self.newest_seen {
            Some(newest) if seq <= newest => false,
            _ => {
                self.newest_seen = Some(seq);
                true
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

type InFlight = Pin<
    Box<
        dyn std::future::Future<Output = (u64, Result<PreviewResponse, TransportError>, String)>
            + Send,
    >,
>;

/// Runs the debounce/request/apply loop for the live preview.
pub struct PreviewSynchronizer<T, S> {
    transport: Arc<T>,
    surface: S,
    debounce: Duration,
}

impl<T: PreviewTransport, S: PreviewSurface> PreviewSynchronizer<T, S> {
    pub fn new(transport: T, surface: S) -> Self {
        Self::with_debounce(transport, surface, DEBOUNCE_INTERVAL)
    }

    pub fn with_debounce(transport: T, surface: S, debounce: Duration) -> Self {
        Self {
            transport: Arc::new(transport),
            surface,
            debounce,
        }
    }

    /// Consume field-change events until the channel closes, then drain
    /// any in-flight requests and hand the surface back.
    pub async fn run(mut self, mut changes: mpsc::Receiver<PreviewRequest>) -> S {
        let mut next_seq: u64 = 0;
        let mut gate = SequenceGate::default();
        let mut in_flight: FuturesUnordered<InFlight> = FuturesUnordered::new();

        // The latest field values awaiting their quiet period.
        let mut pending: Option<PreviewRequest> = None;
        let mut deadline: Option<Instant> = None;

        loop {
            // Copy the deadline out so the quiet-period future does not
            // borrow state the branch handlers mutate.
            let quiet_at = deadline;
            let quiet = async move {
                match quiet_at {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                received = changes.recv() => match received {
                    Some(fields) => {
                        // Restart the quiet period on every change.
                        pending = Some(fields);
                        deadline = Some(Instant::now() + self.debounce);
                    }
                    None => break,
                },
                () = quiet => {
                    let request = pending.take().expect("deadline implies pending fields");
                    deadline = None;
                    let seq = next_seq;
                    next_seq += 1;
                    in_flight.push(issue(Arc::clone(&self.transport), seq, request));
                }
                Some((seq, result, variable)) = in_flight.next(), if !in_flight.is_empty() => {
                    apply(&mut gate, &mut self.surface, seq, result, &variable);
                }
            }
        }

        // Channel closed; finish what is already in flight.
        while let Some((seq, result, variable)) = in_flight.next().await {
            apply(&mut gate, &mut self.surface, seq, result, &variable);
        }

        self.surface
    }
}

fn issue<T: PreviewTransport>(transport: Arc<T>, seq: u64, request: PreviewRequest) -> InFlight {
    Box::pin(async move {
        let result = transport.fetch_preview(&request).await;
        (seq, result, request.variable)
    })
}

/// Apply one completed request to the display.
///
/// The gate advances on every completion, success or not: once a newer
/// request has completed, an older response must never surface, and a
/// failed newer request must not let an older success sneak in behind
/// it. Transport failures themselves leave the display untouched.
fn apply<S: PreviewSurface>(
    gate: &mut SequenceGate,
    surface: &mut S,
    seq: u64,
    result: Result<PreviewResponse, TransportError>,
    variable: &str,
) {
    if !gate.admit(seq) {
        tracing::trace!(seq, "Discarding stale preview response");
        return;
    }
    match result {
        Ok(response) => match compose_display(&response, variable) {
            Some(text) => surface.show(&text),
            None => surface.clear(),
        },
        Err(e) => {
            tracing::debug!(seq, error = %e, "Preview request failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
