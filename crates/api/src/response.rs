//! Shared response envelope types for API handlers.
//!
//! Resource-creating endpoints use a `{ "data": ... }` envelope. The
//! status, result-view, and preview endpoints serialize their protocol
//! types bare; those shapes are part of the client synchronization
//! contract in `integro_core::protocol`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
