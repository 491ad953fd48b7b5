//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for a discovery draw: `{ "data": T | null, "exhausted": bool }`.
///
/// `exhausted` is `true` exactly when the listener has no eligible tracks
/// left, so clients can tell "nothing left" from a transport failure.
#[derive(Debug, Serialize)]
pub struct DiscoveryResponse<T: Serialize> {
    pub data: Option<T>,
    pub exhausted: bool,
}
