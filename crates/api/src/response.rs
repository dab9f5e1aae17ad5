//! Shared response envelope types for API handlers.
//!
//! Admin endpoints use a `{ "data": ... }` envelope. The public form
//! endpoints return their own flat bodies because the website reads
//! `success` and `message` directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
