//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "success": bool, ... }` envelope. Use
//! [`ApiResponse`] instead of ad-hoc `serde_json::json!` bodies to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard success envelope: `{ "success": true, "data"?: T, "message"?: s,
/// "count"?: n }`.
///
/// Absent fields are omitted from the JSON entirely.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{ success: true, data }`
    pub fn data(data: T) -> Self {
        ApiResponse { success: true, count: None, message: None, data: Some(data) }
    }

    /// `{ success: true, message, data }` -- mutation confirmations.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            count: None,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// `{ success: true, count, data }` -- list responses.
    pub fn list(items: Vec<T>) -> Self {
        ApiResponse {
            success: true,
            count: Some(items.len()),
            message: None,
            data: Some(items),
        }
    }
}

impl ApiResponse<()> {
    /// `{ success: true, message }` -- confirmations without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse { success: true, count: None, message: Some(message.into()), data: None }
    }
}
