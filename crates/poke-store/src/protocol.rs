//! # Wire Protocol Messages
//!
//! Request and response types for client communication.
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Basket Protocol Messages                           │
//! │                                                                         │
//! │  COMMANDS (client → store)                                             │
//! │  ─────────────────────────                                             │
//! │  { "verb": "create",   "basketId": "cart1" }                           │
//! │  { "verb": "add",      "basketId": "cart1", "itemType": "pokeball" }   │
//! │  { "verb": "checkout", "basketId": "cart1" }                           │
//! │  { "verb": "drop",     "basketId": "cart1" }                           │
//! │                                                                         │
//! │  RESPONSES (store → client, broadcast or requester-only)               │
//! │  ───────────────────────────────────────────────────────               │
//! │  { "status": "created",   "message": "created basket 'cart1'" }        │
//! │  { "status": "not_found", "message": "basket 'x' does not exist" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Newline-delimited JSON over TCP: one message per line, both directions.
//! The framing lives in the session layer; this module only defines the
//! shapes and the JSON codec helpers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Verb
// =============================================================================

/// A command verb.
///
/// This is a closed enum: a line carrying any other verb fails to decode and
/// never reaches the store actor. The session logs it and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Create a new empty basket.
    Create,
    /// Remove an existing basket.
    Drop,
    /// Add one item to a basket.
    Add,
    /// Price a basket through the discount pipeline.
    Checkout,
}

// =============================================================================
// Status Code
// =============================================================================

/// Response status, modeled on the HTTP family the codes borrow from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Ok,
    Created,
    NoContent,
    NotFound,
    Conflict,
}

impl StatusCode {
    /// Numeric form, for logs and clients that want to switch on a number.
    pub const fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::NotFound => 404,
            StatusCode::Conflict => 409,
        }
    }

    /// True for the 2xx family.
    pub const fn is_success(&self) -> bool {
        self.code() < 400
    }
}

// =============================================================================
// Request
// =============================================================================

/// One decoded client command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The command verb.
    pub verb: Verb,

    /// Target basket identifier (client-supplied).
    pub basket_id: String,

    /// Item name; only meaningful for `add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl Request {
    /// Creates a `create` request.
    pub fn create(basket_id: &str) -> Self {
        Request {
            verb: Verb::Create,
            basket_id: basket_id.to_string(),
            item_type: None,
        }
    }

    /// Creates a `drop` request.
    pub fn drop(basket_id: &str) -> Self {
        Request {
            verb: Verb::Drop,
            basket_id: basket_id.to_string(),
            item_type: None,
        }
    }

    /// Creates an `add` request.
    pub fn add(basket_id: &str, item_type: &str) -> Self {
        Request {
            verb: Verb::Add,
            basket_id: basket_id.to_string(),
            item_type: Some(item_type.to_string()),
        }
    }

    /// Creates a `checkout` request.
    pub fn checkout(basket_id: &str) -> Self {
        Request {
            verb: Verb::Checkout,
            basket_id: basket_id.to_string(),
            item_type: None,
        }
    }

    /// Serializes to a JSON line (without the trailing newline).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Response
// =============================================================================

/// One notification sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Outcome classification.
    pub status: StatusCode,

    /// Human-readable detail, e.g. `created basket 'cart1'`.
    pub message: String,
}

impl Response {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Response {
            status,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Response::new(StatusCode::Ok, message)
    }

    pub fn created(message: impl Into<String>) -> Self {
        Response::new(StatusCode::Created, message)
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Response::new(StatusCode::NoContent, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Response::new(StatusCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Response::new(StatusCode::Conflict, message)
    }

    /// Serializes to a JSON line (without the trailing newline).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from a JSON line.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = Request::add("cart1", "pokeball");
        let json = req.to_json().unwrap();
        assert!(json.contains("\"verb\":\"add\""));
        assert!(json.contains("\"basketId\":\"cart1\""));
        assert!(json.contains("\"itemType\":\"pokeball\""));

        let parsed = Request::from_json(&json).unwrap();
        assert_eq!(parsed, req);
    }

    #[test]
    fn test_request_item_type_omitted_when_absent() {
        let json = Request::checkout("cart1").to_json().unwrap();
        assert!(!json.contains("itemType"));

        let parsed = Request::from_json(&json).unwrap();
        assert_eq!(parsed.item_type, None);
    }

    #[test]
    fn test_unknown_verb_fails_decode() {
        let err = Request::from_json(r#"{"verb":"teleport","basketId":"cart1"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_response_serialization() {
        let res = Response::created("created basket 'cart1'");
        let json = res.to_json().unwrap();
        assert!(json.contains("\"status\":\"created\""));

        let parsed = Response::from_json(&json).unwrap();
        assert_eq!(parsed, res);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusCode::Ok.code(), 200);
        assert_eq!(StatusCode::Created.code(), 201);
        assert_eq!(StatusCode::NoContent.code(), 204);
        assert_eq!(StatusCode::NotFound.code(), 404);
        assert_eq!(StatusCode::Conflict.code(), 409);

        assert!(StatusCode::NoContent.is_success());
        assert!(!StatusCode::Conflict.is_success());
    }
}
