//! API models for the VK-style JSON wire protocol
//!
//! Every response body carries either a top-level `error` object
//! (application-level failure inside an HTTP 200) or a top-level
//! `response` payload.

use serde::{Deserialize, Serialize};

/// Application-level error returned inside an HTTP 200 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: i64,
    pub error_msg: String,
}

/// Top-level response envelope.
///
/// Callers must check `error` before treating `response` as a successful
/// payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub response: Option<serde_json::Value>,
}

/// One profile record from the primary user-lookup method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl UserRecord {
    /// Deleted profiles keep the sentinel first name on the wire.
    pub fn is_deleted(&self) -> bool {
        self.first_name == "DELETED"
    }

    /// A deleted or closed profile exposes no sub-options.
    pub fn is_restricted(&self) -> bool {
        self.is_deleted() || self.is_closed
    }
}

/// One photo album record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub size: i64,
}

/// Paginated sub-resource payload: an object holding an `items` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsPayload<T> {
    #[serde(default)]
    pub count: Option<i64>,
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_response() {
        let body = r#"{"response":[{"id":1,"first_name":"Alex","last_name":"K","is_closed":false}]}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();

        assert!(envelope.error.is_none());
        let users: Vec<UserRecord> = serde_json::from_value(envelope.response.unwrap()).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].first_name, "Alex");
        assert!(!users[0].is_closed);
    }

    #[test]
    fn test_envelope_with_error() {
        let body = r#"{"error":{"error_code":5,"error_msg":"bad token"}}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();

        assert!(envelope.response.is_none());
        let err = envelope.error.unwrap();
        assert_eq!(err.error_code, 5);
        assert_eq!(err.error_msg, "bad token");
    }

    #[test]
    fn test_user_record_missing_is_closed_defaults_open() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id":7,"first_name":"Ivan","last_name":"P"}"#).unwrap();
        assert!(!user.is_closed);
        assert!(!user.is_restricted());
    }

    #[test]
    fn test_restricted_profiles() {
        let deleted = UserRecord {
            id: 1,
            first_name: "DELETED".to_string(),
            last_name: String::new(),
            is_closed: false,
        };
        assert!(deleted.is_deleted());
        assert!(deleted.is_restricted());

        let closed = UserRecord {
            id: 2,
            first_name: "Olga".to_string(),
            last_name: "S".to_string(),
            is_closed: true,
        };
        assert!(!closed.is_deleted());
        assert!(closed.is_restricted());
    }

    #[test]
    fn test_items_payload() {
        let body = r#"{"count":2,"items":[3,9]}"#;
        let payload: ItemsPayload<i64> = serde_json::from_str(body).unwrap();
        assert_eq!(payload.count, Some(2));
        assert_eq!(payload.items, vec![3, 9]);

        // `count` is optional on the wire
        let payload: ItemsPayload<i64> = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert_eq!(payload.count, None);
        assert!(payload.items.is_empty());
    }

    #[test]
    fn test_album_roundtrip_keys() {
        let body = r#"{"id":42,"title":"Travel","size":17}"#;
        let album: Album = serde_json::from_str(body).unwrap();
        assert_eq!(album.id, 42);
        assert_eq!(album.title, "Travel");
        assert_eq!(album.size, 17);
    }
}
