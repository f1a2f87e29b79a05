//! Response envelopes used by the catalog backend.
//!
//! Every mutating endpoint answers `{ status, data?, description? }`. The
//! `description` is a plain string for business rejections and a list of
//! strings for validation/transport errors, so both shapes are accepted.

use serde::{Deserialize, Serialize};

/// Human-readable error text as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    One(String),
    Many(Vec<String>),
}

impl Description {
    /// First non-empty message, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Description::One(s) => Some(s.as_str()).filter(|s| !s.trim().is_empty()),
            Description::Many(items) => items
                .iter()
                .map(String::as_str)
                .find(|s| !s.trim().is_empty()),
        }
    }
}

/// Стандартный конверт ответа `{ status, data, description }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: bool,
    pub data: Option<T>,
    pub description: Option<Description>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            description: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            description: Some(Description::One(message.into())),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.description.as_ref().and_then(Description::first)
    }
}

/// Ответ без полезной нагрузки (update, set competencies).
pub type StatusResponse = ApiResponse<serde_json::Value>;

/// Catalog endpoints answer either with a bare array or with the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Wrapped(ApiResponse<Vec<T>>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) => items,
            ListPayload::Wrapped(resp) => resp.data.unwrap_or_default(),
        }
    }
}

/// QR endpoint answers with the payload string itself or wraps it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QrCodePayload {
    Plain(String),
    Wrapped(ApiResponse<String>),
}

impl QrCodePayload {
    pub fn into_payload(self) -> Option<String> {
        match self {
            QrCodePayload::Plain(s) => Some(s),
            QrCodePayload::Wrapped(resp) => resp.data,
        }
        .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_accepts_string_and_list() {
        let one: StatusResponse =
            serde_json::from_str(r#"{"status":false,"description":"Код занят"}"#).unwrap();
        assert_eq!(one.message(), Some("Код занят"));

        let many: StatusResponse =
            serde_json::from_str(r#"{"status":false,"description":["", "Нет доступа"]}"#).unwrap();
        assert_eq!(many.message(), Some("Нет доступа"));
    }

    #[test]
    fn test_missing_status_means_rejected() {
        let resp: StatusResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!resp.status);
        assert_eq!(resp.message(), None);
    }

    #[test]
    fn test_list_payload_both_shapes() {
        let plain: ListPayload<i64> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(plain.into_items(), vec![1, 2]);

        let wrapped: ListPayload<i64> =
            serde_json::from_str(r#"{"status":true,"data":[3]}"#).unwrap();
        assert_eq!(wrapped.into_items(), vec![3]);

        let empty: ListPayload<i64> = serde_json::from_str(r#"{"status":true,"data":null}"#).unwrap();
        assert!(empty.into_items().is_empty());
    }

    #[test]
    fn test_qr_payload_both_shapes() {
        let plain: QrCodePayload = serde_json::from_str(r#""data:image/png;base64,AAA""#).unwrap();
        assert_eq!(plain.into_payload().as_deref(), Some("data:image/png;base64,AAA"));

        let wrapped: QrCodePayload =
            serde_json::from_str(r#"{"status":true,"data":"<svg/>"}"#).unwrap();
        assert_eq!(wrapped.into_payload().as_deref(), Some("<svg/>"));

        let blank: QrCodePayload = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(blank.into_payload(), None);
    }
}
