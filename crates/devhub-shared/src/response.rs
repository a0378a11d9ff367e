//! The response envelope every endpoint answers with.
//!
//! Success: `{ "success": true, "message": "...", "data"?: {...} }`
//! Failure: `{ "success": false, "message": "...", "errors"?: ... }`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn failure_with(message: impl Into<String>, errors: serde_json::Value) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_data() {
        let body = serde_json::to_value(Envelope::success("ok", json!({ "n": 1 }))).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "ok", "data": { "n": 1 } }));
    }

    #[test]
    fn done_omits_data() {
        let body = serde_json::to_value(Envelope::done("cleared")).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "cleared" }));
    }

    #[test]
    fn failure_omits_data_and_optional_errors() {
        let plain = serde_json::to_value(Envelope::failure("nope")).unwrap();
        assert_eq!(plain, json!({ "success": false, "message": "nope" }));

        let detailed =
            serde_json::to_value(Envelope::failure_with("bad", json!({ "title": ["length"] })))
                .unwrap();
        assert_eq!(detailed["errors"]["title"][0], "length");
        assert!(detailed.get("data").is_none());
    }
}
