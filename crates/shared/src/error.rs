use serde::{Deserialize, Serialize};

/// Error body returned by the booking backend, e.g. `{"error":"Slot full"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Parses a raw response body, tolerating non-JSON and bodies without an `error` key.
    pub fn from_body(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_server_supplied_message() {
        let body = ApiErrorBody::from_body(br#"{"error":"Slot full"}"#);
        assert_eq!(body.message(), Some("Slot full"));
    }

    #[test]
    fn html_or_missing_key_yields_no_message() {
        assert_eq!(ApiErrorBody::from_body(b"<h1>502</h1>").message(), None);
        assert_eq!(ApiErrorBody::from_body(br#"{"detail":"x"}"#).message(), None);
        assert_eq!(ApiErrorBody::from_body(br#"{"error":""}"#).message(), None);
    }
}
