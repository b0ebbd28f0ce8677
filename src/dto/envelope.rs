use serde::{Deserialize, Serialize};

/// The three wire message shapes, discriminated by `kind`. Mirrors how the
/// hosting layer's websocket protocol tags its own messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    Request {
        v: u8,
        id: String,
        action: String,
        #[serde(default)]
        data: serde_json::Value,
    },
    Response {
        v: u8,
        id: String,
        ok: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<ErrorPayload>,
    },
    Event {
        v: u8,
        event: String,
        data: serde_json::Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidAction,
    Unauthorized,
    StaleConnection,
    BadPayload,
    InternalError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl Envelope {
    pub fn ok(id: impl Into<String>, data: serde_json::Value) -> Envelope {
        Envelope::Response {
            v: 1,
            id: id.into(),
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(id: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Envelope {
        Envelope::Response {
            v: 1,
            id: id.into(),
            ok: false,
            data: None,
            error: Some(ErrorPayload {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn event(event: impl Into<String>, data: serde_json::Value) -> Envelope {
        Envelope::Event {
            v: 1,
            event: event.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_wire_shape() {
        let raw = r#"{"v":1,"kind":"request","id":"1","action":"sit","data":{"seatIndex":0}}"#;
        let parsed: Envelope = serde_json::from_str(raw).unwrap();
        match parsed {
            Envelope::Request { action, .. } => assert_eq!(action, "sit"),
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn error_response_round_trips() {
        let envelope = Envelope::err("7", ErrorCode::Unauthorized, "nope");
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        match back {
            Envelope::Response { ok, error, .. } => {
                assert!(!ok);
                assert_eq!(error.unwrap().code, ErrorCode::Unauthorized);
            }
            _ => panic!("expected a response"),
        }
    }
}
