use serde::{Deserialize, Serialize};

/// Body of `POST /api/subscribe`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPayload {
    pub timezone: String,
    pub number: String,
}

/// What the subscription backend answers with. Only used for logging.
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub subscribed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub timezone: String,
}

/// Query parameters the page script appends to its own URL.
#[derive(Debug, Default, Deserialize)]
pub struct ClientParams {
    /// IANA zone reported by the browser.
    pub tz: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_timezone_then_number() {
        let payload = SubscriptionPayload {
            timezone: "America/New_York".to_string(),
            number: "+15551234567".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"timezone":"America/New_York","number":"+15551234567"}"#
        );
    }

    #[test]
    fn subscribe_response_tolerates_missing_fields() {
        let response: SubscribeResponse =
            serde_json::from_str(r#"{"error":"Invalid phone number."}"#).unwrap();
        assert!(!response.subscribed);
        assert_eq!(response.error.as_deref(), Some("Invalid phone number."));
        assert!(response.number.is_none());
    }
}
