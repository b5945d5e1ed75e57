use serde::Deserialize;

/// Inbound webhook payload. The gateway only promises `{type, data: {id}}`;
/// anything else is ignored. The payload is advisory and reconciliation
/// always re-fetches the authoritative state by id.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayNotification {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub data: Option<GatewayNotificationData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayNotificationData {
    pub id: Option<NotificationReference>,
}

// The gateway sends the id as a string in some delivery modes and as a bare
// number in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NotificationReference {
    Text(String),
    Number(i64),
}

impl NotificationReference {
    pub fn as_string(&self) -> String {
        match self {
            NotificationReference::Text(id) => id.clone(),
            NotificationReference::Number(id) => id.to_string(),
        }
    }
}

impl GatewayNotification {
    /// Returns the gateway-side payment id when this notification describes a
    /// payment event, `None` for everything else.
    pub fn payment_event_id(&self) -> Option<String> {
        if self.event_type.as_deref() != Some("payment") {
            return None;
        }
        self.data.as_ref()?.id.as_ref().map(|id| id.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_event_with_string_id() {
        let notification: GatewayNotification =
            serde_json::from_str(r#"{"type":"payment","data":{"id":"abc"}}"#).unwrap();
        assert_eq!(notification.payment_event_id().as_deref(), Some("abc"));
    }

    #[test]
    fn payment_event_with_numeric_id() {
        let notification: GatewayNotification =
            serde_json::from_str(r#"{"type":"payment","data":{"id":12345}}"#).unwrap();
        assert_eq!(notification.payment_event_id().as_deref(), Some("12345"));
    }

    #[test]
    fn non_payment_events_are_ignored() {
        let notification: GatewayNotification =
            serde_json::from_str(r#"{"type":"merchant_order","data":{"id":"abc"}}"#).unwrap();
        assert_eq!(notification.payment_event_id(), None);
    }

    #[test]
    fn missing_type_or_data_is_tolerated() {
        let notification: GatewayNotification = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(notification.payment_event_id(), None);

        let notification: GatewayNotification =
            serde_json::from_str(r#"{"type":"payment"}"#).unwrap();
        assert_eq!(notification.payment_event_id(), None);

        let notification: GatewayNotification =
            serde_json::from_str(r#"{"type":"payment","data":{}}"#).unwrap();
        assert_eq!(notification.payment_event_id(), None);
    }
}
