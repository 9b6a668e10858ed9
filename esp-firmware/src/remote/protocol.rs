// MQTT-Protokoll-Definitionen
// Befehle werden von funk_core::decode_payload gelesen (Text oder JSON),
// das Ergebnis geht als JSON-Statusmeldung zurück.

use funk_core::{Channel, PayloadError, SwitchRequest, SwitchState};
use serde::Serialize;

/// Server → Client Statusmeldung
/// Für {"channel":"a","state":"on","status":0}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SwitchState>,
    pub status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl StatusMessage {
    pub fn from_report(request: &SwitchRequest, status: i32) -> Self {
        Self {
            channel: Some(request.command.channel),
            state: Some(request.command.state),
            status,
            error: None,
        }
    }

    pub fn from_payload_error(error: PayloadError) -> Self {
        Self {
            channel: None,
            state: None,
            status: error.status(),
            error: Some(error.as_str()),
        }
    }

    /// Serialisiert die Meldung in `buffer`, liefert die Länge
    pub fn encode(&self, buffer: &mut [u8]) -> Option<usize> {
        serde_json_core::to_slice(self, buffer).ok()
    }
}
