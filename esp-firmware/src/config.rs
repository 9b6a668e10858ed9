// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use funk_core::{PinAssignment, PinId, PulseTiming};

// ============================================================================
// Sender Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des 433 MHz Sendemoduls
pub const DATA_PIN: PinId = 4;

/// GPIO-Pin für die schaltbare Versorgung des Sendemoduls
/// `None` wenn das Modul dauerhaft versorgt ist
pub const POWER_PIN: Option<PinId> = Some(5);

/// Pins, die per MQTT-Befehl angefordert werden dürfen
/// Jeder Pin muss in main.rs auch in der EspGpioBank registriert werden!
pub const SPARE_PINS: [PinId; 2] = [6, 7];

/// Standard-Pinbelegung, falls ein Befehl keine Pins angibt
pub const DEFAULT_PINS: PinAssignment = PinAssignment::new(DATA_PIN, POWER_PIN);

/// Basiseinheit des Puls-Timings in Mikrosekunden
/// Mit Logic-Analyzer nachmessen, Soll: kurzer Puls ~330 µs
pub const TIME_UNIT_US: u32 = 235;

/// Sync-Pause nach jeder Paket-Wiederholung in Basiseinheiten
pub const SYNC_GAP_UNITS: u32 = 29;

/// Timing für den Pulssender
pub const PULSE_TIMING: PulseTiming =
    PulseTiming::new(TIME_UNIT_US).with_sync_gap_units(SYNC_GAP_UNITS);

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Wartezeit nach WiFi-Fehlern in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Anzahl Sockets im embassy-net Stack (MQTT + DNS)
pub const NET_SOCKET_COUNT: usize = 3;

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für eingehende Schaltbefehle
/// Payload: "CHANNEL STATUS [DATAPIN] [POWERPIN]" oder JSON
pub const MQTT_TOPIC_COMMAND: &str = env!(
    "MQTT_TOPIC_COMMAND",
    "MQTT Topic Command nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für das Ergebnis jeder Übertragung
pub const MQTT_TOPIC_STATUS: &str = env!(
    "MQTT_TOPIC_STATUS",
    "MQTT Topic Status nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Reconnect Delay in Sekunden
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Ping-Intervall ohne eingehende Nachrichten (kleiner als Keep-Alive)
pub const MQTT_PING_INTERVAL_SECS: u64 = 20;

/// MQTT Buffer-Größe in Bytes
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// TCP RX/TX Buffer-Größe für die MQTT-Verbindung
pub const MQTT_TCP_BUFFER_SIZE: usize = 4096;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// Buffer für JSON-Status-Payloads
/// Für {"channel":"all","state":"off","status":-3,"error":"..."}
pub const JSON_STATUS_BUFFER_SIZE: usize = 128;
